/*!
The activity heuristic and branch selection.

Variable activities live inside the [order heap](crate::generic::index_heap), which keeps unvalued decision variables ranked.
A bump adds the current increment to a variable's activity; decay instead grows the increment, which is equivalent and cheaper.
When an activity overflows its cap, every activity and the increment are rescaled together, preserving the order.
Learnt clause activities work the same way, with their own increment, decay, and cap.

Branch selection pops maxima from the heap until an unvalued decision variable surfaces --- or, with the configured probability, picks a random heap element first.
The polarity is the user-preferred one if set, random if configured so, and the saved phase otherwise.
*/

use std::sync::atomic::Ordering::Relaxed;

use rand::Rng;

use crate::config::defaults::{
    CLAUSE_ACTIVITY_CAP, CLAUSE_ACTIVITY_RESCALE, VAR_ACTIVITY_CAP, VAR_ACTIVITY_RESCALE,
};
use crate::db::arena::ClauseRef;
use crate::solver::GenericSolver;
use crate::structures::literal::{Lit, Var};
use crate::structures::valuation::Value;

impl<R: Rng> GenericSolver<R> {
    /// Puts `var` back among the decision candidates, if eligible.
    pub(crate) fn insert_var_order(&mut self, var: Var) {
        if !self.order_heap.contains(var as usize) && self.decision[var as usize] {
            self.order_heap.insert(var as usize);
        }
    }

    /// Adds the current increment to the activity of `var`, rescaling everything on overflow.
    pub(crate) fn bump_var_activity(&mut self, var: Var) {
        let bumped = self.order_heap.value_of(var as usize) + self.var_inc;
        self.order_heap.set_value(var as usize, bumped);

        if bumped > VAR_ACTIVITY_CAP {
            self.order_heap.apply_to_all(|a| a * VAR_ACTIVITY_RESCALE);
            self.var_inc *= VAR_ACTIVITY_RESCALE;
        }
    }

    /// Decays variable activities, by inflating the increment.
    pub(crate) fn decay_var_activity(&mut self) {
        self.var_inc *= 1.0 / self.config.var_decay;
    }

    /// Adds the current increment to the activity of a learnt clause, rescaling on overflow.
    pub(crate) fn bump_clause_activity(&mut self, cr: ClauseRef) {
        let bumped = self.arena.activity(cr) + self.cla_inc as f32;
        self.arena.set_activity(cr, bumped);

        if bumped > CLAUSE_ACTIVITY_CAP {
            for index in 0..self.learnts.len() {
                let learnt = self.learnts[index];
                let rescaled = self.arena.activity(learnt) * CLAUSE_ACTIVITY_RESCALE;
                self.arena.set_activity(learnt, rescaled);
            }
            self.cla_inc *= CLAUSE_ACTIVITY_RESCALE as f64;
        }
    }

    /// Decays clause activities, by inflating the increment.
    pub(crate) fn decay_clause_activity(&mut self) {
        self.cla_inc *= 1.0 / self.config.clause_decay;
    }

    /// Rebuilds the order heap over the unvalued decision variables.
    pub(crate) fn rebuild_order_heap(&mut self) {
        let candidates: Vec<usize> = (0..self.var_count())
            .filter(|&v| self.decision[v] && self.assigns[v] == Value::Undef)
            .collect();
        self.order_heap.rebuild(candidates.into_iter());
    }

    /// Chooses the next branching literal, or nothing if every decision variable is valued.
    pub(crate) fn pick_branch_lit(&mut self) -> Option<Lit> {
        let mut next: Option<Var> = None;

        // Now and then, at random.
        if self.rng.gen::<f64>() < self.config.random_var_freq && !self.order_heap.is_empty() {
            let slot = self.rng.gen_range(0..self.order_heap.active_count());
            let var = self.order_heap.element_at(slot) as Var;
            if self.value_of_var(var) == Value::Undef && self.decision[var as usize] {
                self.shared.counters.rnd_decisions.fetch_add(1, Relaxed);
            }
            next = Some(var);
        }

        // By activity, discarding candidates valued in the meantime.
        loop {
            match next {
                Some(var)
                    if self.value_of_var(var) == Value::Undef && self.decision[var as usize] =>
                {
                    let polarity = match self.user_pol[var as usize] {
                        Some(preferred) => preferred,
                        None if self.config.rnd_pol => self.rng.gen::<f64>() < 0.5,
                        None => self.polarity[var as usize],
                    };
                    return Some(Lit::new(var, polarity));
                }
                _ => match self.order_heap.pop_max() {
                    None => return None,
                    Some(var) => next = Some(var as Var),
                },
            }
        }
    }
}
