/*!
Learnt database reduction, and simplification of the clause database at the top level.

# Reduction

When the learnt store outgrows its limit, the less active half goes:
learnt clauses are ordered so binary clauses sort above everything else and the rest ascend by activity, then the lower half is removed along with any straggler below the per-clause activity threshold.
Binary clauses are never removed, and neither are locked clauses --- those serving as the reason of a current assignment.

# Simplification

At level zero, with propagation at fixpoint, clauses satisfied by the top-level valuation can be dropped outright and false literals can be trimmed from the tails of the rest.
The work is skipped unless something was assigned since the last pass, and a propagation allowance has been used up, so repeated calls are cheap no-ops.
*/

use std::cmp::Ordering;
use std::sync::atomic::Ordering::Relaxed;

use crate::db::arena::ClauseRef;
use crate::misc::log::targets;
use crate::solver::GenericSolver;
use crate::structures::valuation::Value;

impl<R: rand::Rng> GenericSolver<R> {
    /// Removes roughly half of the learnt clauses, keeping binary, locked, and high-activity clauses.
    pub(crate) fn reduce_db(&mut self) {
        let mut learnts = std::mem::take(&mut self.learnts);
        let extra_lim = self.cla_inc / learnts.len() as f64;

        {
            let arena = &self.arena;
            let worth_less = |x: ClauseRef, y: ClauseRef| {
                arena.size(x) > 2 && (arena.size(y) == 2 || arena.activity(x) < arena.activity(y))
            };
            learnts.sort_by(|&x, &y| {
                if worth_less(x, y) {
                    Ordering::Less
                } else if worth_less(y, x) {
                    Ordering::Greater
                } else {
                    Ordering::Equal
                }
            });
        }

        let half = learnts.len() / 2;
        let mut kept = Vec::with_capacity(learnts.len());
        for (position, cr) in learnts.into_iter().enumerate() {
            if self.arena.size(cr) > 2
                && !self.locked(cr)
                && (position < half || (self.arena.activity(cr) as f64) < extra_lim)
            {
                self.remove_clause(cr);
            } else {
                kept.push(cr);
            }
        }

        log::debug!(target: targets::REDUCTION, "Learnt store reduced to {}.", kept.len());
        self.learnts = kept;
        self.check_garbage();
    }

    /// Drops satisfied clauses from `refs` and trims false tail literals from the rest.
    fn remove_satisfied_in(&mut self, refs: Vec<ClauseRef>) -> Vec<ClauseRef> {
        let mut kept = Vec::with_capacity(refs.len());

        for cr in refs {
            if self.satisfied(cr) {
                self.remove_clause(cr);
                continue;
            }

            debug_assert_eq!(self.value_of(self.arena.lit(cr, 0)), Value::Undef);
            debug_assert_eq!(self.value_of(self.arena.lit(cr, 1)), Value::Undef);

            // Trim false literals beyond the watches.
            let mut index = 2;
            while index < self.arena.size(cr) {
                if self.value_of(self.arena.lit(cr, index)) == Value::False {
                    let last = self.arena.size(cr) - 1;
                    self.arena.swap_lits(cr, index, last);
                    self.arena.shrink(cr, last);
                } else {
                    index += 1;
                }
            }
            kept.push(cr);
        }

        kept
    }

    /// Simplifies the clause database according to the top-level assignment.
    ///
    /// Returns false exactly when the formula is now known to be unsatisfiable.
    /// Idempotent: a second call with no intervening assignment changes nothing.
    pub fn simplify(&mut self) -> bool {
        debug_assert_eq!(self.decision_level(), 0);

        if !self.ok || self.propagate().is_some() {
            self.ok = false;
            return false;
        }

        if self.assigned_count() as i64 == self.simp_db_assigns || self.simp_db_props > 0 {
            return true;
        }
        log::debug!(target: targets::SIMPLIFY, "Simplifying with {} top-level assignments.", self.assigned_count());

        let learnts = std::mem::take(&mut self.learnts);
        self.learnts = self.remove_satisfied_in(learnts);

        if self.config.remove_satisfied {
            let clauses = std::mem::take(&mut self.clauses);
            self.clauses = self.remove_satisfied_in(clauses);
        }

        self.check_garbage();
        self.rebuild_order_heap();

        self.simp_db_assigns = self.assigned_count() as i64;
        let counters = &self.shared.counters;
        self.simp_db_props = (counters.clauses_literals.load(Relaxed)
            + counters.learnts_literals.load(Relaxed)) as i64;

        true
    }
}
