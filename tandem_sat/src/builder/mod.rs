/*!
Construction of a formula within a solver: fresh variables, clause addition, and the attach/detach plumbing between the arena and the watch index.

Clause addition normalises its input at the top level:
- Literals true on the current (level-zero) valuation satisfy the clause, which is dropped.
- Duplicate literals and literals already false are dropped from the clause.
- A clause containing a literal and its negation is a tautology, and dropped.
- An empty result makes the formula unsatisfiable; a unit result is enqueued and propagated at once.
*/

pub mod dimacs;

use std::sync::atomic::Ordering::Relaxed;

use crate::db::arena::ClauseRef;
use crate::db::watch::Watcher;
use crate::solver::{GenericSolver, VarData, Seen};
use crate::structures::literal::{Lit, Var};
use crate::structures::valuation::Value;
use crate::types::err::ErrorKind;

impl<R: rand::Rng> GenericSolver<R> {
    /// Creates a fresh variable.
    ///
    /// `user_pol` fixes the polarity the variable is decided with, if given.
    /// If `decision` is cleared the variable will not be chosen for decisions, which has effects on the meaning of a satisfiable result.
    pub fn new_var(&mut self, user_pol: Option<bool>, decision: bool) -> Var {
        let var = self.assigns.len() as Var;

        self.watches.grow_to(var as usize + 1);
        self.assigns.push(Value::Undef);
        self.vardata.push(VarData::default());
        self.polarity.push(false);
        self.user_pol.push(user_pol);
        self.decision.push(false);
        self.seen.push(Seen::Undef);
        self.snapshot_seen.push(false);

        self.order_heap.grow_to(var as usize + 1);
        if self.config.rnd_init_act {
            self.order_heap
                .set_value(var as usize, self.rng.gen::<f64>() * 0.00001);
        }

        self.set_decision_var(var, decision);
        var
    }

    /// Ensures variables `0..count` exist, defaulting to decision variables.
    pub fn ensure_vars(&mut self, count: usize) {
        while self.var_count() < count {
            self.new_var(None, true);
        }
    }

    /// Marks `var` as (not) eligible for decisions, and keeps the order heap in step.
    pub fn set_decision_var(&mut self, var: Var, decision: bool) {
        match (decision, self.decision[var as usize]) {
            (true, false) => self.dec_vars += 1,
            (false, true) => self.dec_vars -= 1,
            _ => {}
        }
        self.decision[var as usize] = decision;
        self.insert_var_order(var);
    }

    /// Adds a clause over existing variables.
    ///
    /// Returns false exactly when the formula is now known to be unsatisfiable.
    pub fn add_clause(&mut self, mut lits: Vec<Lit>) -> Result<bool, ErrorKind> {
        debug_assert_eq!(self.decision_level(), 0);
        if !self.ok {
            return Ok(false);
        }

        // Sorting places duplicates and complementary pairs side by side.
        lits.sort_unstable();
        let mut kept = 0;
        let mut previous: Option<Lit> = None;
        for index in 0..lits.len() {
            let lit = lits[index];
            if self.value_of(lit) == Value::True || previous == Some(!lit) {
                return Ok(true);
            }
            if self.value_of(lit) != Value::False && previous != Some(lit) {
                lits[kept] = lit;
                kept += 1;
                previous = Some(lit);
            }
        }
        lits.truncate(kept);

        match lits.len() {
            0 => {
                self.ok = false;
                Ok(false)
            }
            1 => {
                self.enqueue(lits[0], None);
                self.ok = self.propagate().is_none();
                Ok(self.ok)
            }
            _ => {
                let cr = self.arena.alloc(&lits, false)?;
                self.clauses.push(cr);
                self.attach_clause(cr);
                Ok(true)
            }
        }
    }

    /// Watches the first two literals of the clause and counts it attached.
    pub(crate) fn attach_clause(&mut self, cr: ClauseRef) {
        debug_assert!(self.arena.size(cr) > 1);
        let first = self.arena.lit(cr, 0);
        let second = self.arena.lit(cr, 1);
        self.watches.push(!first, Watcher::new(cr, second));
        self.watches.push(!second, Watcher::new(cr, first));

        let literals = self.arena.size(cr) as u64;
        let counters = &self.shared.counters;
        if self.arena.is_learnt(cr) {
            counters.num_learnts.fetch_add(1, Relaxed);
            counters.learnts_literals.fetch_add(literals, Relaxed);
        } else {
            counters.num_clauses.fetch_add(1, Relaxed);
            counters.clauses_literals.fetch_add(literals, Relaxed);
        }
    }

    /// Unwatches the clause.
    ///
    /// A strict detach walks the two watch lists at once; the default merely smudges them for a later sweep.
    pub(crate) fn detach_clause(&mut self, cr: ClauseRef, strict: bool) {
        debug_assert!(self.arena.size(cr) > 1);
        let first = self.arena.lit(cr, 0);
        let second = self.arena.lit(cr, 1);
        if strict {
            self.watches.remove(!first, cr);
            self.watches.remove(!second, cr);
        } else {
            self.watches.smudge(!first);
            self.watches.smudge(!second);
        }

        let literals = self.arena.size(cr) as u64;
        let counters = &self.shared.counters;
        if self.arena.is_learnt(cr) {
            counters.num_learnts.fetch_sub(1, Relaxed);
            counters.learnts_literals.fetch_sub(literals, Relaxed);
        } else {
            counters.num_clauses.fetch_sub(1, Relaxed);
            counters.clauses_literals.fetch_sub(literals, Relaxed);
        }
    }

    /// Detaches the clause and frees it in the arena.
    pub(crate) fn remove_clause(&mut self, cr: ClauseRef) {
        self.detach_clause(cr, false);
        // The clause may be the reason of an assignment about to be undone.
        if self.locked(cr) {
            let first = self.arena.lit(cr, 0);
            self.vardata[first.var() as usize].reason = None;
        }
        self.arena.free(cr);
    }

    /// True exactly when some literal of the clause is true on the current valuation.
    pub(crate) fn satisfied(&self, cr: ClauseRef) -> bool {
        self.arena
            .literals(cr)
            .iter()
            .any(|&lit| self.value_of(lit) == Value::True)
    }
}
