/*!
Boolean constraint propagation over the two-watched-literal scheme.

# Overview

Propagation drains the queue of trail entries from `qhead`.
For each literal `p` made true, the clauses watching `p` --- those holding `¬p` as a watched literal --- are inspected in order:

1. If the watcher's cached blocker is true the clause is satisfied; the watcher is kept untouched.
2. Otherwise the clause is loaded, and its literals arranged so the falsified watch sits at index one.
3. If the other watch is true the watcher is kept, with its blocker refreshed to that literal.
4. Otherwise the tail is scanned for a non-false literal to adopt as the new watch; the watcher then moves to the new literal's list.
5. If no such literal exists the clause is unit or conflicting: unit enqueues the remaining watch with the clause as reason, conflict returns the clause handle after draining the rest of the list unchanged.

The list being walked is compacted in place through a pair of read/write cursors, so watchers which moved elsewhere leave no holes.

# Contract

On return the propagation queue is empty --- on conflict, by setting `qhead` to the end of the trail.
The `propagations` counter grows by the number of trail entries processed, and `bcp_rounds` by one.
*/

use std::sync::atomic::Ordering::Relaxed;

use crate::db::arena::ClauseRef;
use crate::db::watch::Watcher;
use crate::misc::log::targets;
use crate::solver::GenericSolver;
use crate::structures::valuation::Value;

impl<R: rand::Rng> GenericSolver<R> {
    /// Propagates all enqueued facts.
    /// If a conflict arises the conflicting clause is returned.
    pub(crate) fn propagate(&mut self) -> Option<ClauseRef> {
        let mut confl = None;
        let mut processed: u64 = 0;

        while self.qhead < self.trail.len() {
            let p = self.trail[self.qhead];
            self.qhead += 1;
            processed += 1;

            // Sweep the list first if a lazy detach left removed clauses behind.
            self.watches.clean(p, &self.arena);

            let false_lit = !p;
            let mut read = 0;
            let mut write = 0;
            let length = self.watches.watchers(p).len();

            'watchers: while read < length {
                let Watcher { clause: cr, blocker } = self.watches.watchers(p)[read];

                // Try to avoid inspecting the clause.
                if self.value_of(blocker) == Value::True {
                    self.watches.watchers_mut(p)[write] = Watcher::new(cr, blocker);
                    write += 1;
                    read += 1;
                    continue 'watchers;
                }

                // Make sure the false literal is at index one.
                if self.arena.lit(cr, 0) == false_lit {
                    self.arena.swap_lits(cr, 0, 1);
                }
                debug_assert_eq!(self.arena.lit(cr, 1), false_lit);
                read += 1;

                // If the other watch is true the clause is satisfied.
                let first = self.arena.lit(cr, 0);
                let watcher = Watcher::new(cr, first);
                if first != blocker && self.value_of(first) == Value::True {
                    self.watches.watchers_mut(p)[write] = watcher;
                    write += 1;
                    continue 'watchers;
                }

                // Look for a new literal to watch.
                for index in 2..self.arena.size(cr) {
                    let candidate = self.arena.lit(cr, index);
                    if self.value_of(candidate) != Value::False {
                        self.arena.swap_lits(cr, 1, index);
                        self.watches.push(!candidate, watcher);
                        continue 'watchers;
                    }
                }

                // No watch available: the clause is unit or conflicting.
                self.watches.watchers_mut(p)[write] = watcher;
                write += 1;
                if self.value_of(first) == Value::False {
                    log::trace!(target: targets::PROPAGATION, "Conflict on {p} in clause {cr:?}.");
                    confl = Some(cr);
                    self.qhead = self.trail.len();
                    while read < length {
                        let rest = self.watches.watchers(p)[read];
                        self.watches.watchers_mut(p)[write] = rest;
                        write += 1;
                        read += 1;
                    }
                } else {
                    self.enqueue(first, Some(cr));
                }
            }

            self.watches.watchers_mut(p).truncate(write);
        }

        let counters = &self.shared.counters;
        counters.propagations.fetch_add(processed, Relaxed);
        counters.bcp_rounds.fetch_add(1, Relaxed);
        self.simp_db_props -= processed as i64;

        confl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::solver::Solver;
    use crate::structures::literal::Lit;

    fn lit(int: i32) -> Lit {
        Lit::from_dimacs(int).unwrap()
    }

    fn solver_with(clauses: &[&[i32]], vars: usize) -> Solver {
        let mut solver = Solver::from_config(Config::default());
        solver.ensure_vars(vars);
        for ints in clauses {
            let clause = ints.iter().map(|i| lit(*i)).collect();
            assert!(solver.add_clause(clause).unwrap());
        }
        solver
    }

    fn decide(solver: &mut Solver, l: Lit) {
        solver.new_decision_level();
        solver.enqueue(l, None);
    }

    #[test]
    fn unit_clause_enqueues() {
        // After deciding 1, (-1 ∨ 2) forces 2.
        let mut solver = solver_with(&[&[-1, 2]], 2);
        decide(&mut solver, lit(1));

        assert!(solver.propagate().is_none());
        assert_eq!(solver.trail(), &[lit(1), lit(2)]);
        assert_eq!(solver.value_of(lit(2)), Value::True);
    }

    #[test]
    fn watch_moves_to_unfalsified_literal() {
        // With 2 true, the watch of (-1 ∨ -2 ∨ 3) on 2 must move on to 3.
        let mut solver = solver_with(&[&[-1, -2, 3]], 3);
        decide(&mut solver, lit(2));
        assert!(solver.propagate().is_none());

        // The clause now watches -1 and 3, and no longer watches -2.
        let watching =
            |solver: &Solver, l: Lit| -> usize { solver.watches.watchers(!l).len() };
        assert_eq!(watching(&solver, lit(-1)), 1);
        assert_eq!(watching(&solver, lit(3)), 1);
        assert_eq!(watching(&solver, lit(-2)), 0);

        // And with 1 also true the clause forces 3.
        decide(&mut solver, lit(1));
        assert!(solver.propagate().is_none());
        assert_eq!(solver.value_of(lit(3)), Value::True);
    }

    #[test]
    fn chained_propagation() {
        let mut solver = solver_with(&[&[-1, 2], &[-2, 3]], 3);
        decide(&mut solver, lit(1));

        assert!(solver.propagate().is_none());
        assert_eq!(solver.trail(), &[lit(1), lit(2), lit(3)]);
    }

    #[test]
    fn conflict_returns_the_clause() {
        let mut solver = solver_with(&[&[-1, 2], &[-1, -2]], 2);
        decide(&mut solver, lit(1));

        let confl = solver.propagate();
        assert!(confl.is_some());
        // The queue is drained even on conflict.
        assert_eq!(solver.qhead, solver.trail().len());
    }

    #[test]
    fn blocker_avoids_clause_access() {
        // The watcher of (-1 ∨ 3 ∨ 4) on -1 carries 3 as its blocker, so once 3 is
        // true a decision on 1 keeps the clause untouched: nothing is propagated.
        let mut solver = solver_with(&[&[-1, 3, 4]], 4);
        decide(&mut solver, lit(3));
        assert!(solver.propagate().is_none());
        decide(&mut solver, lit(1));
        assert!(solver.propagate().is_none());
        assert_eq!(solver.value_of(lit(4)), Value::Undef);
    }
}
