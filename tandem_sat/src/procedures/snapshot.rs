/*!
Derived quantities served at suspension points.

The live clause/variable ratio cannot be assembled from counters: it requires scanning the original clauses against the current valuation, and so only makes sense when the trail is at a propagation fixpoint.
The search loop calls [snapshot_boundary](crate::solver::GenericSolver::snapshot_boundary) immediately after each propagation; if a sampler has registered interest through the [snapshot exchange](crate::metrics::sync), the solver computes the ratio there and then, publishes it, and waits for it to be consumed before analysis or a decision can disturb the state.
*/

use crate::solver::GenericSolver;
use crate::structures::valuation::Value;

impl<R: rand::Rng> GenericSolver<R> {
    /// Serves one pending consistent-snapshot request, if any.
    /// Called only at propagation fixpoints.
    pub(crate) fn snapshot_boundary(&mut self) {
        if self.shared.sync.requested() {
            let ratio = self.live_clause_variable_ratio();
            self.shared.sync.publish(ratio);
        }
    }

    /// The ratio of live original clauses to the distinct unvalued variables they mention.
    ///
    /// A clause is live while no literal of it is true.
    /// Zero when no live clause mentions an unvalued variable.
    pub fn live_clause_variable_ratio(&mut self) -> f64 {
        let mut live_clauses: u64 = 0;
        let mut live_vars: u64 = 0;
        let mut touched: Vec<usize> = Vec::new();

        'clauses: for index in 0..self.clauses.len() {
            let cr = self.clauses[index];
            if self.arena.is_removed(cr) {
                continue 'clauses;
            }

            for offset in 0..self.arena.size(cr) {
                if self.value_of(self.arena.lit(cr, offset)) == Value::True {
                    continue 'clauses;
                }
            }

            live_clauses += 1;
            for offset in 0..self.arena.size(cr) {
                let var = self.arena.lit(cr, offset).var() as usize;
                if self.assigns[var] == Value::Undef && !self.snapshot_seen[var] {
                    self.snapshot_seen[var] = true;
                    touched.push(var);
                    live_vars += 1;
                }
            }
        }

        for var in touched {
            self.snapshot_seen[var] = false;
        }

        if live_vars == 0 {
            0.0
        } else {
            live_clauses as f64 / live_vars as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::solver::Solver;
    use crate::structures::literal::Lit;

    fn lit(int: i32) -> Lit {
        Lit::from_dimacs(int).unwrap()
    }

    #[test]
    fn ratio_over_live_clauses() {
        let mut solver = Solver::from_config(Config::default());
        solver.ensure_vars(4);
        solver.add_clause(vec![lit(1), lit(2)]).unwrap();
        solver.add_clause(vec![lit(3), lit(4)]).unwrap();

        // Two live clauses over four unvalued variables.
        assert_eq!(solver.live_clause_variable_ratio(), 0.5);

        // Satisfying one clause removes it, and its variables, from the count:
        // one live clause (3 ∨ 4) over the two unvalued variables it mentions.
        solver.new_decision_level();
        solver.enqueue(lit(1), None);
        assert!(solver.propagate().is_none());
        assert_eq!(solver.live_clause_variable_ratio(), 0.5);
    }

    #[test]
    fn ratio_with_nothing_live() {
        let mut solver = Solver::from_config(Config::default());
        solver.ensure_vars(1);
        assert_eq!(solver.live_clause_variable_ratio(), 0.0);
    }
}
