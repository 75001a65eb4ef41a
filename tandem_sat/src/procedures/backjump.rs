/*!
Undoing decision levels.

A backjump truncates the trail to the start of the given level, unassigning each variable above the cut, saving phases per the configured mode, and returning the variables to the order heap as decision candidates.
A restart is nothing more than a backjump to level zero.
*/

use crate::config::PhaseSaving;
use crate::misc::log::targets;
use crate::solver::GenericSolver;
use crate::structures::valuation::Value;

impl<R: rand::Rng> GenericSolver<R> {
    /// Reverts the valuation to `level`, a no-op if the solver is at or below it.
    pub(crate) fn cancel_until(&mut self, level: u32) {
        if self.decision_level() <= level {
            return;
        }
        log::trace!(target: targets::BACKJUMP, "Backjump from {} to {level}.", self.decision_level());

        let keep = self.trail_lim[level as usize];
        let last_level_start = *self.trail_lim.last().expect("a decision level is open");

        for position in (keep..self.trail.len()).rev() {
            let lit = self.trail[position];
            let var = lit.var();
            self.assigns[var as usize] = Value::Undef;

            let save = match self.config.phase_saving {
                PhaseSaving::Full => true,
                PhaseSaving::Limited => position > last_level_start,
                PhaseSaving::None => false,
            };
            if save {
                self.polarity[var as usize] = lit.polarity();
            }

            self.insert_var_order(var);
        }

        self.qhead = keep;
        self.trail.truncate(keep);
        self.trail_lim.truncate(level as usize);
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::solver::Solver;
    use crate::structures::literal::Lit;
    use crate::structures::valuation::Value;

    fn lit(int: i32) -> Lit {
        Lit::from_dimacs(int).unwrap()
    }

    #[test]
    fn backjump_restores_levels_and_values() {
        let mut solver = Solver::from_config(Config::default());
        solver.ensure_vars(3);

        for l in [lit(1), lit(2), lit(3)] {
            solver.new_decision_level();
            solver.enqueue(l, None);
        }
        assert_eq!(solver.decision_level(), 3);

        solver.cancel_until(1);
        assert_eq!(solver.decision_level(), 1);
        assert_eq!(solver.trail(), &[lit(1)]);
        assert_eq!(solver.value_of(lit(1)), Value::True);
        assert_eq!(solver.value_of(lit(2)), Value::Undef);
        assert_eq!(solver.value_of(lit(3)), Value::Undef);

        // The saved phase replays the undone values on later decisions.
        assert!(solver.polarity[1]);
        assert!(solver.polarity[2]);
    }
}
