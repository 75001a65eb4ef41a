/*!
The search loop, restart schedule, and the outer solve.

# The loop

Each iteration propagates, then serves any pending consistent snapshot, and then:

- **On conflict** at level zero the formula is unsatisfiable.
  Otherwise the conflict is analysed, the solver backjumps, and the learnt clause is attached with its asserting literal enqueued.
  Activities decay, and now and then the learnt limit inflates.
- **Without a conflict**, an exhausted restart window or budget ends the window;
  at level zero the database may be simplified; an oversized learnt store is reduced;
  pending assumptions are asserted as decisions, a false assumption ending the solve;
  and otherwise a branching literal is decided --- or, with none left, the valuation is total and satisfying.

# The outer solve

Windows grow by the luby sequence or geometrically, per configuration.
The solve ends on an answer, an exhausted budget, an interrupt, or the arena refusing memory (reported as unknown, with the solver still usable).
*/

use std::sync::atomic::Ordering::Relaxed;
use std::time::Instant;

use crate::generic::luby::luby;
use crate::misc::log::targets;
use crate::reports::Report;
use crate::solver::GenericSolver;
use crate::structures::literal::Lit;
use crate::structures::valuation::Value;

impl<R: rand::Rng> GenericSolver<R> {
    /// Searches for a model within `nof_conflicts` conflicts, negative for no bound.
    fn search(&mut self, nof_conflicts: i64) -> Report {
        debug_assert!(self.ok);
        let mut window_conflicts: i64 = 0;
        let mut learnt_clause: Vec<Lit> = Vec::new();

        loop {
            let confl = self.propagate();
            self.snapshot_boundary();

            match confl {
                Some(confl) => {
                    self.shared.counters.conflicts.fetch_add(1, Relaxed);
                    window_conflicts += 1;

                    if self.decision_level() == 0 {
                        return Report::Unsatisfiable;
                    }

                    let backjump_level = self.analyze(confl, &mut learnt_clause);
                    self.cancel_until(backjump_level);

                    if learnt_clause.len() == 1 {
                        self.enqueue(learnt_clause[0], None);
                    } else {
                        match self.arena.alloc(&learnt_clause, true) {
                            Err(_) => {
                                log::warn!(target: targets::SEARCH, "Clause memory exhausted, giving up the solve.");
                                self.out_of_memory = true;
                                self.progress_estimate = self.progress_estimate();
                                self.cancel_until(0);
                                return Report::Unknown;
                            }
                            Ok(cr) => {
                                self.learnts.push(cr);
                                self.attach_clause(cr);
                                self.bump_clause_activity(cr);
                                self.enqueue(learnt_clause[0], Some(cr));
                            }
                        }
                    }

                    self.decay_var_activity();
                    self.decay_clause_activity();

                    self.learntsize_adjust_cnt -= 1;
                    if self.learntsize_adjust_cnt == 0 {
                        self.learntsize_adjust_confl *= self.config.learntsize_adjust_inc;
                        self.learntsize_adjust_cnt = self.learntsize_adjust_confl as i64;
                        self.max_learnts *= self.config.learntsize_inc;

                        if self.config.verbosity >= 1 {
                            self.stat_row();
                        }
                    }
                }

                None => {
                    if (nof_conflicts >= 0 && window_conflicts >= nof_conflicts)
                        || !self.within_budget()
                    {
                        // Give up this window and restart.
                        self.progress_estimate = self.progress_estimate();
                        self.cancel_until(0);
                        return Report::Unknown;
                    }

                    // Simplify the set of problem clauses.
                    if self.decision_level() == 0 && !self.simplify() {
                        return Report::Unsatisfiable;
                    }

                    if self.learnts.len() as f64 - self.assigned_count() as f64
                        >= self.max_learnts
                    {
                        self.reduce_db();
                    }

                    // Assert assumptions before any free decision.
                    let mut next = None;
                    while (self.decision_level() as usize) < self.assumptions.len() {
                        let p = self.assumptions[self.decision_level() as usize];
                        match self.value_of(p) {
                            Value::True => self.new_decision_level(),
                            Value::False => {
                                self.analyze_final(!p);
                                return Report::Unsatisfiable;
                            }
                            Value::Undef => {
                                next = Some(p);
                                break;
                            }
                        }
                    }

                    let next = match next {
                        Some(assumption) => assumption,
                        None => {
                            self.shared.counters.decisions.fetch_add(1, Relaxed);
                            match self.pick_branch_lit() {
                                None => return Report::Satisfiable,
                                Some(decision) => decision,
                            }
                        }
                    };

                    log::trace!(target: targets::SEARCH, "Deciding {next} at level {}.", self.decision_level() + 1);
                    self.new_decision_level();
                    self.enqueue(next, None);
                }
            }
        }
    }

    /// Determines the satisfiability of the formula under the given assumptions,
    /// within any configured budgets.
    pub fn solve_limited(&mut self, assumptions: &[Lit]) -> Report {
        self.assumptions.clear();
        self.assumptions.extend_from_slice(assumptions);
        self.solve_internal()
    }

    /// Determines the satisfiability of the formula, with budgets cleared.
    pub fn solve(&mut self) -> Report {
        self.budget_off();
        self.assumptions.clear();
        self.solve_internal()
    }

    fn solve_internal(&mut self) -> Report {
        self.model.clear();
        self.conflict.clear();
        if !self.ok {
            return Report::Unsatisfiable;
        }

        self.shared.counters.solves.fetch_add(1, Relaxed);
        self.deadline = self.config.time_limit.map(|limit| Instant::now() + limit);
        self.out_of_memory = false;

        self.max_learnts = (self.clause_count() as f64 * self.config.learntsize_factor)
            .max(self.config.min_learnts_lim as f64);
        self.learntsize_adjust_confl = self.config.learntsize_adjust_start;
        self.learntsize_adjust_cnt = self.learntsize_adjust_confl as i64;

        if self.config.verbosity >= 1 {
            if let Some(log) = self.stat_log.as_mut() {
                log.header();
            }
        }

        let mut status = Report::Unknown;
        let mut window: u64 = 0;
        while status == Report::Unknown {
            let rest_base = match self.config.luby_restart {
                true => luby(self.config.restart_inc, window),
                false => self.config.restart_inc.powi(window as i32),
            };
            status = self.search((rest_base * self.config.restart_first as f64) as i64);

            if !self.within_budget() || self.out_of_memory {
                break;
            }
            window += 1;
            self.shared.counters.restarts.fetch_add(1, Relaxed);
        }

        if self.config.verbosity >= 1 {
            if let Some(log) = self.stat_log.as_mut() {
                log.footer();
            }
        }

        match status {
            Report::Satisfiable => {
                self.model = self.assigns.clone();
            }
            Report::Unsatisfiable if self.conflict.is_empty() => {
                self.ok = false;
            }
            _ => {}
        }

        self.cancel_until(0);
        log::info!(target: targets::SEARCH, "Solve ended: {status}.");
        status
    }

    /// An estimate of progress through the search space, by assignment density per level.
    pub(crate) fn progress_estimate(&self) -> f64 {
        if self.var_count() == 0 {
            return 0.0;
        }

        let mut progress = 0.0;
        let factor = 1.0 / self.var_count() as f64;

        for level in 0..=self.decision_level() as usize {
            let begin = if level == 0 { 0 } else { self.trail_lim[level - 1] };
            let end = if level == self.decision_level() as usize {
                self.trail.len()
            } else {
                self.trail_lim[level]
            };
            progress += factor.powi(level as i32) * (end - begin) as f64;
        }

        progress / self.var_count() as f64
    }

    /// One row of the search-statistics table.
    fn stat_row(&mut self) {
        let counters = &self.shared.counters;
        let conflicts = counters.conflicts.load(Relaxed);
        let assigned_at_zero = match self.trail_lim.first() {
            None => self.trail.len(),
            Some(&limit) => limit,
        };
        let free_vars = self.dec_vars.saturating_sub(assigned_at_zero);
        let clauses = counters.num_clauses.load(Relaxed) as usize;
        let clause_literals = counters.clauses_literals.load(Relaxed);
        let max_learnts = self.max_learnts as u64;
        let learnts = counters.num_learnts.load(Relaxed) as usize;
        let literals_per_learnt = match learnts {
            0 => 0.0,
            _ => counters.learnts_literals.load(Relaxed) as f64 / learnts as f64,
        };
        let progress = self.progress_estimate();

        if let Some(log) = self.stat_log.as_mut() {
            log.row(
                conflicts,
                free_vars,
                clauses,
                clause_literals,
                max_learnts,
                learnts,
                literals_per_learnt,
                progress,
            );
        }
    }
}
