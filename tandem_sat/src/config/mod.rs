/*!
Configuration of a solver.

All configuration for a solver is fixed when the solver is built.
Defaults are collected in [defaults], and are (roughly) the classical choices: the solver restarts on a luby schedule, minimises learnt clauses recursively, and saves phases across restarts.
*/

pub mod defaults;

use std::time::Duration;

/// How far conflict clause minimisation goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CcMin {
    /// No minimisation.
    None,

    /// Drop a literal whose reason holds only level-zero or already-present literals.
    Basic,

    /// Drop a literal whose reasons are redundant, recursively.
    Deep,
}

/// How much of the valuation survives a backjump as saved phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseSaving {
    /// No phases are saved.
    None,

    /// Only phases from the level being undone.
    Limited,

    /// Every phase undone by the backjump.
    Full,
}

/// The primary configuration structure.
#[derive(Clone, Debug)]
pub struct Config {
    /// The variable activity decay factor.
    pub var_decay: f64,

    /// The clause activity decay factor.
    pub clause_decay: f64,

    /// The frequency with which the decision heuristic tries to choose a random variable.
    pub random_var_freq: f64,

    /// Seed for the solver's source of randomness.
    pub random_seed: u64,

    /// Conflict clause minimisation mode.
    pub ccmin_mode: CcMin,

    /// Phase saving mode.
    pub phase_saving: PhaseSaving,

    /// Choose polarity at random when deciding.
    pub rnd_pol: bool,

    /// Randomise the initial activity of fresh variables.
    pub rnd_init_act: bool,

    /// The fraction of wasted arena words allowed before a collection is triggered.
    pub garbage_frac: f64,

    /// Minimum learnt clause limit.
    pub min_learnts_lim: u32,

    /// The base restart interval, in conflicts.
    pub restart_first: u32,

    /// Restart interval increase factor.
    pub restart_inc: f64,

    /// Use the luby restart sequence rather than a geometric schedule.
    pub luby_restart: bool,

    /// The initial learnt limit, as a fraction of the original clause count.
    pub learntsize_factor: f64,

    /// Growth factor of the learnt limit.
    pub learntsize_inc: f64,

    /// Conflicts before the first learnt limit adjustment.
    pub learntsize_adjust_start: f64,

    /// Growth factor of the adjustment interval.
    pub learntsize_adjust_inc: f64,

    /// Remove original clauses satisfied at the top level during simplification.
    pub remove_satisfied: bool,

    /// Verbosity level; at one or above a solver writes a search statistics table to its log.
    pub verbosity: u32,

    /// A limit on the time spent in a solve, if any.
    pub time_limit: Option<Duration>,

    /// A limit on clause memory in megabytes, zero for unlimited.
    pub memory_limit_mb: u64,
}

impl Default for Config {
    fn default() -> Self {
        use defaults::*;

        Config {
            var_decay: VAR_DECAY,
            clause_decay: CLAUSE_DECAY,
            random_var_freq: RANDOM_VAR_FREQ,
            random_seed: RANDOM_SEED,
            ccmin_mode: CCMIN_MODE,
            phase_saving: PHASE_SAVING,
            rnd_pol: false,
            rnd_init_act: false,
            garbage_frac: GARBAGE_FRAC,
            min_learnts_lim: MIN_LEARNTS_LIM,
            restart_first: RESTART_FIRST,
            restart_inc: RESTART_INC,
            luby_restart: LUBY_RESTART,
            learntsize_factor: LEARNTSIZE_FACTOR,
            learntsize_inc: LEARNTSIZE_INC,
            learntsize_adjust_start: LEARNTSIZE_ADJUST_START,
            learntsize_adjust_inc: LEARNTSIZE_ADJUST_INC,
            remove_satisfied: true,
            verbosity: 0,
            time_limit: None,
            memory_limit_mb: 0,
        }
    }
}
