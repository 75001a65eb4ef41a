/*!
The solver --- to which formulas are added and within which solves take place.

Strictly, a [GenericSolver] and a [Solver]: the generic solver is parameterised by its source of randomness, and the plain solver fixes this to [Pcg32] so that building one requires nothing beyond a [Config].

A solver owns every store a solve touches:
- The [clause arena](crate::db::arena) together with the handle lists of original and learnt clauses.
- The [watch index](crate::db::watch).
- The assignment trail, with per-variable value, level, and reason.
- The [activity-ordered heap](crate::generic::index_heap) of candidate decision variables.

The algorithm over these stores is implemented across the [procedures](crate::procedures) module.
Construction of the formula is implemented in [builder](crate::builder).

A solver is exclusively owned by one thread.
The only state visible elsewhere is the [SolverShared] bundle of counters, interrupt flag, and snapshot exchange, behind an [Arc].
*/

mod counters;
pub use counters::Counters;
mod stat_log;
pub use stat_log::StatLog;

use std::sync::atomic::Ordering::Relaxed;
use std::sync::Arc;

use rand::SeedableRng;

use crate::config::Config;
use crate::db::arena::{ClauseArena, ClauseRef};
use crate::db::watch::WatchIndex;
use crate::generic::index_heap::IndexHeap;
use crate::generic::pcg::Pcg32;
use crate::metrics::SolverShared;
use crate::structures::literal::{Lit, Var};
use crate::structures::valuation::Value;

/// The decision level and reason under which a variable was assigned.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct VarData {
    pub reason: Option<ClauseRef>,
    pub level: u32,
}

/// Marks used by conflict analysis; the extended states belong to recursive minimisation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Seen {
    #[default]
    Undef,
    Source,
    Removable,
    Failed,
}

/// A conflict-driven clause-learning solver, generic over its source of randomness.
pub struct GenericSolver<R: rand::Rng> {
    /// The configuration of the solver.
    pub config: Config,

    /// False once the formula is known to be unsatisfiable without assumptions.
    pub(crate) ok: bool,

    pub(crate) arena: ClauseArena,
    pub(crate) clauses: Vec<ClauseRef>,
    pub(crate) learnts: Vec<ClauseRef>,
    pub(crate) watches: WatchIndex,

    pub(crate) assigns: Vec<Value>,
    pub(crate) vardata: Vec<VarData>,
    pub(crate) polarity: Vec<bool>,
    pub(crate) user_pol: Vec<Option<bool>>,
    pub(crate) decision: Vec<bool>,
    pub(crate) dec_vars: usize,
    pub(crate) seen: Vec<Seen>,

    pub(crate) order_heap: IndexHeap<f64>,

    pub(crate) trail: Vec<Lit>,
    pub(crate) trail_lim: Vec<usize>,
    pub(crate) qhead: usize,

    pub(crate) var_inc: f64,
    pub(crate) cla_inc: f64,

    pub(crate) max_learnts: f64,
    pub(crate) learntsize_adjust_confl: f64,
    pub(crate) learntsize_adjust_cnt: i64,

    /// Assignment count at the last successful simplify, or -1 before any.
    pub(crate) simp_db_assigns: i64,
    /// Remaining propagation allowance before simplify does real work again.
    pub(crate) simp_db_props: i64,

    pub(crate) progress_estimate: f64,

    pub(crate) assumptions: Vec<Lit>,
    pub(crate) conflict: Vec<Lit>,
    pub(crate) model: Vec<Value>,

    pub(crate) analyze_toclear: Vec<Lit>,
    pub(crate) snapshot_seen: Vec<bool>,

    /// Remaining conflict allowance, negative for unlimited.
    pub(crate) conflict_budget: i64,
    /// Remaining propagation allowance, negative for unlimited.
    pub(crate) propagation_budget: i64,
    /// The instant the configured time limit runs out, during a solve.
    pub(crate) deadline: Option<std::time::Instant>,
    /// Set when the arena refuses an allocation; the solve winds down with an unknown report.
    pub(crate) out_of_memory: bool,

    pub(crate) shared: Arc<SolverShared>,
    pub(crate) rng: R,

    pub(crate) stat_log: Option<StatLog>,
}

/// A solver with the default source of randomness.
pub type Solver = GenericSolver<Pcg32>;

impl Solver {
    /// A solver from a configuration, sharing nothing.
    pub fn from_config(config: Config) -> Self {
        Self::with_shared(config, SolverShared::new())
    }

    /// A solver from a configuration, with the given shared bundle for the sampler's use.
    pub fn with_shared(config: Config, shared: Arc<SolverShared>) -> Self {
        let rng = Pcg32::seeded(config.random_seed);
        GenericSolver::with_rng(config, shared, rng)
    }
}

impl<R: rand::Rng> GenericSolver<R> {
    /// A solver over an explicit source of randomness.
    pub fn with_rng(config: Config, shared: Arc<SolverShared>, rng: R) -> Self {
        let mut arena = ClauseArena::default();
        if config.memory_limit_mb != 0 {
            arena.set_limit((config.memory_limit_mb as usize * 1024 * 1024) / 4);
        }

        GenericSolver {
            ok: true,
            arena,
            clauses: Vec::default(),
            learnts: Vec::default(),
            watches: WatchIndex::default(),
            assigns: Vec::default(),
            vardata: Vec::default(),
            polarity: Vec::default(),
            user_pol: Vec::default(),
            decision: Vec::default(),
            dec_vars: 0,
            seen: Vec::default(),
            order_heap: IndexHeap::default(),
            trail: Vec::default(),
            trail_lim: Vec::default(),
            qhead: 0,
            var_inc: 1.0,
            cla_inc: 1.0,
            max_learnts: 0.0,
            learntsize_adjust_confl: 0.0,
            learntsize_adjust_cnt: 0,
            simp_db_assigns: -1,
            simp_db_props: 0,
            progress_estimate: 0.0,
            assumptions: Vec::default(),
            conflict: Vec::default(),
            model: Vec::default(),
            analyze_toclear: Vec::default(),
            snapshot_seen: Vec::default(),
            conflict_budget: -1,
            propagation_budget: -1,
            deadline: None,
            out_of_memory: false,
            shared,
            rng,
            stat_log: None,
            config,
        }
    }

    /// Attaches a statistics log, written to when `verbosity` is at least one.
    pub fn set_stat_log(&mut self, log: StatLog) {
        self.stat_log = Some(log);
    }

    /// The shared bundle of counters, interrupt flag, and snapshot exchange.
    pub fn shared(&self) -> &Arc<SolverShared> {
        &self.shared
    }

    /// A count of variables.
    pub fn var_count(&self) -> usize {
        self.assigns.len()
    }

    /// A count of assigned variables.
    pub fn assigned_count(&self) -> usize {
        self.trail.len()
    }

    /// A count of attached original clauses.
    pub fn clause_count(&self) -> usize {
        self.shared.counters.num_clauses.load(Relaxed) as usize
    }

    /// A count of attached learnt clauses.
    pub fn learnt_count(&self) -> usize {
        self.shared.counters.num_learnts.load(Relaxed) as usize
    }

    /// False once the formula is known to be unsatisfiable regardless of assumptions.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// The current decision level.
    #[inline(always)]
    pub fn decision_level(&self) -> u32 {
        self.trail_lim.len() as u32
    }

    /// The value of a variable on the current valuation.
    #[inline(always)]
    pub fn value_of_var(&self, var: Var) -> Value {
        self.assigns[var as usize]
    }

    /// The value of a literal on the current valuation.
    #[inline(always)]
    pub fn value_of(&self, lit: Lit) -> Value {
        self.assigns[lit.var() as usize].under(lit)
    }

    /// The decision level at which a variable was assigned.
    #[inline(always)]
    pub(crate) fn level(&self, var: Var) -> u32 {
        self.vardata[var as usize].level
    }

    /// The clause which forced the assignment of a variable, if any.
    #[inline(always)]
    pub(crate) fn reason(&self, var: Var) -> Option<ClauseRef> {
        self.vardata[var as usize].reason
    }

    /// True exactly when the clause is the reason of the current assignment of its first literal.
    pub(crate) fn locked(&self, cr: ClauseRef) -> bool {
        let first = self.arena.lit(cr, 0);
        self.value_of(first) == Value::True && self.reason(first.var()) == Some(cr)
    }

    /// The assignment trail, in assignment order.
    pub fn trail(&self) -> &[Lit] {
        &self.trail
    }

    /// The model found by the most recent satisfiable solve.
    pub fn model(&self) -> &[Value] {
        &self.model
    }

    /// The subset of assumptions responsible for the most recent assumption-unsatisfiable solve.
    pub fn conflict_set(&self) -> &[Lit] {
        &self.conflict
    }

    /// Opens a fresh decision level.
    pub(crate) fn new_decision_level(&mut self) {
        self.trail_lim.push(self.trail.len());
    }

    /// Places an unassigned literal on the trail at the current level.
    pub(crate) fn enqueue(&mut self, lit: Lit, reason: Option<ClauseRef>) {
        debug_assert_eq!(self.value_of(lit), Value::Undef);
        self.assigns[lit.var() as usize] = Value::satisfying(lit);
        self.vardata[lit.var() as usize] = VarData {
            reason,
            level: self.decision_level(),
        };
        self.trail.push(lit);
    }

    /// Asks the solver to return from the nearest search iteration.
    /// Callable from any thread holding the shared bundle; this method is a convenience.
    pub fn interrupt(&self) {
        self.shared.interrupt.store(true, Relaxed);
    }

    /// Clears a pending interrupt.
    pub fn clear_interrupt(&self) {
        self.shared.interrupt.store(false, Relaxed);
    }

    /// Limits the solve to `n` further conflicts.
    pub fn set_conf_budget(&mut self, n: u64) {
        self.conflict_budget = (self.shared.counters.conflicts.load(Relaxed) + n) as i64;
    }

    /// Limits the solve to `n` further propagations.
    pub fn set_prop_budget(&mut self, n: u64) {
        self.propagation_budget = (self.shared.counters.propagations.load(Relaxed) + n) as i64;
    }

    /// Removes any conflict or propagation budget.
    pub fn budget_off(&mut self) {
        self.conflict_budget = -1;
        self.propagation_budget = -1;
    }

    /// True while no budget is exhausted, the time limit has not run out, and no interrupt is pending.
    pub(crate) fn within_budget(&self) -> bool {
        !self.shared.interrupt.load(Relaxed)
            && (self.conflict_budget < 0
                || self.shared.counters.conflicts.load(Relaxed) < self.conflict_budget as u64)
            && (self.propagation_budget < 0
                || self.shared.counters.propagations.load(Relaxed)
                    < self.propagation_budget as u64)
            && self
                .deadline
                .map_or(true, |deadline| std::time::Instant::now() < deadline)
    }
}

impl<R: rand::Rng> GenericSolver<R> {
    /// A solver seeded from the configuration, for any seedable source of randomness.
    pub fn from_config_seeded(config: Config) -> Self
    where
        R: SeedableRng<Seed = [u8; 8]>,
    {
        let rng = R::from_seed(config.random_seed.to_le_bytes());
        Self::with_rng(config, SolverShared::new(), rng)
    }
}
