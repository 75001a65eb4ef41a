/*!
Counts for various things which count.

Every counter is a plain atomic written by the owning solver with relaxed stores, so the sampler may read any of them at any time as an aligned word load.
A stale value is acceptable: each counter is monotone over a solve, or monotone between restarts.
*/

use std::sync::atomic::{AtomicBool, AtomicU64};

/// Monotonic counters of a single solver, shared with the sampler.
#[derive(Debug, Default)]
pub struct Counters {
    /// A count of calls to solve.
    pub solves: AtomicU64,

    /// A count of restart windows opened.
    pub restarts: AtomicU64,

    /// A count of all decisions made.
    pub decisions: AtomicU64,

    /// A count of decisions where the variable was chosen at random.
    pub rnd_decisions: AtomicU64,

    /// A count of trail entries processed by propagation.
    pub propagations: AtomicU64,

    /// A count of completed propagation rounds, i.e. of reached fixpoints.
    pub bcp_rounds: AtomicU64,

    /// A count of every conflict seen during a solve.
    pub conflicts: AtomicU64,

    /// A count of garbage collections of the clause arena.
    pub gc_events: AtomicU64,

    /// Attached original clauses.
    pub num_clauses: AtomicU64,

    /// Attached learnt clauses.
    pub num_learnts: AtomicU64,

    /// Literals over attached original clauses.
    pub clauses_literals: AtomicU64,

    /// Literals over attached learnt clauses.
    pub learnts_literals: AtomicU64,

    /// Literals in learnt clauses as analysed, before minimisation.
    pub max_literals: AtomicU64,

    /// Literals in learnt clauses after minimisation.
    pub tot_literals: AtomicU64,

    /// Set once the owning thread has a report in hand.
    pub solved: AtomicBool,
}
