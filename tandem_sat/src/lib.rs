//! A library for determining the satisfiability of boolean formulas in conjunctive normal form, with support for running several solvers side by side and sampling their runtime behaviour.
//!
//! tandem_sat couples a conflict-driven clause-learning solver with a harness which spawns one solver per formula, samples an agreed set of counters from each running solver on a logical clock, and records derived quantities which require a consistent view of a solver's internal state.
//!
//! # Orientation
//!
//! The library is designed around the core structure of a [solver](crate::solver).
//!
//! Internally, and at a high level, a solve is viewed in terms of a handful of stores:
//! - A formula is kept in a [clause arena](crate::db::arena), addressed by plain integer handles.
//! - Which clauses care about which literals is kept in a [watch index](crate::db::watch).
//! - The current (partial) valuation is kept on a trail of assignments, stratified by decision level.
//! - Unvalued variables are ranked by activity on an [index heap](crate::generic::index_heap).
//!
//! The algorithm itself is factored into a collection of [procedures] implemented on the solver: propagation, conflict analysis, backjumping, decision, database reduction, garbage collection, and the search loop which ties these together.
//!
//! Several solvers may run at once, and while they do a [sampler](crate::metrics) periodically reads counters from each.
//! Counters are plain atomics and may be read at any time.
//! Quantities derived by scanning a solver's clauses against its valuation are only read at a propagation fixpoint, through the [snapshot protocol](crate::metrics::sync).
//!
//! The [harness] boots the whole arrangement from a JSON configuration document.
//!
//! # Example
//!
//! ```rust
//! # use tandem_sat::solver::Solver;
//! # use tandem_sat::config::Config;
//! # use tandem_sat::reports::Report;
//! # use tandem_sat::structures::literal::Lit;
//! let mut solver = Solver::from_config(Config::default());
//!
//! let p = solver.new_var(None, true);
//! let q = solver.new_var(None, true);
//!
//! solver.add_clause(vec![Lit::positive(p), Lit::positive(q)]).unwrap();
//! solver.add_clause(vec![Lit::negative(p)]).unwrap();
//!
//! assert_eq!(solver.solve(), Report::Satisfiable);
//! ```
//!
//! # Logs
//!
//! Calls to [log!](log) are made throughout the library against the targets listed in [misc::log].
//! No log implementation is provided by the library; the bundled binary uses [env_logger](https://docs.rs/env_logger/latest/env_logger/).

#![allow(clippy::single_match)]
#![allow(clippy::collapsible_else_if)]

pub mod builder;
pub mod config;
pub mod db;
pub mod generic;
pub mod harness;
pub mod metrics;
pub mod misc;
pub mod procedures;
pub mod reports;
pub mod solver;
pub mod structures;
pub mod types;
