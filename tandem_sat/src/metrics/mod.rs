/*!
Per-solver counter sampling and cross-solver coordination.

# Two classes of metric

- **Cheap metrics** are read straight from a solver's [Counters](crate::solver::Counters) without coordination: each is a relaxed atomic load of a value which is monotone, or monotone between restarts, so a marginally stale read is harmless.
  One value per enabled metric is recorded per sample tick, where a tick is a logical clock incremented by the sampler, not wall time.
- **Consistent-snapshot metrics** require the solver to sit at a propagation fixpoint while the value is derived, and so pass through the [snapshot protocol](sync).
  A solver only serves a snapshot when the protocol allows, so these series advance on their own clock: a parallel *threaded* tick stream is kept, one entry per snapshot, and the two clocks may disagree in length.

# Shape

The [harness](crate::harness) allocates one [SolverShared] per solver, hands a clone to the solver and keeps one for the [sampler](sampler).
Recorded series live in a [SolverSeries] per solver, locked independently, written by the sampler thread (cheap metrics) and by the snapshot workers (consistent metrics).
*/

pub mod sampler;
pub mod sync;

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering::Relaxed};
use std::sync::Arc;

use serde::Serialize;

use crate::solver::Counters;
use sync::SnapshotSync;

/// A metric which is a plain read of one or two counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Metric {
    Decisions,
    UnitProps,
    Conflicts,
    ClauseDbSize,
    GcEvents,
    LearntClauses,
    Restarts,
}

/// Every cheap metric, in presentation order.
pub const CHEAP_METRICS: [Metric; 7] = [
    Metric::Decisions,
    Metric::UnitProps,
    Metric::Conflicts,
    Metric::ClauseDbSize,
    Metric::GcEvents,
    Metric::LearntClauses,
    Metric::Restarts,
];

/// Metric names recognised in a configuration but not (yet) computed.
pub const RESERVED_METRICS: [&str; 4] = [
    "avg_lbd",
    "backjumpDistance",
    "conflictDecisionLevel",
    "avgTopKActivity",
];

/// The configuration name of the consistent-snapshot ratio metric.
pub const CLAUSE_VARIABLE_RATIO: &str = "clause_variable_ratio";

impl Metric {
    /// The name of the metric as it appears in a configuration document.
    pub fn name(self) -> &'static str {
        match self {
            Metric::Decisions => "nDecisions",
            Metric::UnitProps => "nUnitProps",
            Metric::Conflicts => "nConflicts",
            Metric::ClauseDbSize => "clauseDatabaseSize",
            Metric::GcEvents => "gcEvents",
            Metric::LearntClauses => "learnt_clause_count",
            Metric::Restarts => "restartEvents",
        }
    }

    /// The current value of the metric, as a relaxed read of the counters.
    pub fn read(self, counters: &Counters) -> f64 {
        match self {
            Metric::Decisions => counters.decisions.load(Relaxed) as f64,
            Metric::UnitProps => counters.propagations.load(Relaxed) as f64,
            Metric::Conflicts => counters.conflicts.load(Relaxed) as f64,
            Metric::ClauseDbSize => {
                (counters.num_clauses.load(Relaxed) + counters.num_learnts.load(Relaxed)) as f64
            }
            Metric::GcEvents => counters.gc_events.load(Relaxed) as f64,
            Metric::LearntClauses => counters.num_learnts.load(Relaxed) as f64,
            Metric::Restarts => counters.restarts.load(Relaxed) as f64,
        }
    }
}

/// Which metrics a run records.
#[derive(Clone, Debug, Default)]
pub struct MetricSet {
    cheap: Vec<Metric>,
    ratio: bool,
}

impl MetricSet {
    /// Builds the set from the `metrics` mapping of a configuration document.
    ///
    /// Reserved names are accepted and ignored; unrecognised names are logged and ignored.
    pub fn from_flags(flags: &BTreeMap<String, bool>) -> Self {
        let mut set = MetricSet::default();

        for (name, enabled) in flags {
            if !enabled {
                continue;
            }
            if let Some(metric) = CHEAP_METRICS.iter().find(|m| m.name() == name) {
                set.cheap.push(*metric);
            } else if name == CLAUSE_VARIABLE_RATIO {
                set.ratio = true;
            } else if RESERVED_METRICS.contains(&name.as_str()) {
                log::info!(target: crate::misc::log::targets::SAMPLER, "Metric {name} is reserved, no series will be recorded.");
            } else {
                log::warn!(target: crate::misc::log::targets::SAMPLER, "Unrecognised metric {name} ignored.");
            }
        }

        set.cheap.sort_by_key(|m| CHEAP_METRICS.iter().position(|c| c == m));
        set
    }

    /// The enabled cheap metrics, in presentation order.
    pub fn cheap(&self) -> &[Metric] {
        &self.cheap
    }

    /// True exactly when the clause/variable ratio series is enabled.
    pub fn ratio(&self) -> bool {
        self.ratio
    }

    /// A count of enabled series.
    pub fn active_count(&self) -> usize {
        self.cheap.len() + self.ratio as usize
    }
}

/// State shared between one solver, the sampler, and the snapshot workers.
#[derive(Debug, Default)]
pub struct SolverShared {
    /// The solver's monotonic counters.
    pub counters: Counters,

    /// The consistent-snapshot exchange.
    pub sync: SnapshotSync,

    /// Asks the solver to return from the nearest search iteration.
    pub interrupt: AtomicBool,
}

impl SolverShared {
    pub fn new() -> Arc<Self> {
        Arc::new(SolverShared::default())
    }
}

/// The recorded time series of a single solver.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SolverSeries {
    /// The formula the solver is working on, for presentation.
    pub name: String,

    /// The logical clock of the cheap series.
    pub ticks: Vec<u64>,

    /// One series per enabled cheap metric, keyed by configuration name, all `ticks.len()` long.
    pub series: BTreeMap<String, Vec<f64>>,

    /// The logical clock of the consistent-snapshot series.
    pub threaded_ticks: Vec<u64>,

    /// The live clause/variable ratio series, `threaded_ticks.len()` long.
    pub clause_variable_ratio: Vec<f64>,
}

impl SolverSeries {
    /// An empty series set for a solver over the formula at `name`.
    pub fn new(name: String, metrics: &MetricSet) -> Self {
        let mut series = BTreeMap::new();
        for metric in metrics.cheap() {
            series.insert(metric.name().to_owned(), Vec::new());
        }
        SolverSeries {
            name,
            series,
            ..SolverSeries::default()
        }
    }

    /// Appends one cheap sample per enabled metric, under a fresh tick.
    pub fn record_tick(&mut self, counters: &Counters, metrics: &MetricSet) {
        let tick = self.ticks.last().map_or(1, |t| t + 1);
        self.ticks.push(tick);
        for metric in metrics.cheap() {
            let value = metric.read(counters);
            self.series
                .get_mut(metric.name())
                .expect("series initialised from the same metric set")
                .push(value);
        }
    }

    /// Appends a consistent-snapshot sample under a fresh threaded tick.
    pub fn record_ratio(&mut self, value: f64) {
        let tick = self.threaded_ticks.last().map_or(1, |t| t + 1);
        self.threaded_ticks.push(tick);
        self.clause_variable_ratio.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(pairs: &[(&str, bool)]) -> BTreeMap<String, bool> {
        pairs.iter().map(|(n, b)| (n.to_string(), *b)).collect()
    }

    #[test]
    fn metric_set_from_flags() {
        let set = MetricSet::from_flags(&flags(&[
            ("nDecisions", true),
            ("nConflicts", false),
            ("clause_variable_ratio", true),
            ("avg_lbd", true),
            ("made_up_metric", true),
        ]));

        assert_eq!(set.cheap(), &[Metric::Decisions]);
        assert!(set.ratio());
        assert_eq!(set.active_count(), 2);
    }

    #[test]
    fn ticks_and_series_stay_parallel() {
        let set = MetricSet::from_flags(&flags(&[("nDecisions", true), ("gcEvents", true)]));
        let counters = Counters::default();
        let mut series = SolverSeries::new("test.cnf".to_owned(), &set);

        for _ in 0..3 {
            series.record_tick(&counters, &set);
        }
        series.record_ratio(0.5);

        assert_eq!(series.ticks, vec![1, 2, 3]);
        assert_eq!(series.series["nDecisions"].len(), 3);
        assert_eq!(series.series["gcEvents"].len(), 3);
        assert_eq!(series.threaded_ticks, vec![1]);
        assert_eq!(series.clause_variable_ratio, vec![0.5]);
    }
}
