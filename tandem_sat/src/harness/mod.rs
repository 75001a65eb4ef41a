/*!
The harness: one solver per formula, a sampler, and an orderly shutdown.

# Overview

[Harness::build] prepares the arrangement described by a [HarnessConfig]:
the output directories are created, every log and result file is opened, and every formula is read, before any thread starts --- an unopenable file or unreadable formula is fatal.

[Harness::run] then boots it:

1. Each formula gets its solver on a worker thread.
   A solver simplifies, solves within its configured limits, writes its result file, marks itself solved, and closes its snapshot exchange.
2. The sampler thread reads counters from every unsolved solver per tick, and snapshot workers collect the ratio series through the suspension-point protocol.
3. When every worker has returned the stop flag is raised, the sampler writes the final frame to the graph file, and the recorded series are handed back.

# Interruption

Signal handling itself lives outside the library.
A handler (or anything else) holding a [StopHandle] --- taken from the harness before the run --- flips plain atomic flags and touches nothing else: the global stop flag for the sampler, and every solver's interrupt flag.
Each solver then finishes its current propagation and returns an unknown report from the nearest search iteration, and shutdown proceeds as normal, on the worker and sampler threads.
*/

pub mod config;
pub mod files;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering::Relaxed};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::metrics::sampler::sampler_loop;
use crate::metrics::{MetricSet, SolverSeries, SolverShared};
use crate::misc::log::targets;
use crate::reports::Report;
use crate::solver::{Solver, StatLog};
use crate::types::err::ErrorKind;

pub use config::{CnfEntry, HarnessConfig, OutputConfig};

use files::{ensure_directory, ResultFile};

/// What a completed run hands back.
#[derive(Debug)]
pub struct HarnessOutcome {
    /// One report per configured formula, in order.
    pub reports: Vec<Report>,

    /// The recorded series, one per solver.
    pub series: Vec<SolverSeries>,

    /// True exactly when an external stop ended the run early.
    pub interrupted: bool,
}

impl HarnessOutcome {
    /// The conventional process exit code: the single report's code, or zero for a batch.
    pub fn exit_code(&self) -> i32 {
        match self.interrupted {
            true => 1,
            false => match self.reports.as_slice() {
                [only] => only.exit_code(),
                _ => 0,
            },
        }
    }
}

/// Flips the stop flag and every solver's interrupt flag.
///
/// The flags are plain atomics, so a handler running in a signal context may call
/// [request_stop](StopHandle::request_stop) without touching anything non-reentrant.
#[derive(Clone, Debug)]
pub struct StopHandle {
    stop: Arc<AtomicBool>,
    shares: Vec<Arc<SolverShared>>,
}

impl StopHandle {
    pub fn request_stop(&self) {
        self.stop.store(true, Relaxed);
        for share in &self.shares {
            share.interrupt.store(true, Relaxed);
        }
    }
}

/// A built arrangement of solvers, ready to run.
pub struct Harness {
    solvers: Vec<(Solver, ResultFile)>,
    shares: Vec<Arc<SolverShared>>,
    series: Vec<Arc<Mutex<SolverSeries>>>,
    metrics: MetricSet,
    graph_path: PathBuf,
    stop: Arc<AtomicBool>,
}

impl Harness {
    /// Prepares solvers, files, and series for the given configuration.
    pub fn build(config: &HarnessConfig) -> Result<Self, ErrorKind> {
        ensure_directory(&config.output.log_directory)?;
        ensure_directory(&config.output.result_directory)?;
        ensure_directory(&config.output.graph_directory)?;

        let metrics = MetricSet::from_flags(config.metric_flags());
        let solver_config = config.solver_config();

        let mut solvers = Vec::with_capacity(config.cnf_files.len());
        let mut shares = Vec::with_capacity(config.cnf_files.len());
        let mut series = Vec::with_capacity(config.cnf_files.len());

        for entry in &config.cnf_files {
            let shared = SolverShared::new();
            let mut solver = Solver::with_shared(solver_config.clone(), shared.clone());

            if solver_config.verbosity >= 1 {
                let log_path = entry.log_path(&config.output.log_directory);
                solver.set_stat_log(StatLog::to_file(&log_path)?);
            }
            let result_file =
                ResultFile::create(&entry.result_path(&config.output.result_directory))?;

            let formula = std::fs::File::open(&entry.path)?;
            solver.read_dimacs(std::io::BufReader::new(formula))?;

            series.push(Arc::new(Mutex::new(SolverSeries::new(
                entry.path.to_string_lossy().into_owned(),
                &metrics,
            ))));
            shares.push(shared);
            solvers.push((solver, result_file));
        }

        Ok(Harness {
            solvers,
            shares,
            series,
            metrics,
            graph_path: config.output.graph_directory.join(&config.output.graph_file),
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    /// A handle for interrupting the run, valid before and during it.
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            stop: self.stop.clone(),
            shares: self.shares.clone(),
        }
    }

    /// Runs every solver to completion, sampling on the given interval.
    pub fn run(self, sample_interval: Duration) -> Result<HarnessOutcome, ErrorKind> {
        let Harness {
            solvers,
            shares,
            series,
            metrics,
            graph_path,
            stop,
        } = self;

        log::info!(target: targets::HARNESS, "Starting {} solvers.", solvers.len());

        let workers: Vec<_> = solvers
            .into_iter()
            .map(|(mut solver, mut result_file)| {
                thread::spawn(move || {
                    let report = match solver.simplify() {
                        false => Report::Unsatisfiable,
                        true => solver.solve_limited(&[]),
                    };

                    let _ = result_file.write(report, solver.model());
                    let shared = solver.shared().clone();
                    shared.counters.solved.store(true, Relaxed);
                    shared.sync.close();
                    report
                })
            })
            .collect();

        let sampler = {
            let shares = shares.clone();
            let series = series.clone();
            let metrics = metrics.clone();
            let stop = stop.clone();
            thread::spawn(move || {
                sampler_loop(shares, series, metrics, sample_interval, stop, graph_path)
            })
        };

        let mut reports = Vec::with_capacity(workers.len());
        for worker in workers {
            reports.push(worker.join().expect("a solver thread panicked"));
        }

        // If the flag was already up, an external stop ended the run.
        let interrupted = stop.swap(true, Relaxed);
        sampler.join().expect("the sampler thread panicked")?;

        let series = series
            .into_iter()
            .map(|cell| {
                Arc::try_unwrap(cell)
                    .map(|m| m.into_inner().expect("series lock poisoned"))
                    .unwrap_or_else(|arc| arc.lock().expect("series lock poisoned").clone())
            })
            .collect();

        log::info!(target: targets::HARNESS, "All solvers finished.");
        Ok(HarnessOutcome {
            reports,
            series,
            interrupted,
        })
    }
}

/// Builds and runs in one step, for callers with no interest in interruption.
pub fn run(config: &HarnessConfig, sample_interval: Duration) -> Result<HarnessOutcome, ErrorKind> {
    Harness::build(config)?.run(sample_interval)
}
