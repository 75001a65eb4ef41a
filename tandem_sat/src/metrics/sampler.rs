/*!
The sampler: a thread reading counters from every running solver on a logical clock.

Each pass over the solvers appends one cheap sample per enabled metric per unsolved solver, and --- when the ratio metric is enabled --- queues a consistent-snapshot request for each solver onto a small worker pool.
Workers block in the [snapshot exchange](crate::metrics::sync) until the solver serves the request at a propagation fixpoint, then append the value under a fresh threaded tick.
A request already pending is not duplicated, so the queue stays bounded by the solver count.

Once the stop flag is raised the sampler writes the final frame --- every recorded series, as a JSON document --- to the graph file, and returns.
The owning harness observes completion by joining the thread.
*/

use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering::Relaxed};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::metrics::{MetricSet, SolverSeries, SolverShared};
use crate::misc::log::targets;

/// Every solver's series, as written to the graph file for the plotting tool.
#[derive(Debug, Serialize)]
pub struct FinalFrame {
    pub solvers: Vec<SolverSeries>,
}

/// Samples every solver until the stop flag is raised, then writes the final frame.
pub fn sampler_loop(
    shares: Vec<Arc<SolverShared>>,
    series: Vec<Arc<Mutex<SolverSeries>>>,
    metrics: MetricSet,
    interval: Duration,
    stop: Arc<AtomicBool>,
    graph_path: PathBuf,
) -> std::io::Result<()> {
    debug_assert_eq!(shares.len(), series.len());

    let (task_tx, task_rx) = crossbeam::channel::unbounded::<usize>();
    let worker_count = shares.len().clamp(1, 4);
    let workers: Vec<_> = (0..worker_count)
        .map(|_| {
            let task_rx = task_rx.clone();
            let shares = shares.clone();
            let series = series.clone();
            thread::spawn(move || snapshot_worker(task_rx, shares, series))
        })
        .collect();
    drop(task_rx);

    while !stop.load(Relaxed) {
        for (index, share) in shares.iter().enumerate() {
            if share.counters.solved.load(Relaxed) {
                continue;
            }

            series[index]
                .lock()
                .expect("series lock poisoned")
                .record_tick(&share.counters, &metrics);

            if metrics.ratio() && !share.sync.requested() {
                let _ = task_tx.send(index);
            }
        }

        sleep_unless_stopped(&stop, interval);
    }

    // No further requests; workers drain the queue and exit as solvers close.
    drop(task_tx);
    for worker in workers {
        let _ = worker.join();
    }

    log::debug!(target: targets::SAMPLER, "Writing the final frame to {}.", graph_path.display());
    let frame = FinalFrame {
        solvers: series
            .iter()
            .map(|cell| cell.lock().expect("series lock poisoned").clone())
            .collect(),
    };
    let file = std::fs::File::create(&graph_path)?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, &frame)?;
    out.flush()
}

/// One pool worker: blocks per request until the solver serves it, records the value.
fn snapshot_worker(
    tasks: crossbeam::channel::Receiver<usize>,
    shares: Vec<Arc<SolverShared>>,
    series: Vec<Arc<Mutex<SolverSeries>>>,
) {
    for index in tasks {
        if let Some(value) = shares[index].sync.request() {
            series[index]
                .lock()
                .expect("series lock poisoned")
                .record_ratio(value);
        }
    }
}

/// Sleeps for `interval`, waking early if the stop flag is raised.
fn sleep_unless_stopped(stop: &AtomicBool, interval: Duration) {
    const CHUNK: Duration = Duration::from_millis(10);
    let until = Instant::now() + interval;
    while !stop.load(Relaxed) {
        let now = Instant::now();
        if now >= until {
            break;
        }
        thread::sleep(CHUNK.min(until - now));
    }
}
