/*!
The suspension-point protocol for consistent snapshots.

# Overview

Cheap counters may be read from a running solver at any time, as they are plain atomics.
A quantity derived by *scanning* solver state --- the live clause/variable ratio, say --- must instead observe the solver between the completion of one round of propagation and the start of the following analysis or decision, when the trail and watch lists are consistent and no modification is in flight.

The protocol is a pair of condition variables over shared state, standing in for the counting semaphores a lower-level rendition would use:

1. A requester registers interest (a waiting count) and blocks.
2. The solver, on reaching a propagation fixpoint with a request pending, computes the derived value, publishes it, and blocks in turn.
3. The requester consumes the value and releases the solver.

The solver serves at most one request per completed propagation, so the number of consistent samples is bounded by the number of completed BCP rounds.
The solver does not move on until the published value is consumed, which is what makes the read consistent.

# Shutdown

A solver which has finished will never reach another propagation fixpoint, so the owning thread [closes](SnapshotSync::close) the exchange once a solve returns.
Requests pending at that point, and any made later, resolve to nothing.
*/

use std::sync::{Condvar, Mutex};

#[derive(Debug, Default)]
struct SnapshotState {
    /// A count of registered requests yet to be served.
    waiting: usize,

    /// The slot a published value waits in until consumed.
    published: Option<f64>,

    /// Set once the solver will reach no further suspension points.
    closed: bool,
}

/// One solver's end of the consistent-snapshot exchange.
#[derive(Debug, Default)]
pub struct SnapshotSync {
    state: Mutex<SnapshotState>,
    propagation_done: Condvar,
    calculation_done: Condvar,
}

impl SnapshotSync {
    /// Registers a request and blocks until a value is published at a suspension point.
    ///
    /// Returns nothing if the exchange is closed before the request is served.
    pub fn request(&self) -> Option<f64> {
        let mut state = self.state.lock().expect("snapshot lock poisoned");
        state.waiting += 1;

        loop {
            if let Some(value) = state.published.take() {
                state.waiting -= 1;
                self.calculation_done.notify_one();
                return Some(value);
            }

            if state.closed {
                state.waiting -= 1;
                return None;
            }

            state = self.propagation_done.wait(state).expect("snapshot lock poisoned");
        }
    }

    /// True exactly when some request is waiting to be served.
    pub fn requested(&self) -> bool {
        self.state.lock().expect("snapshot lock poisoned").waiting > 0
    }

    /// Publishes `value` for a single waiting requester and blocks until it is consumed.
    ///
    /// Called by the owning solver at a propagation fixpoint.
    /// A no-op if no request is waiting.
    pub fn publish(&self, value: f64) {
        let mut state = self.state.lock().expect("snapshot lock poisoned");
        if state.waiting == 0 {
            return;
        }

        state.published = Some(value);
        self.propagation_done.notify_one();

        while state.published.is_some() {
            state = self.calculation_done.wait(state).expect("snapshot lock poisoned");
        }
    }

    /// Closes the exchange, releasing every pending and future request with nothing.
    pub fn close(&self) {
        let mut state = self.state.lock().expect("snapshot lock poisoned");
        state.closed = true;
        self.propagation_done.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn handshake_delivers_a_published_value() {
        let sync = Arc::new(SnapshotSync::default());

        let requester = {
            let sync = sync.clone();
            thread::spawn(move || sync.request())
        };

        // Serve boundaries until the request has been consumed.
        loop {
            if sync.requested() {
                sync.publish(42.0);
                break;
            }
            thread::yield_now();
        }

        assert_eq!(requester.join().unwrap(), Some(42.0));
    }

    #[test]
    fn publish_without_request_is_a_no_op() {
        let sync = SnapshotSync::default();
        sync.publish(1.0);
        sync.close();
        assert_eq!(sync.request(), None);
    }

    #[test]
    fn close_releases_pending_requests() {
        let sync = Arc::new(SnapshotSync::default());

        let requester = {
            let sync = sync.clone();
            thread::spawn(move || sync.request())
        };

        while !sync.requested() {
            thread::yield_now();
        }
        sync.close();

        assert_eq!(requester.join().unwrap(), None);
    }
}
