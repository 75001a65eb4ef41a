/*!
Garbage collection of the clause arena.

Removal and tail-trimming leave dead words behind, and once the wasted share passes the configured fraction the arena is compacted: live clauses are copied into a fresh arena and every handle in circulation is rewritten through the relocation table the source arena builds as it goes.

Handles live in exactly three places:
- The watch index --- swept first, so no watcher of a removed clause survives to be relocated.
- Variable reasons on the trail --- relocated when the reason is locked (the clause *is* the reason of a live assignment) or already relocated through a watcher; a stale reason of an unassigned variable is never dereferenced and is left alone.
- The original and learnt handle lists, skipping entries already removed.

Afterwards the fresh arena replaces the source: nothing is wasted and every live handle points at a live clause.
*/

use std::sync::atomic::Ordering::Relaxed;

use crate::db::arena::ClauseArena;
use crate::misc::log::targets;
use crate::solver::GenericSolver;
use crate::structures::valuation::Value;

impl<R: rand::Rng> GenericSolver<R> {
    /// Compacts the arena if the wasted share exceeds the configured fraction.
    pub(crate) fn check_garbage(&mut self) {
        if self.arena.wasted() as f64 > self.arena.len() as f64 * self.config.garbage_frac {
            self.garbage_collect();
        }
    }

    /// Compacts the arena unconditionally, rewriting every live handle.
    pub(crate) fn garbage_collect(&mut self) {
        let live = self.arena.len() - self.arena.wasted();
        let mut to = ClauseArena::with_capacity(live);

        self.reloc_all(&mut to);

        log::debug!(
            target: targets::ARENA,
            "Collection: {} words to {} words.",
            self.arena.len(),
            to.len(),
        );
        self.shared.counters.gc_events.fetch_add(1, Relaxed);
        to.move_to(&mut self.arena);
    }

    fn reloc_all(&mut self, to: &mut ClauseArena) {
        let GenericSolver {
            watches,
            arena,
            vardata,
            assigns,
            trail,
            clauses,
            learnts,
            ..
        } = self;

        // All watchers, once lazily detached clauses are swept out.
        watches.clean_all(arena);
        for index in 0..watches.list_count() {
            for watcher in watches.list_at_mut(index).iter_mut() {
                arena
                    .reloc(&mut watcher.clause, to)
                    .expect("compaction fits within the live span");
            }
        }

        // All reasons which may still be dereferenced.
        for lit in trail.iter() {
            let var = lit.var() as usize;
            if let Some(mut reason) = vardata[var].reason {
                // A relocated source holds its forwarding handle where the first
                // literal was, so the locked check must come second.
                let keep = arena.is_relocated(reason) || {
                    let first = arena.lit(reason, 0);
                    assigns[first.var() as usize].under(first) == Value::True
                        && vardata[first.var() as usize].reason == Some(reason)
                };
                if keep {
                    debug_assert!(!arena.is_removed(reason));
                    arena
                        .reloc(&mut reason, to)
                        .expect("compaction fits within the live span");
                    vardata[var].reason = Some(reason);
                }
            }
        }

        // The learnt and original handle lists, dropping removed entries.
        for list in [learnts, clauses] {
            let mut kept = 0;
            for index in 0..list.len() {
                let mut cr = list[index];
                if !arena.is_removed(cr) {
                    arena
                        .reloc(&mut cr, to)
                        .expect("compaction fits within the live span");
                    list[kept] = cr;
                    kept += 1;
                }
            }
            list.truncate(kept);
        }
    }
}
