/*!
The watch index: which clauses are watching which literals.

# Theory

Boolean constraint propagation rests on the observation that a clause can only newly assert a literal, or newly conflict, when one of its literals becomes false.
It is enough, then, to monitor two literals per clause, re-inspecting the clause only when a watched literal is falsified.
Clauses watching `p` are kept in the list for `¬p`... or rather, the list indexed by the literal whose assignment falsifies the watch.

Each watcher carries a *blocker*: some other literal of the clause, cached at the time the watch was made.
If the blocker is currently true the clause is satisfied and need not be touched at all, saving a trip to the arena.

# Laziness

Detaching a clause without walking its watch lists merely *smudges* the lists: a dirty bit is set, and watchers of removed clauses persist until the list is next looked up or [clean_all](WatchIndex::clean_all) sweeps every smudged list.
The collector relies on `clean_all` running before relocation, so that no watcher of a removed clause survives to be relocated.
*/

use crate::db::arena::{ClauseArena, ClauseRef};
use crate::structures::literal::Lit;

/// A clause watching a literal, with a cached blocker literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Watcher {
    pub clause: ClauseRef,
    pub blocker: Lit,
}

impl Watcher {
    pub fn new(clause: ClauseRef, blocker: Lit) -> Self {
        Watcher { clause, blocker }
    }
}

/// Watch lists for every literal, with per-list dirty bits for lazy cleanup.
#[derive(Debug, Default)]
pub struct WatchIndex {
    lists: Vec<Vec<Watcher>>,
    dirty: Vec<bool>,
    dirties: Vec<Lit>,
}

impl WatchIndex {
    /// Ensures lists exist for both literals of variables up to `var_count`.
    pub fn grow_to(&mut self, var_count: usize) {
        if self.lists.len() < 2 * var_count {
            self.lists.resize_with(2 * var_count, Vec::default);
            self.dirty.resize(2 * var_count, false);
        }
    }

    /// A count of watch lists, two per variable.
    pub fn list_count(&self) -> usize {
        self.lists.len()
    }

    /// Appends a watcher to the list of `lit`.
    #[inline(always)]
    pub fn push(&mut self, lit: Lit, watcher: Watcher) {
        self.lists[lit.index()].push(watcher);
    }

    /// The watchers of `lit`, without any cleanup.
    #[inline(always)]
    pub fn watchers(&self, lit: Lit) -> &Vec<Watcher> {
        &self.lists[lit.index()]
    }

    /// The watchers of `lit`, mutably, without any cleanup.
    #[inline(always)]
    pub fn watchers_mut(&mut self, lit: Lit) -> &mut Vec<Watcher> {
        &mut self.lists[lit.index()]
    }

    /// The list at `index`, mutably; indices cover `0..list_count()`.
    pub fn list_at_mut(&mut self, index: usize) -> &mut Vec<Watcher> {
        &mut self.lists[index]
    }

    /// Marks the list of `lit` as holding watchers of removed clauses.
    pub fn smudge(&mut self, lit: Lit) {
        if !self.dirty[lit.index()] {
            self.dirty[lit.index()] = true;
            self.dirties.push(lit);
        }
    }

    /// Sweeps watchers of removed clauses from the list of `lit`, if the list is smudged.
    pub fn clean(&mut self, lit: Lit, arena: &ClauseArena) {
        if self.dirty[lit.index()] {
            self.lists[lit.index()].retain(|w| !arena.is_removed(w.clause));
            self.dirty[lit.index()] = false;
        }
    }

    /// Sweeps every smudged list.
    pub fn clean_all(&mut self, arena: &ClauseArena) {
        let dirties = std::mem::take(&mut self.dirties);
        for lit in dirties {
            // A literal may have been smudged and cleaned already.
            self.clean(lit, arena);
        }
    }

    /// Removes the watcher of `clause` from the list of `lit` immediately.
    pub fn remove(&mut self, lit: Lit, clause: ClauseRef) {
        let list = &mut self.lists[lit.index()];
        if let Some(position) = list.iter().position(|w| w.clause == clause) {
            list.swap_remove(position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::literal::Lit;

    fn lit(int: i32) -> Lit {
        Lit::from_dimacs(int).unwrap()
    }

    #[test]
    fn smudged_lists_are_swept() {
        let mut arena = ClauseArena::default();
        let keep = arena.alloc(&[lit(1), lit(2)], false).unwrap();
        let drop = arena.alloc(&[lit(1), lit(3)], false).unwrap();

        let mut watches = WatchIndex::default();
        watches.grow_to(3);
        watches.push(lit(-1), Watcher::new(keep, lit(2)));
        watches.push(lit(-1), Watcher::new(drop, lit(3)));

        arena.free(drop);
        watches.smudge(lit(-1));
        // The watcher persists until the sweep.
        assert_eq!(watches.watchers(lit(-1)).len(), 2);

        watches.clean_all(&arena);
        assert_eq!(watchers_of(&watches, lit(-1)), vec![keep]);
    }

    #[test]
    fn strict_removal() {
        let mut arena = ClauseArena::default();
        let a = arena.alloc(&[lit(1), lit(2)], false).unwrap();
        let b = arena.alloc(&[lit(1), lit(3)], false).unwrap();

        let mut watches = WatchIndex::default();
        watches.grow_to(3);
        watches.push(lit(-1), Watcher::new(a, lit(2)));
        watches.push(lit(-1), Watcher::new(b, lit(3)));

        watches.remove(lit(-1), a);
        assert_eq!(watchers_of(&watches, lit(-1)), vec![b]);
    }

    fn watchers_of(watches: &WatchIndex, l: Lit) -> Vec<ClauseRef> {
        watches.watchers(l).iter().map(|w| w.clause).collect()
    }
}
