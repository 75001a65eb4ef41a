/*!
Conflict analysis: the first unique implication point, and minimisation of the learnt clause.

# Overview

Analysis walks the implication graph backwards from a conflicting clause.
A path counter tracks how many marked literals of the current decision level remain; literals from lower levels go straight into the learnt clause.
Each step consumes the most recently assigned marked literal, following its reason, until a single literal of the current level remains --- the first unique implication point.
Its negation becomes the asserting literal, stored at index zero of the learnt clause.

Touched variables have their activity bumped, and learnt reasons their clause activity.

# Minimisation

A literal of the learnt clause is redundant if its reason is covered by the rest of the clause:
- The basic mode drops a literal whose reason holds only level-zero literals and literals already present.
- The deep (default) mode applies the same idea recursively, with an explicit stack, marking failed branches so no chain is explored twice.

# Backjumping

The backjump level is zero for a unit learnt clause, and otherwise the highest level among the non-asserting literals.
A literal of that level is swapped into index one so that, after the backjump and attachment, the watches are exactly where propagation of the asserting literal wants them.
*/

use std::sync::atomic::Ordering::Relaxed;

use crate::config::CcMin;
use crate::db::arena::ClauseRef;
use crate::misc::log::targets;
use crate::solver::{GenericSolver, Seen};
use crate::structures::literal::Lit;

impl<R: rand::Rng> GenericSolver<R> {
    /// Analyses the conflict `confl`, filling `out_learnt` with an asserting clause.
    /// Returns the level to backjump to.
    ///
    /// `out_learnt[0]` is the asserting literal, and with more than one literal,
    /// `out_learnt[1]` holds a literal of the returned level.
    pub(crate) fn analyze(&mut self, confl: ClauseRef, out_learnt: &mut Vec<Lit>) -> u32 {
        let mut path_count: u32 = 0;
        let mut confl = confl;
        let mut asserting: Option<Lit> = None;
        let mut index = self.trail.len();

        out_learnt.clear();
        // Leave room for the asserting literal.
        out_learnt.push(Lit::from_index(0));

        loop {
            if self.arena.is_learnt(confl) {
                self.bump_clause_activity(confl);
            }

            let skip_asserting = usize::from(asserting.is_some());
            for offset in skip_asserting..self.arena.size(confl) {
                let q = self.arena.lit(confl, offset);
                let var = q.var() as usize;

                if self.seen[var] == Seen::Undef && self.level(q.var()) > 0 {
                    self.bump_var_activity(q.var());
                    self.seen[var] = Seen::Source;
                    if self.level(q.var()) >= self.decision_level() {
                        path_count += 1;
                    } else {
                        out_learnt.push(q);
                    }
                }
            }

            // Select the next marked literal from the top of the trail.
            loop {
                index -= 1;
                if self.seen[self.trail[index].var() as usize] != Seen::Undef {
                    break;
                }
            }

            let p = self.trail[index];
            self.seen[p.var() as usize] = Seen::Undef;
            asserting = Some(p);
            path_count -= 1;

            if path_count == 0 {
                break;
            }

            confl = self
                .reason(p.var())
                .expect("a same-level literal below the UIP has a reason");
        }

        let uip = asserting.expect("analysis consumes at least one literal");
        out_learnt[0] = !uip;

        self.analyze_toclear.clear();
        self.analyze_toclear.extend_from_slice(out_learnt);

        self.shared
            .counters
            .max_literals
            .fetch_add(out_learnt.len() as u64, Relaxed);

        match self.config.ccmin_mode {
            CcMin::Deep => {
                let mut kept = 1;
                for index in 1..out_learnt.len() {
                    let lit = out_learnt[index];
                    if self.reason(lit.var()).is_none() || !self.lit_redundant(lit) {
                        out_learnt[kept] = lit;
                        kept += 1;
                    }
                }
                out_learnt.truncate(kept);
            }

            CcMin::Basic => {
                let mut kept = 1;
                'candidates: for index in 1..out_learnt.len() {
                    let lit = out_learnt[index];
                    match self.reason(lit.var()) {
                        None => {
                            out_learnt[kept] = lit;
                            kept += 1;
                        }
                        Some(reason) => {
                            for offset in 1..self.arena.size(reason) {
                                let other = self.arena.lit(reason, offset);
                                if self.seen[other.var() as usize] == Seen::Undef
                                    && self.level(other.var()) > 0
                                {
                                    out_learnt[kept] = lit;
                                    kept += 1;
                                    continue 'candidates;
                                }
                            }
                        }
                    }
                }
                out_learnt.truncate(kept);
            }

            CcMin::None => {}
        }

        self.shared
            .counters
            .tot_literals
            .fetch_add(out_learnt.len() as u64, Relaxed);

        // Find the backjump level and park one of its literals at index one.
        let backjump_level = if out_learnt.len() == 1 {
            0
        } else {
            let mut max_index = 1;
            for index in 2..out_learnt.len() {
                if self.level(out_learnt[index].var()) > self.level(out_learnt[max_index].var()) {
                    max_index = index;
                }
            }
            out_learnt.swap(1, max_index);
            self.level(out_learnt[1].var())
        };

        for index in 0..self.analyze_toclear.len() {
            let var = self.analyze_toclear[index].var() as usize;
            self.seen[var] = Seen::Undef;
        }

        log::trace!(target: targets::ANALYSIS, "Learnt {out_learnt:?}, backjump to {backjump_level}.");
        backjump_level
    }

    /// True exactly when `lit` is redundant in the clause under construction:
    /// every literal of its reason is at level zero, already in the clause, or itself recursively redundant.
    ///
    /// Failed branches are marked so a later check does not re-explore them; every mark
    /// is queued on `analyze_toclear` for the caller to erase.
    pub(crate) fn lit_redundant(&mut self, lit: Lit) -> bool {
        debug_assert!(matches!(
            self.seen[lit.var() as usize],
            Seen::Undef | Seen::Source
        ));

        let mut stack: Vec<(usize, Lit)> = Vec::new();
        let mut p = lit;
        let mut reason = self
            .reason(p.var())
            .expect("redundancy is only asked of literals with a reason");
        let mut offset = 1;

        loop {
            if offset < self.arena.size(reason) {
                let q = self.arena.lit(reason, offset);
                let var = q.var() as usize;

                let covered = self.level(q.var()) == 0
                    || self.seen[var] == Seen::Source
                    || self.seen[var] == Seen::Removable;

                if !covered {
                    if self.reason(q.var()).is_none() || self.seen[var] == Seen::Failed {
                        // The chain so far cannot be shown redundant.
                        stack.push((0, p));
                        for &(_, failed) in &stack {
                            if self.seen[failed.var() as usize] == Seen::Undef {
                                self.seen[failed.var() as usize] = Seen::Failed;
                                self.analyze_toclear.push(failed);
                            }
                        }
                        return false;
                    }

                    stack.push((offset, p));
                    offset = 0;
                    p = q;
                    reason = self.reason(p.var()).expect("checked above");
                }
            } else {
                if self.seen[p.var() as usize] == Seen::Undef {
                    self.seen[p.var() as usize] = Seen::Removable;
                    self.analyze_toclear.push(p);
                }

                match stack.pop() {
                    None => break,
                    Some((resume, parent)) => {
                        offset = resume;
                        p = parent;
                        reason = self
                            .reason(p.var())
                            .expect("stacked literals have reasons");
                    }
                }
            }

            offset += 1;
        }

        true
    }

    /// Expresses a conflict on an assumption in terms of the assumptions which entail it.
    ///
    /// Walks the trail from the top, following reasons of marked variables; decisions reached
    /// this way are assumptions, and their negations form the conflict set.
    pub(crate) fn analyze_final(&mut self, p: Lit) {
        self.conflict.clear();
        self.conflict.push(p);

        if self.decision_level() == 0 {
            return;
        }

        self.seen[p.var() as usize] = Seen::Source;

        for index in (self.trail_lim[0]..self.trail.len()).rev() {
            let var = self.trail[index].var();
            if self.seen[var as usize] == Seen::Undef {
                continue;
            }

            match self.reason(var) {
                None => {
                    debug_assert!(self.level(var) > 0);
                    self.conflict.push(!self.trail[index]);
                }
                Some(reason) => {
                    for offset in 1..self.arena.size(reason) {
                        let q = self.arena.lit(reason, offset);
                        if self.level(q.var()) > 0 {
                            self.seen[q.var() as usize] = Seen::Source;
                        }
                    }
                }
            }
            self.seen[var as usize] = Seen::Undef;
        }

        self.seen[p.var() as usize] = Seen::Undef;
    }
}
