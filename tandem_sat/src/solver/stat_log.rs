//! The search-statistics table a solver writes to its log file.
//!
//! The format is the classical fixed-width table, one row per learnt-limit adjustment.
//! The file is opened when the solver is built and closed when the solver is dropped, on every exit path.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// A buffered writer over a solver's log file.
#[derive(Debug)]
pub struct StatLog {
    out: BufWriter<File>,
}

impl StatLog {
    /// Opens (and truncates) the log file at `path`.
    pub fn to_file(path: &Path) -> io::Result<Self> {
        Ok(StatLog {
            out: BufWriter::new(File::create(path)?),
        })
    }

    pub fn header(&mut self) {
        let _ = writeln!(self.out, "============================[ Search Statistics ]==============================");
        let _ = writeln!(self.out, "| Conflicts |          ORIGINAL         |          LEARNT          | Progress |");
        let _ = writeln!(self.out, "|           |    Vars  Clauses Literals |    Limit  Clauses Lit/Cl |          |");
        let _ = writeln!(self.out, "===============================================================================");
        let _ = self.out.flush();
    }

    #[allow(clippy::too_many_arguments)]
    pub fn row(
        &mut self,
        conflicts: u64,
        free_vars: usize,
        clauses: usize,
        clause_literals: u64,
        max_learnts: u64,
        learnts: usize,
        literals_per_learnt: f64,
        progress: f64,
    ) {
        let _ = writeln!(
            self.out,
            "| {conflicts:9} | {free_vars:7} {clauses:8} {clause_literals:8} | {max_learnts:8} {learnts:8} {literals_per_learnt:6.0} | {:6.3} % |",
            progress * 100.0,
        );
        let _ = self.out.flush();
    }

    pub fn footer(&mut self) {
        let _ = writeln!(self.out, "===============================================================================");
        let _ = self.out.flush();
    }
}
