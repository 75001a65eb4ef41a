//! High-level reports on the outcome of a solve.

use std::fmt;

/// The outcome of a solve, from the perspective of a caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Report {
    /// A satisfying valuation was found, and is available as the model of the solver.
    Satisfiable,

    /// The formula was shown to admit no satisfying valuation.
    Unsatisfiable,

    /// The solve ended without an answer, e.g. due to an exhausted budget or an interrupt.
    Unknown,
}

impl Report {
    /// The conventional SAT-competition exit code for the report.
    pub fn exit_code(self) -> i32 {
        match self {
            Report::Satisfiable => 10,
            Report::Unsatisfiable => 20,
            Report::Unknown => 0,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Satisfiable => write!(f, "SATISFIABLE"),
            Report::Unsatisfiable => write!(f, "UNSATISFIABLE"),
            Report::Unknown => write!(f, "INDETERMINATE"),
        }
    }
}
