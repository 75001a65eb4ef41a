/*!
Error types used in the library.

- Some of these are internally expected --- e.g. a BCP conflict is used to control the flow of a solve, and is a learning opportunity rather than a failure.
- Others are external --- e.g. a configuration document may be missing a required key, in which case nothing can be done.

Names of the error enums overlap with corresponding subsystems, so throughout the library the types are used with an `err::` prefix.
*/

use std::fmt;
use std::path::PathBuf;

/// A union of varied error kinds.
#[derive(Debug)]
pub enum ErrorKind {
    /// An error in the clause arena.
    Arena(ArenaError),

    /// An error while reading a formula.
    Parse(ParseError),

    /// An error in the harness configuration.
    Config(ConfigError),

    /// An error opening or writing one of the harness files.
    Io(std::io::Error),
}

impl From<ArenaError> for ErrorKind {
    fn from(e: ArenaError) -> Self {
        ErrorKind::Arena(e)
    }
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        ErrorKind::Parse(e)
    }
}

impl From<ConfigError> for ErrorKind {
    fn from(e: ConfigError) -> Self {
        ErrorKind::Config(e)
    }
}

impl From<std::io::Error> for ErrorKind {
    fn from(e: std::io::Error) -> Self {
        ErrorKind::Io(e)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Arena(e) => write!(f, "arena: {e}"),
            ErrorKind::Parse(e) => write!(f, "parse: {e}"),
            ErrorKind::Config(e) => write!(f, "configuration: {e}"),
            ErrorKind::Io(e) => write!(f, "io: {e}"),
        }
    }
}

impl std::error::Error for ErrorKind {}

/// Errors in the clause arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The memory limit set for the arena would be exceeded by an allocation.
    OutOfMemory,
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArenaError::OutOfMemory => write!(f, "out of clause memory"),
        }
    }
}

/// Errors while reading a DIMACS formula.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// Some issue with the problem specification of the input.
    ProblemSpecification,

    /// Some unspecific problem at the given line.
    Line(usize),

    /// A token which is neither a literal nor a clause terminator.
    Token(String),

    /// The input ended inside a clause, with no terminating zero.
    MissingDelimiter,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::ProblemSpecification => write!(f, "malformed problem specification"),
            ParseError::Line(line) => write!(f, "unreadable input at line {line}"),
            ParseError::Token(token) => write!(f, "unreadable token '{token}'"),
            ParseError::MissingDelimiter => write!(f, "input ended inside a clause"),
        }
    }
}

/// Fatal errors in the harness configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration document could not be opened.
    Unreadable(PathBuf, std::io::Error),

    /// The configuration document is not valid JSON of the expected shape.
    Json(serde_json::Error),

    /// The required `metrics` mapping is missing.
    MissingMetrics,

    /// A path given for one of the output directories names an existing non-directory.
    NotADirectory(PathBuf),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Unreadable(path, e) => write!(f, "unable to open {}: {e}", path.display()),
            ConfigError::Json(e) => write!(f, "bad configuration document: {e}"),
            ConfigError::MissingMetrics => write!(f, "the 'metrics' mapping is required"),
            ConfigError::NotADirectory(path) => {
                write!(f, "{} exists and is not a directory", path.display())
            }
        }
    }
}
