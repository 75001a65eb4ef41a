//! Directory setup and result files.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::reports::Report;
use crate::structures::valuation::Value;
use crate::types::err::{ConfigError, ErrorKind};

/// Ensures `path` names a directory, creating it if absent.
/// An existing non-directory of the same name is a configuration error.
pub fn ensure_directory(path: &Path) -> Result<(), ErrorKind> {
    if path.exists() {
        match path.is_dir() {
            true => Ok(()),
            false => Err(ErrorKind::from(ConfigError::NotADirectory(path.to_owned()))),
        }
    } else {
        std::fs::create_dir_all(path).map_err(ErrorKind::from)
    }
}

/// A solver's result file, opened ahead of the solve so an unopenable path fails early.
#[derive(Debug)]
pub struct ResultFile {
    out: BufWriter<File>,
}

impl ResultFile {
    pub fn create(path: &Path) -> io::Result<Self> {
        Ok(ResultFile {
            out: BufWriter::new(File::create(path)?),
        })
    }

    /// Writes the report, with the model in DIMACS style when satisfiable.
    pub fn write(&mut self, report: Report, model: &[Value]) -> io::Result<()> {
        writeln!(self.out, "{report}")?;

        if report == Report::Satisfiable {
            write!(self.out, "v")?;
            for (var, value) in model.iter().enumerate() {
                let magnitude = var as i64 + 1;
                match value {
                    Value::True => write!(self.out, " {magnitude}")?,
                    Value::False => write!(self.out, " -{magnitude}")?,
                    Value::Undef => {}
                }
            }
            writeln!(self.out, " 0")?;
        }

        self.out.flush()
    }
}
