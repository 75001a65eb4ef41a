/*!
Reading a DIMACS CNF formula into a solver.

The reader is permissive about layout: comments and the problem line may be interleaved with blank lines, clauses may span lines, and a `%` line ends the formula (as in the SATLIB collection).
Variables are created on demand, so a formula need not declare its variable count, and a count declared is treated as a minimum.
*/

use std::io::BufRead;

use crate::solver::GenericSolver;
use crate::structures::literal::Lit;
use crate::types::err::{ErrorKind, ParseError};

/// What a read of a DIMACS source found.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ParserInfo {
    pub expected_vars: Option<usize>,
    pub expected_clauses: Option<usize>,
    pub added_clauses: usize,
}

impl<R: rand::Rng> GenericSolver<R> {
    /// Reads a DIMACS formula into the solver.
    ///
    /// Clauses pass through [add_clause](GenericSolver::add_clause), so the usual normalisation applies, and an unsatisfiable prefix does not stop the read.
    ///
    /// ```rust
    /// # use tandem_sat::solver::Solver;
    /// # use tandem_sat::config::Config;
    /// # use tandem_sat::reports::Report;
    /// let mut solver = Solver::from_config(Config::default());
    ///
    /// let dimacs = "
    /// p cnf 2 3
    /// c A comment.
    ///  1  2 0
    /// -1  2 0
    /// -2 0
    /// ";
    ///
    /// solver.read_dimacs(dimacs.as_bytes()).unwrap();
    /// assert_eq!(solver.solve(), Report::Unsatisfiable);
    /// ```
    pub fn read_dimacs(&mut self, mut reader: impl BufRead) -> Result<ParserInfo, ErrorKind> {
        let mut info = ParserInfo::default();
        let mut buffer = String::new();
        let mut clause: Vec<Lit> = Vec::new();
        let mut line = 0;

        'line_loop: loop {
            buffer.clear();
            match reader.read_line(&mut buffer) {
                Ok(0) => break 'line_loop,
                Ok(_) => line += 1,
                Err(_) => return Err(ErrorKind::from(ParseError::Line(line))),
            }

            match buffer.chars().next() {
                Some('c') => continue 'line_loop,
                Some('%') => break 'line_loop,

                Some('p') => {
                    let mut details = buffer.split_whitespace().skip(2);
                    let vars: usize = match details.next().map(str::parse) {
                        Some(Ok(count)) => count,
                        _ => return Err(ErrorKind::from(ParseError::ProblemSpecification)),
                    };
                    let clauses: usize = match details.next().map(str::parse) {
                        Some(Ok(count)) => count,
                        _ => return Err(ErrorKind::from(ParseError::ProblemSpecification)),
                    };

                    self.ensure_vars(vars);
                    info.expected_vars = Some(vars);
                    info.expected_clauses = Some(clauses);
                }

                _ => {
                    for token in buffer.split_whitespace() {
                        let int: i32 = match token.parse() {
                            Ok(int) => int,
                            Err(_) => {
                                return Err(ErrorKind::from(ParseError::Token(token.to_owned())))
                            }
                        };

                        match Lit::from_dimacs(int) {
                            None => {
                                let finished = std::mem::take(&mut clause);
                                info.added_clauses += 1;
                                self.add_clause(finished)?;
                            }
                            Some(lit) => {
                                self.ensure_vars(lit.var() as usize + 1);
                                clause.push(lit);
                            }
                        }
                    }
                }
            }
        }

        if !clause.is_empty() {
            return Err(ErrorKind::from(ParseError::MissingDelimiter));
        }

        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::solver::Solver;

    #[test]
    fn reads_a_formula() {
        let mut solver = Solver::from_config(Config::default());
        let info = solver
            .read_dimacs("p cnf 3 2\n1 -2 0\n2 3 0\n".as_bytes())
            .unwrap();

        assert_eq!(info.expected_vars, Some(3));
        assert_eq!(info.expected_clauses, Some(2));
        assert_eq!(info.added_clauses, 2);
        assert_eq!(solver.var_count(), 3);
    }

    #[test]
    fn variables_created_on_demand() {
        let mut solver = Solver::from_config(Config::default());
        solver.read_dimacs("1 -7 0".as_bytes()).unwrap();
        assert_eq!(solver.var_count(), 7);
    }

    #[test]
    fn missing_terminator() {
        let mut solver = Solver::from_config(Config::default());
        let result = solver.read_dimacs("1 2".as_bytes());
        assert!(matches!(
            result,
            Err(ErrorKind::Parse(ParseError::MissingDelimiter))
        ));
    }

    #[test]
    fn bad_problem_line() {
        let mut solver = Solver::from_config(Config::default());
        let result = solver.read_dimacs("p cnf\n1 2 0".as_bytes());
        assert!(matches!(
            result,
            Err(ErrorKind::Parse(ParseError::ProblemSpecification))
        ));
    }

    #[test]
    fn unreadable_token() {
        let mut solver = Solver::from_config(Config::default());
        let result = solver.read_dimacs("1 two 0".as_bytes());
        assert!(matches!(result, Err(ErrorKind::Parse(ParseError::Token(_)))));
    }
}
