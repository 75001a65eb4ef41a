//! Shared helpers for the integration tests: formula builders and model checking.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use rand::{rngs::StdRng, Rng, SeedableRng};

use tandem_sat::config::Config;
use tandem_sat::reports::Report;
use tandem_sat::solver::Solver;
use tandem_sat::structures::valuation::Value;

/// A solver loaded with the given DIMACS text.
pub fn solver_for(dimacs: &str, config: &Config) -> Solver {
    let mut solver = Solver::from_config(config.clone());
    solver
        .read_dimacs(dimacs.as_bytes())
        .expect("well-formed formula");
    solver
}

/// The report for the given DIMACS text under the given configuration.
pub fn report_for(dimacs: &str, config: &Config) -> Report {
    solver_for(dimacs, config).solve()
}

/// The clauses of a DIMACS text, as integer literals.
pub fn clauses_of(dimacs: &str) -> Vec<Vec<i32>> {
    let mut clauses = Vec::new();
    let mut clause = Vec::new();

    for line in dimacs.lines() {
        if line.starts_with('c') || line.starts_with('p') || line.starts_with('%') {
            continue;
        }
        for token in line.split_whitespace() {
            let int: i32 = token.parse().expect("a DIMACS literal");
            if int == 0 {
                clauses.push(std::mem::take(&mut clause));
            } else {
                clause.push(int);
            }
        }
    }
    clauses
}

/// True exactly when every clause of the DIMACS text has a literal true under `model`.
pub fn model_satisfies(dimacs: &str, model: &[Value]) -> bool {
    clauses_of(dimacs).iter().all(|clause| {
        clause.iter().any(|&int| {
            let var = int.unsigned_abs() as usize - 1;
            match model.get(var) {
                Some(Value::True) => int > 0,
                Some(Value::False) => int < 0,
                _ => false,
            }
        })
    })
}

/// The pigeonhole principle: `pigeons` into `holes`, unsatisfiable when pigeons exceed holes.
///
/// Variable `p·holes + h + 1` places pigeon `p` in hole `h`.
pub fn pigeonhole(pigeons: usize, holes: usize) -> String {
    let var = |p: usize, h: usize| p * holes + h + 1;
    let mut out = String::new();

    let clause_count = pigeons + holes * (pigeons * pigeons.saturating_sub(1)) / 2;
    let _ = writeln!(out, "p cnf {} {clause_count}", pigeons * holes);

    // Every pigeon roosts somewhere.
    for p in 0..pigeons {
        for h in 0..holes {
            let _ = write!(out, "{} ", var(p, h));
        }
        let _ = writeln!(out, "0");
    }

    // No two pigeons share a hole.
    for h in 0..holes {
        for p in 0..pigeons {
            for q in p + 1..pigeons {
                let _ = writeln!(out, "-{} -{} 0", var(p, h), var(q, h));
            }
        }
    }

    out
}

/// A uniform random 3-SAT instance: three distinct variables per clause, signs by coin flip.
pub fn uniform_random_3sat(var_count: usize, clause_count: usize, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = String::new();
    let _ = writeln!(out, "p cnf {var_count} {clause_count}");

    for _ in 0..clause_count {
        let mut vars: BTreeSet<usize> = BTreeSet::new();
        while vars.len() < 3 {
            vars.insert(rng.gen_range(1..=var_count));
        }
        for v in vars {
            let sign = if rng.gen::<bool>() { 1 } else { -1 };
            let _ = write!(out, "{} ", sign * v as i64);
        }
        let _ = writeln!(out, "0");
    }

    out
}
