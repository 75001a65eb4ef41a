mod basic {
    use tandem_sat::config::Config;
    use tandem_sat::reports::Report;
    use tandem_sat::structures::literal::Lit;
    use tandem_sat::structures::valuation::Value;
    use tandem_tests::{model_satisfies, report_for, solver_for};

    #[test]
    fn single_unit() {
        let mut solver = solver_for("p cnf 1 1\n1 0\n", &Config::default());
        assert_eq!(solver.solve(), Report::Satisfiable);
        assert_eq!(solver.model()[0], Value::True);
    }

    #[test]
    fn contradictory_units() {
        assert_eq!(
            report_for("p cnf 1 2\n1 0\n-1 0\n", &Config::default()),
            Report::Unsatisfiable
        );
    }

    #[test]
    fn three_clauses_with_a_verified_model() {
        let dimacs = "p cnf 3 3\n1 2 0\n-1 3 0\n-2 -3 0\n";
        let mut solver = solver_for(dimacs, &Config::default());
        assert_eq!(solver.solve(), Report::Satisfiable);
        assert!(model_satisfies(dimacs, solver.model()));
    }

    #[test]
    fn unsatisfiability_persists() {
        let mut solver = solver_for("p cnf 2 4\n1 2 0\n1 -2 0\n-1 2 0\n-1 -2 0\n", &Config::default());
        assert_eq!(solver.solve(), Report::Unsatisfiable);
        assert!(!solver.is_ok());
        // A repeated solve answers the same, with no search.
        assert_eq!(solver.solve(), Report::Unsatisfiable);
    }

    #[test]
    fn implied_clause_changes_nothing() {
        let mut solver = solver_for("p cnf 2 2\n1 0\n2 0\n", &Config::default());
        assert_eq!(solver.solve(), Report::Satisfiable);
        let model_before = solver.model().to_vec();

        // (1 ∨ 2) is already entailed at the top level, and is in fact dropped.
        assert!(solver
            .add_clause(vec![Lit::positive(0), Lit::positive(1)])
            .unwrap());
        assert_eq!(solver.clause_count(), 0);

        assert_eq!(solver.solve(), Report::Satisfiable);
        assert_eq!(solver.model(), model_before.as_slice());
    }

    #[test]
    fn tautologies_and_duplicates_normalise() {
        let mut solver = solver_for("p cnf 2 0\n", &Config::default());

        // A tautology is dropped entirely.
        assert!(solver
            .add_clause(vec![Lit::positive(0), Lit::negative(0)])
            .unwrap());
        assert_eq!(solver.clause_count(), 0);

        // Duplicates collapse to one occurrence.
        assert!(solver
            .add_clause(vec![Lit::positive(0), Lit::positive(0), Lit::positive(1)])
            .unwrap());
        assert_eq!(solver.clause_count(), 1);

        assert_eq!(solver.solve(), Report::Satisfiable);
    }

    #[test]
    fn simplify_is_idempotent() {
        let mut solver = solver_for("p cnf 3 3\n1 0\n1 2 0\n-1 3 2 0\n", &Config::default());

        assert!(solver.simplify());
        let clauses_after_first = solver.clause_count();
        assert!(solver.simplify());
        assert_eq!(solver.clause_count(), clauses_after_first);

        assert_eq!(solver.solve(), Report::Satisfiable);
    }

    #[test]
    fn empty_formula_is_satisfiable() {
        assert_eq!(report_for("p cnf 0 0\n", &Config::default()), Report::Satisfiable);
    }
}
