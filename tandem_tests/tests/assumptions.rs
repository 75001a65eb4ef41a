mod assumptions {
    use tandem_sat::config::Config;
    use tandem_sat::reports::Report;
    use tandem_sat::structures::literal::Lit;
    use tandem_sat::structures::valuation::Value;
    use tandem_tests::solver_for;

    #[test]
    fn conflicting_assumptions_leave_the_solver_usable() {
        let mut solver = solver_for("p cnf 2 1\n1 2 0\n", &Config::default());

        let report = solver.solve_limited(&[Lit::negative(0), Lit::negative(1)]);
        assert_eq!(report, Report::Unsatisfiable);
        assert!(!solver.conflict_set().is_empty());

        // The formula itself is not unsatisfiable.
        assert!(solver.is_ok());
        assert_eq!(solver.solve(), Report::Satisfiable);
    }

    #[test]
    fn assumptions_guide_the_model() {
        let mut solver = solver_for("p cnf 3 2\n1 2 0\n-1 3 0\n", &Config::default());

        let report = solver.solve_limited(&[Lit::positive(0)]);
        assert_eq!(report, Report::Satisfiable);
        assert_eq!(solver.model()[0], Value::True);
        assert_eq!(solver.model()[2], Value::True);
    }

    #[test]
    fn assumption_against_a_unit_fails() {
        let mut solver = solver_for("p cnf 1 1\n1 0\n", &Config::default());

        assert_eq!(
            solver.solve_limited(&[Lit::negative(0)]),
            Report::Unsatisfiable
        );
        assert!(solver.is_ok());
    }
}
