mod phole {
    use tandem_sat::config::Config;
    use tandem_sat::reports::Report;
    use tandem_tests::{model_satisfies, pigeonhole, report_for, solver_for};

    #[test]
    fn three_into_two() {
        // Six variables, nine clauses.
        let dimacs = pigeonhole(3, 2);
        assert_eq!(tandem_tests::clauses_of(&dimacs).len(), 9);
        assert_eq!(report_for(&dimacs, &Config::default()), Report::Unsatisfiable);
    }

    #[test]
    fn five_into_four() {
        assert_eq!(
            report_for(&pigeonhole(5, 4), &Config::default()),
            Report::Unsatisfiable
        );
    }

    #[test]
    fn seven_into_six() {
        assert_eq!(
            report_for(&pigeonhole(7, 6), &Config::default()),
            Report::Unsatisfiable
        );
    }

    #[test]
    fn enough_holes() {
        let dimacs = pigeonhole(4, 4);
        let mut solver = solver_for(&dimacs, &Config::default());
        assert_eq!(solver.solve(), Report::Satisfiable);
        assert!(model_satisfies(&dimacs, solver.model()));
    }
}
