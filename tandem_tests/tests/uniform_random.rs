mod uniform_random {
    use tandem_sat::config::Config;
    use tandem_sat::reports::Report;
    use tandem_tests::{model_satisfies, solver_for, uniform_random_3sat};

    // Fifty variables at clause/variable ratio three, under a thousand-conflict budget:
    // a satisfying valuation is verified when found, and an exhausted budget is acceptable.
    #[test]
    fn budgeted_fifty_variable_instances() {
        for seed in 0..8 {
            let dimacs = uniform_random_3sat(50, 150, seed);
            let mut solver = solver_for(&dimacs, &Config::default());
            solver.set_conf_budget(1000);

            match solver.solve_limited(&[]) {
                Report::Satisfiable => {
                    assert!(
                        model_satisfies(&dimacs, solver.model()),
                        "model fails the formula of seed {seed}",
                    );
                }
                Report::Unsatisfiable | Report::Unknown => {}
            }
        }
    }

    #[test]
    fn a_budget_of_zero_conflicts_still_terminates() {
        let dimacs = uniform_random_3sat(50, 150, 3);
        let mut solver = solver_for(&dimacs, &Config::default());
        solver.set_conf_budget(0);
        // Any report is fine; the point is an exit without search.
        let _ = solver.solve_limited(&[]);
    }

    #[test]
    fn random_decisions_still_verify() {
        let mut config = Config::default();
        config.random_var_freq = 0.1;
        config.rnd_init_act = true;

        let dimacs = uniform_random_3sat(40, 120, 11);
        let mut solver = solver_for(&dimacs, &config);
        if solver.solve() == Report::Satisfiable {
            assert!(model_satisfies(&dimacs, solver.model()));
        }
    }
}
