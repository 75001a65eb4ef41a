mod harness {
    use std::fs;
    use std::sync::atomic::Ordering::Relaxed;
    use std::thread;
    use std::time::Duration;

    use tandem_sat::config::Config;
    use tandem_sat::harness::{self, Harness, HarnessConfig};
    use tandem_sat::metrics::SolverShared;
    use tandem_sat::reports::Report;
    use tandem_sat::solver::Solver;
    use tandem_tests::{pigeonhole, uniform_random_3sat};

    fn write_formula(dir: &std::path::Path, name: &str, dimacs: &str) -> String {
        let path = dir.join(name);
        fs::write(&path, dimacs).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn config_for(dir: &std::path::Path, formulas: &[String]) -> HarnessConfig {
        let out = dir.join("out").to_string_lossy().into_owned();
        let entries: Vec<String> = formulas
            .iter()
            .map(|path| format!(r#"{{ "path": "{path}" }}"#))
            .collect();
        let document = format!(
            r#"{{
                "verbosity": true,
                "output": {{
                    "log_directory": "{out}",
                    "result_directory": "{out}",
                    "graph_directory": "{out}",
                    "graph_file": "frame.json"
                }},
                "metrics": {{
                    "nDecisions": true,
                    "nConflicts": true,
                    "clauseDatabaseSize": true,
                    "learnt_clause_count": true,
                    "clause_variable_ratio": true,
                    "avg_lbd": true
                }},
                "cnf_files": [ {} ]
            }}"#,
            entries.join(", "),
        );
        serde_json::from_str(&document).unwrap()
    }

    #[test]
    fn three_solvers_with_consistent_metrics() {
        let dir = tempfile::tempdir().unwrap();
        let formulas = [
            write_formula(dir.path(), "a.cnf", &pigeonhole(6, 5)),
            write_formula(dir.path(), "b.cnf", &uniform_random_3sat(60, 180, 5)),
            write_formula(dir.path(), "c.cnf", &pigeonhole(5, 5)),
        ];
        let config = config_for(dir.path(), &formulas);

        let outcome = harness::run(&config, Duration::from_millis(2)).unwrap();

        assert!(!outcome.interrupted);
        assert_eq!(outcome.reports.len(), 3);
        assert_eq!(outcome.reports[0], Report::Unsatisfiable);
        assert_eq!(outcome.reports[2], Report::Satisfiable);

        for series in &outcome.series {
            // Cheap series advance together under one clock.
            for values in series.series.values() {
                assert_eq!(values.len(), series.ticks.len());
            }

            // The consistent-snapshot series advances under its own clock,
            // always in step with its timestamps.
            assert_eq!(
                series.threaded_ticks.len(),
                series.clause_variable_ratio.len()
            );

            // Both clocks tick upwards, and the monotone counters sample as non-decreasing.
            // (Database sizes may shrink on reduction, and are exempt.)
            assert!(series.ticks.windows(2).all(|w| w[0] < w[1]));
            assert!(series.threaded_ticks.windows(2).all(|w| w[0] < w[1]));
            for monotone in ["nDecisions", "nConflicts"] {
                let values = &series.series[monotone];
                assert!(values.windows(2).all(|w| w[0] <= w[1]));
            }
        }

        // The final frame and the per-solver files all landed.
        let out = dir.path().join("out");
        let frame: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.join("frame.json")).unwrap()).unwrap();
        assert_eq!(frame["solvers"].as_array().unwrap().len(), 3);

        for formula in &formulas {
            let flat = formula.replace(['/', '\\'], "_");
            let result = fs::read_to_string(out.join(format!("{flat}_result.txt"))).unwrap();
            assert!(result.starts_with("SATISFIABLE") || result.starts_with("UNSATISFIABLE"));
            assert!(out.join(format!("{flat}_stats.log")).exists());
        }
    }

    #[test]
    fn a_missing_metrics_mapping_is_fatal() {
        let error = serde_json::from_str::<HarnessConfig>(r#"{ "cnf_files": [] }"#)
            .map(|config| config.metrics.is_none());
        // The key is optional to serde; absence is rejected on load.
        assert_eq!(error.unwrap(), true);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "cnf_files": [] }"#).unwrap();
        assert!(HarnessConfig::load(&path).is_err());
    }

    #[test]
    fn an_interrupt_ends_the_run_with_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let formulas = [write_formula(dir.path(), "hard.cnf", &pigeonhole(10, 9))];
        let config = config_for(dir.path(), &formulas);

        let harness = Harness::build(&config).unwrap();
        let stop = harness.stop_handle();

        let runner = thread::spawn(move || harness.run(Duration::from_millis(2)).unwrap());
        thread::sleep(Duration::from_millis(80));
        stop.request_stop();

        let outcome = runner.join().unwrap();
        assert!(outcome.interrupted);
        assert_eq!(outcome.reports, vec![Report::Unknown]);
    }

    // The count of consistent snapshots never exceeds the count of completed
    // propagation rounds: the solver serves at most one request per fixpoint.
    #[test]
    fn snapshots_are_bounded_by_propagation_rounds() {
        let shared = SolverShared::new();
        let mut solver = Solver::with_shared(Config::default(), shared.clone());
        solver
            .read_dimacs(pigeonhole(7, 6).as_bytes())
            .unwrap();

        let worker = thread::spawn(move || {
            let report = solver.solve();
            solver.shared().sync.close();
            report
        });

        let mut samples: u64 = 0;
        while shared.sync.request().is_some() {
            samples += 1;
        }

        assert_eq!(worker.join().unwrap(), Report::Unsatisfiable);
        assert!(samples <= shared.counters.bcp_rounds.load(Relaxed));
        assert!(shared.counters.conflicts.load(Relaxed) > 0);
    }
}
