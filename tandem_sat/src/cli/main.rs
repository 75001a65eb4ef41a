//! The comparative-analysis binary: several solvers over their formulas, sampled as they run.

use std::path::PathBuf;
use std::time::Duration;

use clap::{value_parser, Arg, Command};

use tandem_sat::harness::{self, HarnessConfig};
use tandem_sat::types::err::ErrorKind;

fn cli() -> Command {
    Command::new("tandem_sat")
        .about("Runs a solver per configured formula, sampling runtime metrics from each")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .default_value("config.json")
                .help("The JSON configuration document"),
        )
        .arg(
            Arg::new("sample_interval")
                .long("sample-interval")
                .value_name("MILLISECONDS")
                .value_parser(value_parser!(u64))
                .default_value("2000")
                .help("How often the sampler reads solver counters"),
        )
}

fn main() {
    env_logger::init();

    let matches = cli().get_matches();
    let config_path: &PathBuf = matches.get_one("config").expect("defaulted");
    let interval = Duration::from_millis(*matches.get_one("sample_interval").expect("defaulted"));

    let config = match HarnessConfig::load(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(404);
        }
    };

    match harness::run(&config, interval) {
        Ok(outcome) => {
            for (entry, report) in config.cnf_files.iter().zip(&outcome.reports) {
                println!("{}: {report}", entry.path.display());
            }
            std::process::exit(outcome.exit_code());
        }
        Err(e @ (ErrorKind::Config(_) | ErrorKind::Io(_) | ErrorKind::Parse(_))) => {
            eprintln!("Fatal: {e}");
            std::process::exit(404);
        }
        Err(e) => {
            eprintln!("Fatal: {e}");
            std::process::exit(1);
        }
    }
}
