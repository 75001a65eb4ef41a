/*!
The harness configuration document.

A single JSON mapping with the recognised keys:

```json
{
    "cpu_lim": 0,
    "mem_lim": 0,
    "verbosity": true,
    "output": {
        "log_directory": "output",
        "result_directory": "output",
        "graph_directory": "output",
        "graph_file": "final_graph"
    },
    "metrics": { "nDecisions": true, "clause_variable_ratio": true },
    "cnf_files": [ { "path": "formula.cnf", "log_file": "formula.log" } ]
}
```

Only `metrics` is required.
`cpu_lim` is in seconds and `mem_lim` in megabytes, zero meaning unlimited; both bound each solver individually.
`verbosity` is an integer level, with a boolean accepted as zero or one.
Unlisted `log_file` and `result_file` names derive from the formula path, with separators flattened.
*/

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::config::Config;
use crate::types::err::ConfigError;

/// Where the harness writes its files.
#[derive(Clone, Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_directory")]
    pub log_directory: PathBuf,

    #[serde(default = "default_directory")]
    pub result_directory: PathBuf,

    #[serde(default = "default_directory")]
    pub graph_directory: PathBuf,

    #[serde(default = "default_graph_file")]
    pub graph_file: String,
}

fn default_directory() -> PathBuf {
    PathBuf::from("output")
}

fn default_graph_file() -> String {
    "final_graph".to_owned()
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            log_directory: default_directory(),
            result_directory: default_directory(),
            graph_directory: default_directory(),
            graph_file: default_graph_file(),
        }
    }
}

/// One formula for one solver, with optional file name overrides.
#[derive(Clone, Debug, Deserialize)]
pub struct CnfEntry {
    pub path: PathBuf,

    #[serde(default)]
    pub log_file: Option<String>,

    #[serde(default)]
    pub result_file: Option<String>,
}

impl CnfEntry {
    /// The formula path with directory separators flattened, for derived file names.
    fn flat_name(&self) -> String {
        self.path
            .to_string_lossy()
            .replace(['/', '\\'], "_")
    }

    /// Where this solver's log goes.
    pub fn log_path(&self, directory: &Path) -> PathBuf {
        match &self.log_file {
            Some(name) => directory.join(name),
            None => directory.join(format!("{}_stats.log", self.flat_name())),
        }
    }

    /// Where this solver's result goes.
    pub fn result_path(&self, directory: &Path) -> PathBuf {
        match &self.result_file {
            Some(name) => directory.join(name),
            None => directory.join(format!("{}_result.txt", self.flat_name())),
        }
    }
}

/// The whole configuration document.
#[derive(Clone, Debug, Deserialize)]
pub struct HarnessConfig {
    /// Per-solver time limit in seconds, zero for unlimited.
    #[serde(default)]
    pub cpu_lim: u64,

    /// Per-solver clause memory limit in megabytes, zero for unlimited.
    #[serde(default)]
    pub mem_lim: u64,

    /// Verbosity level; a boolean reads as zero or one.
    #[serde(default, deserialize_with = "bool_or_level")]
    pub verbosity: u32,

    #[serde(default)]
    pub output: OutputConfig,

    /// Which metric series to record. Required, even if empty.
    pub metrics: Option<BTreeMap<String, bool>>,

    #[serde(default)]
    pub cnf_files: Vec<CnfEntry>,
}

fn bool_or_level<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Verbosity {
        Level(u32),
        Switch(bool),
    }

    Ok(match Verbosity::deserialize(deserializer)? {
        Verbosity::Level(level) => level,
        Verbosity::Switch(switch) => switch as u32,
    })
}

impl HarnessConfig {
    /// Loads and validates the document at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file =
            File::open(path).map_err(|e| ConfigError::Unreadable(path.to_owned(), e))?;
        let config: HarnessConfig =
            serde_json::from_reader(BufReader::new(file)).map_err(ConfigError::Json)?;

        if config.metrics.is_none() {
            return Err(ConfigError::MissingMetrics);
        }
        Ok(config)
    }

    /// The metric flags, present by validation.
    pub fn metric_flags(&self) -> &BTreeMap<String, bool> {
        self.metrics.as_ref().expect("validated on load")
    }

    /// The per-solver configuration this document implies.
    pub fn solver_config(&self) -> Config {
        let mut config = Config::default();
        config.verbosity = self.verbosity;
        config.memory_limit_mb = self.mem_lim;
        if self.cpu_lim != 0 {
            config.time_limit = Some(Duration::from_secs(self.cpu_lim));
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<HarnessConfig, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn minimal_document() {
        let config = parse(r#"{ "metrics": {} }"#).unwrap();
        assert_eq!(config.cpu_lim, 0);
        assert_eq!(config.verbosity, 0);
        assert_eq!(config.output.graph_file, "final_graph");
        assert!(config.cnf_files.is_empty());
    }

    #[test]
    fn boolean_verbosity() {
        let config = parse(r#"{ "metrics": {}, "verbosity": true }"#).unwrap();
        assert_eq!(config.verbosity, 1);
        let config = parse(r#"{ "metrics": {}, "verbosity": 2 }"#).unwrap();
        assert_eq!(config.verbosity, 2);
    }

    #[test]
    fn derived_file_names_flatten_separators() {
        let config = parse(
            r#"{ "metrics": {}, "cnf_files": [ { "path": "build/f.cnf" } ] }"#,
        )
        .unwrap();
        let entry = &config.cnf_files[0];
        assert_eq!(
            entry.log_path(Path::new("logs")),
            PathBuf::from("logs/build_f.cnf_stats.log")
        );
        assert_eq!(
            entry.result_path(Path::new("out")),
            PathBuf::from("out/build_f.cnf_result.txt")
        );
    }

    #[test]
    fn overridden_file_names() {
        let config = parse(
            r#"{ "metrics": {}, "cnf_files": [ { "path": "f.cnf", "log_file": "f.log", "result_file": "f.res" } ] }"#,
        )
        .unwrap();
        let entry = &config.cnf_files[0];
        assert_eq!(entry.log_path(Path::new("d")), PathBuf::from("d/f.log"));
        assert_eq!(entry.result_path(Path::new("d")), PathBuf::from("d/f.res"));
    }

    #[test]
    fn solver_config_carries_limits() {
        let config = parse(r#"{ "metrics": {}, "cpu_lim": 5, "mem_lim": 64 }"#).unwrap();
        let solver_config = config.solver_config();
        assert_eq!(solver_config.time_limit, Some(Duration::from_secs(5)));
        assert_eq!(solver_config.memory_limit_mb, 64);
    }
}
