use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::coherence::Preset;
use crate::measures::DEFAULT_EPSILON;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Command-line
/// flags override whatever is set here.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    /// Preset used by `score` when no `--measure` is given.
    pub measure: Preset,
    /// Smoothing constant added inside logarithms.
    pub epsilon: f64,
    /// Worker threads for scoring; None lets rayon decide.
    pub threads: Option<usize>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable has a default; a value that is set but malformed is an
    /// error rather than silently ignored.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key → value source (the environment, or a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup("COHERENCE_DB_PATH").unwrap_or_else(default_db_path);

        let measure = match lookup("COHERENCE_MEASURE") {
            Some(name) => name
                .parse::<Preset>()
                .with_context(|| format!("COHERENCE_MEASURE={name} is not a known preset"))?,
            None => Preset::CV,
        };

        let epsilon = match lookup("COHERENCE_EPSILON") {
            Some(raw) => {
                let value: f64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("COHERENCE_EPSILON={raw} is not a number"))?;
                if !(value.is_finite() && value > 0.0) {
                    anyhow::bail!("COHERENCE_EPSILON must be a positive number, got {raw}");
                }
                value
            }
            None => DEFAULT_EPSILON,
        };

        let threads = match lookup("COHERENCE_THREADS") {
            Some(raw) => {
                let value: usize = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("COHERENCE_THREADS={raw} is not a whole number"))?;
                if value == 0 {
                    anyhow::bail!("COHERENCE_THREADS must be at least 1");
                }
                Some(value)
            }
            None => None,
        };

        Ok(Self {
            db_path,
            measure,
            epsilon,
            threads,
        })
    }

    /// Check that an index has been built at `db_path`.
    /// Call this before any operation that reads the corpus.
    pub fn require_index(&self) -> Result<()> {
        if !Path::new(&self.db_path).exists() {
            anyhow::bail!(
                "No corpus index at {}.\n\
                 Run `topic-coherence index --corpus <file>` to build one,\n\
                 or set COHERENCE_DB_PATH to an existing index.",
                self.db_path
            );
        }
        Ok(())
    }
}

/// `<data dir>/topic-coherence/index.db`, or `./coherence-index.db` when the
/// platform has no data directory.
fn default_db_path() -> String {
    dirs::data_dir()
        .map(|dir| dir.join("topic-coherence").join("index.db"))
        .unwrap_or_else(|| PathBuf::from("./coherence-index.db"))
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.measure, Preset::CV);
        assert_eq!(config.epsilon, DEFAULT_EPSILON);
        assert_eq!(config.threads, None);
        assert!(config.db_path.ends_with("index.db"));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("COHERENCE_DB_PATH", "/tmp/x.db"),
            ("COHERENCE_MEASURE", "umass"),
            ("COHERENCE_EPSILON", "1e-6"),
            ("COHERENCE_THREADS", "4"),
        ])
        .unwrap();
        assert_eq!(config.db_path, "/tmp/x.db");
        assert_eq!(config.measure, Preset::UMass);
        assert_eq!(config.epsilon, 1e-6);
        assert_eq!(config.threads, Some(4));
    }

    #[test]
    fn test_malformed_values_are_errors() {
        assert!(config_from(&[("COHERENCE_MEASURE", "C_Z")]).is_err());
        assert!(config_from(&[("COHERENCE_EPSILON", "small")]).is_err());
        assert!(config_from(&[("COHERENCE_EPSILON", "0")]).is_err());
        assert!(config_from(&[("COHERENCE_THREADS", "0")]).is_err());
        assert!(config_from(&[("COHERENCE_THREADS", "-2")]).is_err());
    }

    #[test]
    fn test_require_index_missing_file() {
        let config = config_from(&[("COHERENCE_DB_PATH", "/nonexistent/dir/index.db")]).unwrap();
        assert!(config.require_index().is_err());
    }
}
