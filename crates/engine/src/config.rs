//! Application configuration from environment variables.

use std::path::PathBuf;

use crate::types::MISMATCH_DELAY_MS;

/// Default leaderboard file, relative to the working directory.
pub const DEFAULT_SCORES_PATH: &str = "ranking.txt";

/// Default tracing filter directive.
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub scores_path: PathBuf,
    pub faces_path: Option<PathBuf>,
    pub seed: Option<u32>,
    pub mismatch_delay_ms: u32,
    pub log_path: Option<String>,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scores_path: PathBuf::from(DEFAULT_SCORES_PATH),
            faces_path: None,
            seed: None,
            mismatch_delay_ms: MISMATCH_DELAY_MS,
            log_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Create from `PAIRS_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary variable lookup. Unparseable values fall back
    /// to the defaults; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let scores_path = var("PAIRS_SCORES_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SCORES_PATH));

        let faces_path = var("PAIRS_FACES_PATH").map(PathBuf::from);

        let seed = var("PAIRS_SEED").and_then(|s| s.parse().ok());

        let mismatch_delay_ms = var("PAIRS_MISMATCH_DELAY_MS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(MISMATCH_DELAY_MS);

        let log_path = var("PAIRS_LOG_PATH");

        let log_filter = var("PAIRS_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Self {
            scores_path,
            faces_path,
            seed,
            mismatch_delay_ms,
            log_path,
            log_filter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(config(&[]), AppConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let c = config(&[
            ("PAIRS_SCORES_PATH", "/tmp/scores.txt"),
            ("PAIRS_FACES_PATH", "faces.json"),
            ("PAIRS_SEED", "42"),
            ("PAIRS_MISMATCH_DELAY_MS", "250"),
            ("PAIRS_LOG_PATH", "pairs.log"),
            ("PAIRS_LOG", "debug"),
        ]);
        assert_eq!(c.scores_path, PathBuf::from("/tmp/scores.txt"));
        assert_eq!(c.faces_path, Some(PathBuf::from("faces.json")));
        assert_eq!(c.seed, Some(42));
        assert_eq!(c.mismatch_delay_ms, 250);
        assert_eq!(c.log_path.as_deref(), Some("pairs.log"));
        assert_eq!(c.log_filter, "debug");
    }

    #[test]
    fn invalid_and_blank_values_fall_back() {
        let c = config(&[
            ("PAIRS_SEED", "not-a-number"),
            ("PAIRS_MISMATCH_DELAY_MS", "-5"),
            ("PAIRS_LOG_PATH", "   "),
            ("PAIRS_SCORES_PATH", ""),
        ]);
        assert_eq!(c.seed, None);
        assert_eq!(c.mismatch_delay_ms, MISMATCH_DELAY_MS);
        assert_eq!(c.log_path, None);
        assert_eq!(c.scores_path, PathBuf::from(DEFAULT_SCORES_PATH));
    }
}
