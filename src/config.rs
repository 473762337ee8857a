//! Runtime configuration for the terminal game.

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

pub const DEFAULT_DATA_DIR: &str = ".pair-em-up";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Seed for tile generation and shuffling
    pub seed: u32,
    /// Directory holding `save.json` and `results.json`
    pub data_dir: PathBuf,
    /// Log file; logging is off when unset
    pub log_path: Option<PathBuf>,
    /// `tracing` filter directive
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            log_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Create from `PAIRUP_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank values fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = get("PAIRUP_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(clock_seed);

        let data_dir = get("PAIRUP_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let log_path = get("PAIRUP_LOG_PATH").map(PathBuf::from);

        let log_filter = get("PAIRUP_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Self {
            seed,
            data_dir,
            log_path,
            log_filter,
        }
    }

    pub fn save_path(&self) -> PathBuf {
        self.data_dir.join("save.json")
    }

    pub fn results_path(&self) -> PathBuf {
        self.data_dir.join("results.json")
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
