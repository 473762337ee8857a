//! On-disk save slot and result history.
//!
//! Both files are JSON. Anything that fails to read, parse or validate is
//! logged and treated as absent, so a corrupt file never blocks a new game.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use pair_em_up_core::{ResultHistory, SessionSnapshot};

use crate::config::AppConfig;

#[derive(Debug, Clone)]
pub struct Store {
    save_path: PathBuf,
    results_path: PathBuf,
}

impl Store {
    pub fn new(save_path: impl Into<PathBuf>, results_path: impl Into<PathBuf>) -> Self {
        Self {
            save_path: save_path.into(),
            results_path: results_path.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.save_path(), config.results_path())
    }

    /// Read the save slot, ignoring a missing or corrupt file
    pub fn load_save(&self) -> Option<SessionSnapshot> {
        let json = read_optional(&self.save_path)?;
        match SessionSnapshot::from_json(&json) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                warn!(path = %self.save_path.display(), error = %err, "ignoring saved game");
                None
            }
        }
    }

    /// Mirror the save slot to disk; `None` removes the file
    pub fn write_save(&self, snapshot: Option<&SessionSnapshot>) -> Result<()> {
        match snapshot {
            Some(snapshot) => write_atomic(&self.save_path, &snapshot.to_json()?),
            None => match fs::remove_file(&self.save_path) {
                Ok(()) => Ok(()),
                Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
                Err(err) => Err(err)
                    .with_context(|| format!("removing {}", self.save_path.display())),
            },
        }
    }

    /// Read the result history, starting empty on a missing or corrupt file
    pub fn load_results(&self) -> ResultHistory {
        let Some(json) = read_optional(&self.results_path) else {
            return ResultHistory::new();
        };
        serde_json::from_str(&json).unwrap_or_else(|err| {
            warn!(path = %self.results_path.display(), error = %err, "ignoring result history");
            ResultHistory::new()
        })
    }

    pub fn write_results(&self, history: &ResultHistory) -> Result<()> {
        write_atomic(&self.results_path, &serde_json::to_string_pretty(history)?)
    }
}

fn read_optional(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(json) => Some(json),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no file");
            None
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "read failed");
            None
        }
    }
}

/// Write via a sibling temp file so a crash never leaves half a file
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, contents).with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("replacing {}", path.display()))?;
    Ok(())
}
