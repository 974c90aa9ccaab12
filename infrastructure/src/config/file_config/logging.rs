//! Logging configuration from TOML (`[logging]` section)

use super::storage::expand_home;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Write a JSONL transcript of every chat event.
    pub transcript: bool,
    /// Directory for the rolling log file and transcripts.
    pub log_dir: Option<String>,
}

impl FileLoggingConfig {
    /// Log directory, falling back to `<data dir>/logs` when none is set
    pub fn resolve_log_dir(&self, data_dir: Option<&PathBuf>) -> Option<PathBuf> {
        match &self.log_dir {
            Some(dir) => Some(expand_home(dir)),
            None => data_dir.map(|d| d.join("logs")),
        }
    }
}
