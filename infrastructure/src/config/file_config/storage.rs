//! Storage configuration from TOML (`[storage]` section)

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw storage configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Directory holding conversation files (default: platform data dir).
    pub data_dir: Option<String>,
    /// Keep conversations in memory only.
    pub ephemeral: bool,
}

impl FileStorageConfig {
    /// Directory conversation files go into
    pub fn resolve_data_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.data_dir {
            Some(dir) => Ok(expand_home(dir)),
            None => dirs::data_dir()
                .map(|d| d.join("buddy-chat"))
                .ok_or(ConfigError::NoDataDir),
        }
    }
}

/// Expand a leading `~/` to the home directory
pub(crate) fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}
