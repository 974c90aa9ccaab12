//! Configuration file loading for buddy-chat
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./buddy.toml` or `./.buddy.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/buddy-chat/config.toml`
//! 4. Environment: `BUDDY_<SECTION>__<KEY>` (e.g. `BUDDY_COMPLETION__MODEL`)
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigError, ConfigIssue, FileCompletionConfig, FileConfig, FileLoggingConfig,
    FileStorageConfig, Severity,
};
pub use loader::ConfigLoader;
