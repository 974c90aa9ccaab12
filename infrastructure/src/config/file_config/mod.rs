//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly; conversion into application types happens
//! at the edges (`to_session_config`, `resolve_api_key`).

mod completion;
mod logging;
mod storage;

pub use completion::FileCompletionConfig;
pub use logging::FileLoggingConfig;
pub use storage::FileStorageConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while turning configuration into live adapters
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no API key configured: set the {env} environment variable or completion.api_key")]
    MissingApiKey { env: String },

    #[error("invalid completion.base_url: {0}")]
    InvalidBaseUrl(String),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),

    #[error("no data directory available; set storage.data_dir")]
    NoDataDir,
}

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub field: &'static str,
    pub message: String,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Completion endpoint settings
    pub completion: FileCompletionConfig,
    /// Conversation storage settings
    pub storage: FileStorageConfig,
    /// Log and transcript settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.completion.validate();

        if self.storage.ephemeral && self.storage.data_dir.is_some() {
            issues.push(ConfigIssue {
                severity: Severity::Warning,
                field: "storage.data_dir",
                message: "storage.data_dir is ignored because storage.ephemeral is set"
                    .to_string(),
            });
        }

        issues
    }

    /// True if any issue is fatal
    pub fn has_errors(issues: &[ConfigIssue]) -> bool {
        issues.iter().any(|i| i.severity == Severity::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[completion]
base_url = "http://localhost:8080/v1beta"
model = "gemini-2.5-flash"
api_key_env = "MY_KEY"
request_timeout_secs = 15

[storage]
data_dir = "/tmp/buddy"

[logging]
transcript = true
log_dir = "/tmp/buddy/logs"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.completion.base_url, "http://localhost:8080/v1beta");
        assert_eq!(config.completion.model, "gemini-2.5-flash");
        assert_eq!(config.completion.api_key_env, "MY_KEY");
        assert_eq!(config.completion.request_timeout_secs, 15);
        assert_eq!(config.storage.data_dir.as_deref(), Some("/tmp/buddy"));
        assert!(!config.storage.ephemeral);
        assert!(config.logging.transcript);
        assert_eq!(config.logging.log_dir.as_deref(), Some("/tmp/buddy/logs"));
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: FileConfig = toml::from_str("[completion]\nmodel = \"m\"\n").unwrap();
        assert_eq!(config.completion.model, "m");
        assert_eq!(
            config.completion.base_url,
            FileCompletionConfig::default().base_url
        );
        assert_eq!(config.storage, FileStorageConfig::default());
    }

    #[test]
    fn test_validate_reports_bad_completion_settings() {
        let mut config = FileConfig::default();
        config.completion.model = "  ".to_string();
        config.completion.base_url = "ftp://example.com".to_string();

        let issues = config.validate();
        assert_eq!(issues.len(), 2);
        assert!(FileConfig::has_errors(&issues));
        assert!(issues.iter().any(|i| i.field == "completion.model"));
        assert!(issues.iter().any(|i| i.field == "completion.base_url"));
    }

    #[test]
    fn test_validate_warns_on_ignored_data_dir() {
        let mut config = FileConfig::default();
        config.storage.ephemeral = true;
        config.storage.data_dir = Some("/tmp/x".to_string());

        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert!(!FileConfig::has_errors(&issues));
    }
}
