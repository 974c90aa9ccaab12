//! Completion endpoint configuration from TOML (`[completion]` section)

use super::{ConfigIssue, Severity};
use buddy_application::ChatSessionConfig;
use serde::{Deserialize, Serialize};

/// Raw completion endpoint configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCompletionConfig {
    /// Base URL of the generative-language API (without the model path).
    pub base_url: String,
    /// Model name, e.g. "gemini-2.0-flash".
    pub model: String,
    /// Environment variable holding the API key (default: "GEMINI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (prefer the env var).
    pub api_key: Option<String>,
    /// Per-request timeout in seconds; 0 disables it.
    pub request_timeout_secs: u64,
}

impl Default for FileCompletionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.0-flash".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            api_key: None,
            request_timeout_secs: 60,
        }
    }
}

impl FileCompletionConfig {
    /// Resolve the API key from the process environment, then `api_key`.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    /// Resolve the API key using `lookup` for environment access.
    pub fn resolve_api_key_with(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Option<String> {
        lookup(&self.api_key_env)
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                self.api_key
                    .clone()
                    .filter(|key| !key.trim().is_empty())
            })
    }

    pub fn to_session_config(&self) -> ChatSessionConfig {
        ChatSessionConfig::from_timeout_secs(self.request_timeout_secs)
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.model.trim().is_empty() {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                field: "completion.model",
                message: "completion.model cannot be empty".to_string(),
            });
        }

        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                field: "completion.base_url",
                message: "completion.base_url cannot be empty".to_string(),
            });
        } else if !base_url.starts_with("https://") && !base_url.starts_with("http://") {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                field: "completion.base_url",
                message: format!("completion.base_url must be an http(s) URL, got '{base_url}'"),
            });
        }

        if self.api_key.is_some() {
            issues.push(ConfigIssue {
                severity: Severity::Warning,
                field: "completion.api_key",
                message: format!(
                    "completion.api_key stores a secret in a config file; prefer ${}",
                    self.api_key_env
                ),
            });
        }

        issues
    }
}
