//! Chat session parameters.
//!
//! [`ChatSessionConfig`] groups the knobs that control how
//! [`ChatSessionUseCase`](crate::use_cases::chat_session::ChatSessionUseCase)
//! drives a completion request. These are application-layer concerns, not
//! domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default upper bound for a single completion request.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Request lifecycle parameters for a chat session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSessionConfig {
    /// Upper bound for one completion request. `None` waits for the
    /// transport to give up on its own.
    pub request_timeout: Option<Duration>,
}

impl Default for ChatSessionConfig {
    fn default() -> Self {
        Self {
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
        }
    }
}

impl ChatSessionConfig {
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn without_request_timeout(mut self) -> Self {
        self.request_timeout = None;
        self
    }

    /// Build from a number of seconds as found in config files, where `0`
    /// disables the timeout.
    pub fn from_timeout_secs(secs: u64) -> Self {
        let config = Self::default();
        if secs == 0 {
            config.without_request_timeout()
        } else {
            config.with_request_timeout(Duration::from_secs(secs))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_timeout() {
        assert_eq!(
            ChatSessionConfig::default().request_timeout,
            Some(Duration::from_secs(60))
        );
    }

    #[test]
    fn test_zero_seconds_disables_timeout() {
        assert_eq!(ChatSessionConfig::from_timeout_secs(0).request_timeout, None);
        assert_eq!(
            ChatSessionConfig::from_timeout_secs(5).request_timeout,
            Some(Duration::from_secs(5))
        );
    }
}
