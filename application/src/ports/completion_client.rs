//! Completion client port
//!
//! Defines the interface for the remote text-generation endpoint.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during a completion request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    #[error("Prompt is empty")]
    EmptyPrompt,

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Timeout")]
    Timeout,

    #[error("Request cancelled")]
    Cancelled,
}

impl CompletionError {
    /// Short machine-readable name, used in logs and transcripts
    pub fn kind(&self) -> &'static str {
        match self {
            CompletionError::EmptyPrompt => "empty_prompt",
            CompletionError::Network(_) => "network",
            CompletionError::Http { .. } => "http",
            CompletionError::Timeout => "timeout",
            CompletionError::Cancelled => "cancelled",
        }
    }
}

/// Client for a single-shot text completion
///
/// One call issues exactly one outbound request; there is no retry at this
/// level. A response without usable text is not an error: implementations
/// answer with [`FALLBACK_REPLY`](buddy_domain::FALLBACK_REPLY) instead.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Request a completion for `prompt`.
    ///
    /// A prompt that is empty after trimming is rejected with
    /// [`CompletionError::EmptyPrompt`] without touching the network.
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}
