//! Port for structured transcript logging.
//!
//! Defines the [`TranscriptLogger`] trait for recording chat events (user
//! messages, bot replies, failures, clears) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! diagnostic messages, while this port captures the transcript itself in a
//! machine-readable format (JSONL).

use serde_json::Value;

/// A structured transcript event.
pub struct TranscriptEvent {
    /// Event type identifier (e.g., "user_message", "bot_reply").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl TranscriptEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging transcript events.
///
/// `log` is synchronous and non-fallible: a logging failure must never
/// disturb the chat session.
pub trait TranscriptLogger: Send + Sync {
    fn log(&self, event: TranscriptEvent);
}

/// No-op implementation for tests and when transcripts are disabled.
pub struct NoTranscriptLogger;

impl TranscriptLogger for NoTranscriptLogger {
    fn log(&self, _event: TranscriptEvent) {}
}
