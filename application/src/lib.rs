//! Application layer for buddy-chat
//!
//! This crate contains the chat session use case, its port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ChatSessionConfig;
pub use ports::{
    completion_client::{CompletionClient, CompletionError},
    conversation_store::{ConversationStore, StoreError},
    transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger},
};
pub use use_cases::chat_session::{
    ChatSessionUseCase, ChatSnapshot, SessionPhase, SubmitError, TurnOutcome,
};
