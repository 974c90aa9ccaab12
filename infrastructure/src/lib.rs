//! Infrastructure layer for buddy-chat
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer, plus configuration file loading.

pub mod completion;
pub mod config;
pub mod logging;
pub mod storage;

// Re-export commonly used types
pub use completion::GeminiCompletionClient;
pub use config::{
    ConfigError, ConfigIssue, ConfigLoader, FileCompletionConfig, FileConfig, FileLoggingConfig,
    FileStorageConfig, Severity,
};
pub use logging::JsonlTranscriptLogger;
pub use storage::{InMemoryConversationStore, JsonFileConversationStore};
