//! Application-level configuration.
//!
//! - [`ChatSessionConfig`]: request lifecycle control for the chat session

pub mod chat_session_config;

pub use chat_session_config::ChatSessionConfig;
