//! Presentation layer for buddy-chat
//!
//! This crate contains the CLI definition, the message formatter, the busy
//! spinner, and the interactive terminal chat.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::ChatRepl;
pub use cli::commands::Cli;
pub use config::ReplConfig;
pub use output::console::ConsoleFormatter;
pub use progress::spinner::BusySpinner;
