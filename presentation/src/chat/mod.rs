//! Interactive chat module
//!
//! Provides a reedline-based terminal chat on top of the chat session.

mod repl;

pub use repl::{ChatRepl, ReplAction};
