//! Conversation domain.
//!
//! - [`message::Message`]: a single chat entry tagged with its [`message::Sender`]
//! - [`entities::Conversation`]: the ordered, append-only message log

pub mod entities;
pub mod message;
