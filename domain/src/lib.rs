//! Domain layer for buddy-chat
//!
//! This crate contains the conversation entities and their invariants.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Message**: a single chat bubble, authored by the user or the bot
//! - **Conversation**: the append-only message log, never empty, always
//!   starting from the seed greeting on first use
//! - **UserIdentity**: who owns the conversation; passed explicitly into the
//!   session rather than read from ambient state

pub mod conversation;
pub mod core;
pub mod identity;

// Re-export commonly used types
pub use conversation::{
    entities::{Conversation, FALLBACK_REPLY, NETWORK_ERROR_REPLY, SEED_GREETING},
    message::{Message, Sender},
};
pub use core::{error::DomainError, prompt::Prompt};
pub use identity::UserIdentity;
