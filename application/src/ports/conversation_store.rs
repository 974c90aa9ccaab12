//! Conversation store port
//!
//! Durable key/value slot holding a serialized message log.

use async_trait::async_trait;
use buddy_domain::Message;
use thiserror::Error;

/// Errors that can occur while reading or writing a conversation slot
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored conversation is corrupt: {0}")]
    Corrupt(String),

    #[error("Failed to serialize conversation: {0}")]
    Serialize(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Durable storage for conversations
///
/// Each key maps to one slot holding the full message sequence in order.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Read the messages stored under `key`.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet.
    async fn load(&self, key: &str) -> Result<Option<Vec<Message>>, StoreError>;

    /// Replace the whole slot under `key` with `messages`.
    ///
    /// This is a full overwrite, never an append, so repeating a save with
    /// the same messages leaves the store unchanged.
    async fn save(&self, key: &str, messages: &[Message]) -> Result<(), StoreError>;
}
