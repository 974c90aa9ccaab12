//! Conversation storage adapters.
//!
//! Both adapters implement the
//! [`ConversationStore`](buddy_application::ConversationStore) port and keep
//! the stored value as the JSON array `[{"text": ..., "sender": ...}, ...]`.

mod json_file;
mod memory;

pub use json_file::JsonFileConversationStore;
pub use memory::InMemoryConversationStore;
