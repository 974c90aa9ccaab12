//! Process-local conversation store.

use async_trait::async_trait;
use buddy_application::{ConversationStore, StoreError};
use buddy_domain::Message;
use std::collections::HashMap;
use std::sync::Mutex;

/// Keeps serialized conversations in memory. Nothing survives a restart.
///
/// Values are stored as JSON text, the same as on disk, so behavior matches
/// the file store apart from durability.
#[derive(Default)]
pub struct InMemoryConversationStore {
    slots: Mutex<HashMap<String, String>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn load(&self, key: &str) -> Result<Option<Vec<Message>>, StoreError> {
        let raw = {
            let slots = self
                .slots
                .lock()
                .map_err(|e| StoreError::Unavailable(e.to_string()))?;
            slots.get(key).cloned()
        };

        raw.map(|json| {
            serde_json::from_str(&json).map_err(|e| StoreError::Corrupt(e.to_string()))
        })
        .transpose()
    }

    async fn save(&self, key: &str, messages: &[Message]) -> Result<(), StoreError> {
        let json =
            serde_json::to_string(messages).map_err(|e| StoreError::Serialize(e.to_string()))?;
        self.slots
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?
            .insert(key.to_string(), json);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buddy_domain::SEED_GREETING;

    #[tokio::test]
    async fn test_round_trip() {
        let store = InMemoryConversationStore::new();
        assert!(store.load("k").await.unwrap().is_none());

        let messages = vec![Message::bot(SEED_GREETING), Message::user("hi")];
        store.save("k", &messages).await.unwrap();

        assert_eq!(store.load("k").await.unwrap(), Some(messages));
        assert_eq!(store.slots.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_save_replaces_previous_value() {
        let store = InMemoryConversationStore::new();
        store
            .save("k", &[Message::user("a"), Message::bot("b")])
            .await
            .unwrap();
        store.save("k", &[Message::bot(SEED_GREETING)]).await.unwrap();

        assert_eq!(
            store.load("k").await.unwrap(),
            Some(vec![Message::bot(SEED_GREETING)])
        );
    }
}
