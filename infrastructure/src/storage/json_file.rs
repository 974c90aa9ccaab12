//! One JSON file per conversation key.

use async_trait::async_trait;
use buddy_application::{ConversationStore, StoreError};
use buddy_domain::Message;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File-backed conversation store.
///
/// Each key lives in `<dir>/<key>.json`. Key characters outside
/// `[A-Za-z0-9_-]` are replaced with `_`. Saves write a sibling temp file and
/// rename it over the target, so a slot is always either the old or the new
/// conversation, never a mix.
pub struct JsonFileConversationStore {
    dir: PathBuf,
}

impl JsonFileConversationStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

#[async_trait]
impl ConversationStore for JsonFileConversationStore {
    async fn load(&self, key: &str) -> Result<Option<Vec<Message>>, StoreError> {
        let path = self.path_for(key);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No stored conversation at {}", path.display());
                return Ok(None);
            }
            Err(e) => return Err(StoreError::Io(e)),
        };

        let messages: Vec<Message> = serde_json::from_str(&content)
            .map_err(|e| StoreError::Corrupt(format!("{}: {}", path.display(), e)))?;
        Ok(Some(messages))
    }

    async fn save(&self, key: &str, messages: &[Message]) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let json =
            serde_json::to_vec(messages).map_err(|e| StoreError::Serialize(e.to_string()))?;

        tokio::fs::create_dir_all(&self.dir).await?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json).await?;
        tokio::fs::rename(&tmp, &path).await?;

        debug!("Saved {} message(s) to {}", messages.len(), path.display());
        Ok(())
    }
}
