//! User identity.
//!
//! The owner of a conversation is passed explicitly to the chat session.
//! Storage keys are derived from it so different users never share a slot.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Identifier used when no signed-in user is available.
const ANONYMOUS_ID: &str = "anonymous";

/// Storage key the single-user history has always lived under.
const LEGACY_KEY: &str = "chatHistory";

/// Who a conversation belongs to (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserIdentity {
    id: String,
    display_name: Option<String>,
}

impl UserIdentity {
    /// Create an identity from an opaque user id (e.g. an auth provider uid)
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidIdentity("id is empty".to_string()));
        }
        if trimmed.chars().any(|c| c.is_control() || c == '/') {
            return Err(DomainError::InvalidIdentity(format!(
                "id contains forbidden characters: {trimmed:?}"
            )));
        }
        Ok(Self {
            id: trimmed.to_string(),
            display_name: None,
        })
    }

    /// Local single-user identity
    pub fn anonymous() -> Self {
        Self {
            id: ANONYMOUS_ID.to_string(),
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn is_anonymous(&self) -> bool {
        self.id == ANONYMOUS_ID
    }

    /// Key of the store slot holding this user's conversation
    pub fn conversation_key(&self) -> String {
        if self.is_anonymous() {
            LEGACY_KEY.to_string()
        } else {
            format!("chat_history/{}", self.id)
        }
    }
}

impl Default for UserIdentity {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl std::fmt::Display for UserIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.display_name {
            Some(name) => write!(f, "{} ({})", name, self.id),
            None => f.write_str(&self.id),
        }
    }
}
