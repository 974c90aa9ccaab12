//! Chat message entity

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Origin of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message in a conversation (Entity)
///
/// Stored as `{"text": ..., "sender": "user" | "bot"}`. Older histories used
/// `message` as the text field, which is still accepted when reading. Stored
/// messages with blank text are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredMessage")]
pub struct Message {
    text: String,
    sender: Sender,
}

/// On-disk shape, validated into a [`Message`]
#[derive(Deserialize)]
struct StoredMessage {
    #[serde(alias = "message")]
    text: String,
    sender: Sender,
}

impl TryFrom<StoredMessage> for Message {
    type Error = DomainError;

    fn try_from(stored: StoredMessage) -> Result<Self, Self::Error> {
        Message::try_new(stored.text, stored.sender)
    }
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
        }
    }

    /// Create a message, rejecting whitespace-only text
    pub fn try_new(text: impl Into<String>, sender: Sender) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::EmptyMessage);
        }
        Ok(Self { text, sender })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn is_from_user(&self) -> bool {
        self.sender == Sender::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(Message::user("hello")).unwrap();
        assert_eq!(json, serde_json::json!({"text": "hello", "sender": "user"}));
    }

    #[test]
    fn test_reads_legacy_message_field() {
        let msg: Message =
            serde_json::from_str(r#"{"message": "Hi there", "sender": "bot"}"#).unwrap();
        assert_eq!(msg, Message::bot("Hi there"));
    }

    #[test]
    fn test_unknown_sender_is_rejected() {
        let result = serde_json::from_str::<Message>(r#"{"text": "x", "sender": "model"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_stored_text_is_rejected() {
        for json in [
            r#"{"text": "", "sender": "bot"}"#,
            r#"{"message": "  ", "sender": "user"}"#,
        ] {
            assert!(serde_json::from_str::<Message>(json).is_err(), "json: {json}");
        }
    }

    #[test]
    fn test_try_new_rejects_blank_text() {
        assert_eq!(
            Message::try_new("  ", Sender::Bot),
            Err(DomainError::EmptyMessage)
        );
        assert!(Message::try_new("ok", Sender::User).unwrap().is_from_user());
    }
}
