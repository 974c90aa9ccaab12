//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Message text cannot be empty")]
    EmptyMessage,

    #[error("Invalid identity: {0}")]
    InvalidIdentity(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_message_display() {
        assert_eq!(
            DomainError::EmptyMessage.to_string(),
            "Message text cannot be empty"
        );
    }
}
