//! Prompt value object

use crate::core::error::DomainError;

/// Text submitted by the user for one turn (Value Object)
///
/// Guaranteed to contain at least one non-whitespace character. The text is
/// kept exactly as typed; trimming is only used for validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    text: String,
}

impl Prompt {
    /// Try to create a prompt, rejecting empty or whitespace-only input
    pub fn try_new(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            Err(DomainError::EmptyMessage)
        } else {
            Ok(Self { text })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_keeps_text_as_typed() {
        let p = Prompt::try_new("  hello  ").unwrap();
        assert_eq!(p.as_str(), "  hello  ");
    }

    #[test]
    fn test_prompt_rejects_blank() {
        assert_eq!(Prompt::try_new(""), Err(DomainError::EmptyMessage));
        assert_eq!(Prompt::try_new(" \n\t "), Err(DomainError::EmptyMessage));
    }
}
