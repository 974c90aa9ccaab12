//! Conversation entity

use super::message::Message;

/// Greeting the bot opens every fresh conversation with.
pub const SEED_GREETING: &str = "Hi there! 😊 How can I help you today?";

/// Reply used when the completion service answers without any usable text.
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't understand that.";

/// Reply appended in place of an answer when the completion request fails.
pub const NETWORK_ERROR_REPLY: &str = "❌ Oops! Network error. Try again.";

/// Ordered message log, newest last (Entity)
///
/// A conversation is never empty: it starts from the seed greeting and only
/// grows by appending. The only way to shrink it is [`reset`](Self::reset),
/// which goes back to the seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// A conversation holding only the seed greeting
    pub fn seeded() -> Self {
        Self {
            messages: vec![Message::bot(SEED_GREETING)],
        }
    }

    /// Rebuild a conversation from stored messages, seeding when there are none
    pub fn from_messages(messages: Vec<Message>) -> Self {
        if messages.is_empty() {
            Self::seeded()
        } else {
            Self { messages }
        }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Drop every message and go back to the seed greeting
    pub fn reset(&mut self) {
        self.messages.clear();
        self.messages.push(Message::bot(SEED_GREETING));
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of user messages with no bot message after them
    pub fn unanswered(&self) -> usize {
        let mut pending = 0usize;
        for message in &self.messages {
            if message.is_from_user() {
                pending += 1;
            } else {
                pending = pending.saturating_sub(1);
            }
        }
        pending
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_has_greeting_only() {
        let conversation = Conversation::seeded();
        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation.messages()[0], Message::bot(SEED_GREETING));
    }

    #[test]
    fn test_from_empty_messages_seeds() {
        let conversation = Conversation::from_messages(Vec::new());
        assert_eq!(conversation, Conversation::seeded());
    }

    #[test]
    fn test_from_messages_keeps_order() {
        let stored = vec![
            Message::bot(SEED_GREETING),
            Message::user("hello"),
            Message::bot("Hi! How are you?"),
        ];
        let conversation = Conversation::from_messages(stored.clone());
        assert_eq!(conversation.messages(), stored.as_slice());
    }

    #[test]
    fn test_reset_after_several_turns() {
        let mut conversation = Conversation::seeded();
        for i in 0..5 {
            conversation.push(Message::user(format!("q{i}")));
            conversation.push(Message::bot(format!("a{i}")));
        }
        assert_eq!(conversation.len(), 11);

        conversation.reset();
        assert_eq!(conversation, Conversation::seeded());
    }

    #[test]
    fn test_unanswered_counts_pending_user_turns() {
        let mut conversation = Conversation::seeded();
        assert_eq!(conversation.unanswered(), 0);
        conversation.push(Message::user("hello"));
        assert_eq!(conversation.unanswered(), 1);
        conversation.push(Message::bot(NETWORK_ERROR_REPLY));
        assert_eq!(conversation.unanswered(), 0);
        assert_eq!(conversation.last(), Some(&Message::bot(NETWORK_ERROR_REPLY)));
    }
}
