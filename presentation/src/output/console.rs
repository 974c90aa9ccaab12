//! Console output formatter for chat messages

use buddy_domain::{FALLBACK_REPLY, Message, NETWORK_ERROR_REPLY, Sender, UserIdentity};
use colored::Colorize;

/// Formats conversation messages for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format one message as `buddy> ...` or `you> ...`
    ///
    /// Continuation lines are indented under the text.
    pub fn format_message(message: &Message) -> String {
        let (label, width) = match message.sender() {
            Sender::Bot => ("buddy>".magenta().bold(), 6),
            Sender::User => ("you>".green().bold(), 4),
        };

        let indent = " ".repeat(width + 1);
        let body = message.text().lines().collect::<Vec<_>>().join(&format!("\n{indent}"));

        let body = match message.text() {
            NETWORK_ERROR_REPLY => body.red().to_string(),
            FALLBACK_REPLY => body.yellow().to_string(),
            _ => body,
        };

        format!("{} {}", label, body)
    }

    /// Format the whole conversation, one message per block
    pub fn format_conversation(messages: &[Message]) -> String {
        messages
            .iter()
            .map(Self::format_message)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn header(identity: &UserIdentity) -> String {
        let title = "Your Buddy! 🤖💬";
        let mut output = String::new();
        output.push_str(&format!("{}\n", "─".repeat(45).dimmed()));
        output.push_str(&format!("  {}\n", title.magenta().bold()));
        if !identity.is_anonymous() {
            output.push_str(&format!("  {} {}\n", "Signed in as".dimmed(), identity));
        }
        output.push_str(&format!("{}", "─".repeat(45).dimmed()));
        output
    }

    pub fn help() -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n", "Commands:".cyan().bold()));
        output.push_str("  /clear            - Clear the conversation\n");
        output.push_str("  /history          - Show the whole conversation\n");
        output.push_str("  /help, /h, /?     - Show this help\n");
        output.push_str("  /quit, /exit, /q  - Exit chat\n");
        output.push_str("  //text            - Send a message starting with /\n");
        output.push_str("\nCtrl-C while waiting for a reply cancels the request.");
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain<T>(f: impl FnOnce() -> T) -> T {
        colored::control::set_override(false);
        f()
    }

    #[test]
    fn test_format_user_and_bot() {
        plain(|| {
            assert_eq!(
                ConsoleFormatter::format_message(&Message::user("hello")),
                "you> hello"
            );
            assert_eq!(
                ConsoleFormatter::format_message(&Message::bot("Hi! How are you?")),
                "buddy> Hi! How are you?"
            );
        });
    }

    #[test]
    fn test_multiline_is_indented() {
        plain(|| {
            let formatted = ConsoleFormatter::format_message(&Message::bot("line one\nline two"));
            assert_eq!(formatted, "buddy> line one\n       line two");
        });
    }

    #[test]
    fn test_format_conversation_keeps_order() {
        plain(|| {
            let messages = vec![Message::bot("a"), Message::user("b"), Message::bot("c")];
            assert_eq!(
                ConsoleFormatter::format_conversation(&messages),
                "buddy> a\nyou> b\nbuddy> c"
            );
        });
    }

    #[test]
    fn test_header_mentions_signed_in_user() {
        plain(|| {
            let identity = UserIdentity::new("u1").unwrap().with_display_name("Sam");
            assert!(ConsoleFormatter::header(&identity).contains("Sam (u1)"));
            assert!(!ConsoleFormatter::header(&UserIdentity::anonymous()).contains("Signed in"));
        });
    }
}
