//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::config::ReplConfig;
use crate::output::console::ConsoleFormatter;
use crate::progress::spinner::BusySpinner;
use buddy_application::{ChatSessionUseCase, ChatSnapshot, SubmitError, TurnOutcome};
use buddy_domain::Message;
use colored::Colorize;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Lines kept in the input history file
const HISTORY_CAPACITY: usize = 500;

/// What the loop should do after a line was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplAction {
    Continue,
    Exit,
}

/// Interactive chat REPL
pub struct ChatRepl {
    session: Arc<ChatSessionUseCase>,
    config: ReplConfig,
    updates: watch::Receiver<ChatSnapshot>,
    /// Number of messages already on screen
    rendered: usize,
}

impl ChatRepl {
    pub fn new(session: Arc<ChatSessionUseCase>) -> Self {
        let updates = session.subscribe();
        Self {
            session,
            config: ReplConfig::default(),
            updates,
            rendered: 0,
        }
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the interactive REPL until `/quit` or Ctrl-D
    pub async fn run(&mut self) -> std::io::Result<()> {
        colored::control::set_override(self.config.color);

        let mut line_editor = Reedline::create();
        if let Some(path) = &self.config.history_file {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            match FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone()) {
                Ok(history) => line_editor = line_editor.with_history(Box::new(history)),
                Err(e) => warn!("Could not open history file {}: {}", path.display(), e),
            }
        }

        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("you".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            match line_editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    if self.handle_line(&line).await == ReplAction::Exit {
                        break;
                    }
                }
                Signal::CtrlC => {
                    println!("^C");
                    continue;
                }
                _ => {
                    println!("Bye!");
                    break;
                }
            }
        }

        Ok(())
    }

    fn print_welcome(&mut self) {
        println!();
        println!("{}", ConsoleFormatter::header(self.session.identity()));
        println!("{}", "Type a message and press Enter. /help for commands.".dimmed());
        println!();

        let snapshot = self.updates.borrow_and_update().clone();
        println!("{}", ConsoleFormatter::format_conversation(&snapshot.messages));
        self.rendered = snapshot.messages.len();
    }

    /// Handle one input line: a slash command or a chat message.
    ///
    /// A leading `//` sends the rest of the line, starting with `/`, as a
    /// message.
    pub async fn handle_line(&mut self, line: &str) -> ReplAction {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            return ReplAction::Continue;
        }

        if let Some(escaped) = trimmed.strip_prefix("//") {
            self.send(&format!("/{escaped}")).await;
            return ReplAction::Continue;
        }

        if trimmed.starts_with('/') {
            return self.handle_command(trimmed).await;
        }

        self.send(line).await;
        ReplAction::Continue
    }

    async fn handle_command(&mut self, cmd: &str) -> ReplAction {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                ReplAction::Exit
            }
            "/help" | "/h" | "/?" => {
                println!();
                println!("{}", ConsoleFormatter::help());
                println!();
                ReplAction::Continue
            }
            "/clear" => {
                match self.session.clear().await {
                    Ok(()) => {
                        println!("{}", "Conversation cleared.".dimmed());
                        self.rendered = 0;
                        self.print_new_messages(true);
                    }
                    Err(e) => println!("{} {}", "Cannot clear:".yellow(), e),
                }
                ReplAction::Continue
            }
            "/history" => {
                let snapshot = self.session.snapshot();
                println!();
                println!("{}", ConsoleFormatter::format_conversation(&snapshot.messages));
                println!();
                ReplAction::Continue
            }
            _ => {
                println!("{} {} (try /help)", "Unknown command:".yellow(), cmd);
                ReplAction::Continue
            }
        }
    }

    async fn send(&mut self, line: &str) {
        let spinner = BusySpinner::start(self.config.show_progress, "Buddy is typing...");

        let session = self.session.clone();
        let result = {
            let submit = session.submit(line);
            tokio::pin!(submit);
            tokio::select! {
                result = &mut submit => result,
                _ = tokio::signal::ctrl_c() => {
                    debug!("Ctrl-C while waiting for a reply");
                    session.cancel_pending();
                    submit.await
                }
            }
        };
        spinner.finish();

        match result {
            Ok(TurnOutcome::Failed { error, .. }) => debug!("Turn failed: {}", error),
            Ok(TurnOutcome::Resolved(_)) => {}
            Err(SubmitError::EmptyInput) => return,
            Err(SubmitError::Busy) => {
                println!("{}", "Still waiting for the previous reply.".yellow());
                return;
            }
        }

        // The user's own line is already on screen as typed input
        self.print_new_messages(false);
    }

    fn print_new_messages(&mut self, include_user: bool) {
        for message in self.take_new_messages() {
            if include_user || !message.is_from_user() {
                println!("{}", ConsoleFormatter::format_message(&message));
            }
        }
    }

    /// Messages appended since the last render. A shorter conversation than
    /// what is on screen means it was cleared, so everything is new again.
    fn take_new_messages(&mut self) -> Vec<Message> {
        let snapshot = self.updates.borrow_and_update().clone();
        if snapshot.messages.len() < self.rendered {
            self.rendered = 0;
        }
        let fresh = snapshot.messages[self.rendered..].to_vec();
        self.rendered = snapshot.messages.len();
        fresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use buddy_application::{
        ChatSessionConfig, CompletionClient, CompletionError, ConversationStore, StoreError,
    };
    use buddy_domain::{SEED_GREETING, UserIdentity};
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MapStore {
        slots: Mutex<HashMap<String, Vec<Message>>>,
    }

    #[async_trait]
    impl ConversationStore for MapStore {
        async fn load(&self, key: &str) -> Result<Option<Vec<Message>>, StoreError> {
            Ok(self.slots.lock().unwrap().get(key).cloned())
        }

        async fn save(&self, key: &str, messages: &[Message]) -> Result<(), StoreError> {
            self.slots
                .lock()
                .unwrap()
                .insert(key.to_string(), messages.to_vec());
            Ok(())
        }
    }

    struct EchoClient;

    #[async_trait]
    impl CompletionClient for EchoClient {
        async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
            Ok(format!("echo: {prompt}"))
        }
    }

    async fn repl() -> ChatRepl {
        let session = ChatSessionUseCase::start(
            UserIdentity::anonymous(),
            Arc::new(MapStore::default()),
            Arc::new(EchoClient),
            ChatSessionConfig::default(),
        )
        .await;
        colored::control::set_override(false);
        ChatRepl::new(Arc::new(session)).with_config(ReplConfig {
            show_progress: false,
            color: false,
            history_file: None,
        })
    }

    #[tokio::test]
    async fn test_quit_commands_exit() {
        let mut repl = repl().await;
        for cmd in ["/quit", "/exit", "/q"] {
            assert_eq!(repl.handle_line(cmd).await, ReplAction::Exit);
        }
    }

    #[tokio::test]
    async fn test_message_runs_a_turn() {
        let mut repl = repl().await;
        repl.take_new_messages();

        assert_eq!(repl.handle_line("hello").await, ReplAction::Continue);

        let snapshot = repl.session.snapshot();
        assert_eq!(snapshot.messages.len(), 3);
        assert_eq!(snapshot.messages[2], Message::bot("echo: hello"));
        // Rendering caught up with the session
        assert!(repl.take_new_messages().is_empty());
    }

    #[tokio::test]
    async fn test_blank_line_is_ignored() {
        let mut repl = repl().await;
        assert_eq!(repl.handle_line("   ").await, ReplAction::Continue);
        assert_eq!(repl.session.snapshot().messages.len(), 1);
    }

    #[tokio::test]
    async fn test_clear_command_resets_conversation() {
        let mut repl = repl().await;
        repl.handle_line("one").await;
        repl.handle_line("two").await;

        assert_eq!(repl.handle_line("/clear").await, ReplAction::Continue);

        assert_eq!(
            repl.session.snapshot().messages,
            vec![Message::bot(SEED_GREETING)]
        );
        assert_eq!(repl.rendered, 1);
    }

    #[tokio::test]
    async fn test_unknown_command_does_not_submit() {
        let mut repl = repl().await;
        assert_eq!(repl.handle_line("/dance").await, ReplAction::Continue);
        assert_eq!(repl.session.snapshot().messages.len(), 1);
    }

    #[tokio::test]
    async fn test_double_slash_sends_message() {
        let mut repl = repl().await;

        assert_eq!(
            repl.handle_line("//shrug that was hard").await,
            ReplAction::Continue
        );

        let messages = repl.session.snapshot().messages;
        assert_eq!(messages[1], Message::user("/shrug that was hard"));
        assert_eq!(messages[2], Message::bot("echo: /shrug that was hard"));
    }

    #[tokio::test]
    async fn test_take_new_messages_after_clear() {
        let mut repl = repl().await;
        assert_eq!(repl.take_new_messages().len(), 1);

        repl.session.submit("a").await.unwrap();
        repl.session.submit("b").await.unwrap();
        assert_eq!(repl.take_new_messages().len(), 4);

        repl.session.clear().await.unwrap();
        assert_eq!(
            repl.take_new_messages(),
            vec![Message::bot(SEED_GREETING)]
        );
    }
}
