//! Chat session use case.
//!
//! Owns the in-memory [`Conversation`] for one user and drives each turn:
//!
//! ```text
//! Idle ──submit──▶ Sending ──Ok(text)──▶ Resolved ──▶ Idle
//!                          └─Err(_)───▶ Failed   ──▶ Idle
//! ```
//!
//! Every append is followed by a full save of the conversation, in mutation
//! order, before the next mutation may start. Saves that fail are logged and
//! skipped; the next successful save overwrites the slot and catches up.
//!
//! At most one completion request is outstanding at a time. `submit` and
//! `clear` are rejected with [`SubmitError::Busy`] while a turn is in flight.

use crate::config::ChatSessionConfig;
use crate::ports::completion_client::{CompletionClient, CompletionError};
use crate::ports::conversation_store::ConversationStore;
use crate::ports::transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger};
use buddy_domain::{
    Conversation, FALLBACK_REPLY, Message, NETWORK_ERROR_REPLY, Prompt, UserIdentity,
};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Reasons a `submit` or `clear` call was not accepted.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    /// The submitted text was empty or whitespace only. Nothing was appended.
    #[error("Input is empty")]
    EmptyInput,

    /// A completion request is still in flight.
    #[error("A reply is still pending")]
    Busy,
}

/// Where the session is in the turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Sending,
}

/// How an accepted turn ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The completion service answered; `0` is the appended bot message.
    Resolved(Message),
    /// The request failed; `reply` is the appended failure notice.
    Failed {
        reply: Message,
        error: CompletionError,
    },
}

impl TurnOutcome {
    /// The bot message appended for this turn
    pub fn reply(&self) -> &Message {
        match self {
            TurnOutcome::Resolved(reply) => reply,
            TurnOutcome::Failed { reply, .. } => reply,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, TurnOutcome::Resolved(_))
    }
}

/// Read-only view handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSnapshot {
    pub messages: Vec<Message>,
    pub busy: bool,
}

struct SessionState {
    conversation: Conversation,
    phase: SessionPhase,
    in_flight: Option<CancellationToken>,
}

impl SessionState {
    fn snapshot(&self) -> ChatSnapshot {
        ChatSnapshot {
            messages: self.conversation.messages().to_vec(),
            busy: self.phase == SessionPhase::Sending,
        }
    }
}

/// Conversation session manager.
///
/// Create it with [`start`](Self::start), then share it behind an `Arc` if
/// several tasks need to reach it. The session is the only writer to its
/// store slot.
pub struct ChatSessionUseCase {
    identity: UserIdentity,
    key: String,
    store: Arc<dyn ConversationStore>,
    client: Arc<dyn CompletionClient>,
    transcript: Arc<dyn TranscriptLogger>,
    config: ChatSessionConfig,
    state: Mutex<SessionState>,
    /// Serializes "mutate then save" so saves reach the store in order.
    writer: Arc<tokio::sync::Mutex<()>>,
    updates: watch::Sender<ChatSnapshot>,
}

impl ChatSessionUseCase {
    /// Load the stored conversation for `identity` and build a session.
    ///
    /// Loading never fails: a missing or unreadable slot starts a fresh
    /// conversation holding the seed greeting. A stored conversation that
    /// ends on an unanswered user message (the process went away while a
    /// reply was pending) gets the network-error reply appended and saved.
    pub async fn start(
        identity: UserIdentity,
        store: Arc<dyn ConversationStore>,
        client: Arc<dyn CompletionClient>,
        config: ChatSessionConfig,
    ) -> Self {
        let key = identity.conversation_key();

        let mut conversation = match store.load(&key).await {
            Ok(Some(messages)) => Conversation::from_messages(messages),
            Ok(None) => Conversation::seeded(),
            Err(e) => {
                warn!("Could not load conversation '{}', starting fresh: {}", key, e);
                Conversation::seeded()
            }
        };

        if conversation.unanswered() > 0 {
            warn!("Conversation '{}' ends on an unanswered message", key);
            conversation.push(Message::bot(NETWORK_ERROR_REPLY));
            if let Err(e) = store.save(&key, conversation.messages()).await {
                warn!("Failed to save conversation '{}': {}", key, e);
            }
        }

        info!(
            "Chat session started for {}: {} message(s)",
            identity,
            conversation.len()
        );

        let state = SessionState {
            conversation,
            phase: SessionPhase::Idle,
            in_flight: None,
        };
        let (updates, _) = watch::channel(state.snapshot());

        Self {
            identity,
            key,
            store,
            client,
            transcript: Arc::new(NoTranscriptLogger),
            config,
            state: Mutex::new(state),
            writer: Arc::new(tokio::sync::Mutex::new(())),
            updates,
        }
    }

    /// Attach a transcript logger.
    pub fn with_transcript_logger(mut self, logger: Arc<dyn TranscriptLogger>) -> Self {
        self.transcript = logger;
        self
    }

    pub fn identity(&self) -> &UserIdentity {
        &self.identity
    }

    /// Current messages and busy flag.
    pub fn snapshot(&self) -> ChatSnapshot {
        self.lock_state().snapshot()
    }

    pub fn phase(&self) -> SessionPhase {
        self.lock_state().phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase() == SessionPhase::Sending
    }

    /// Receive a fresh [`ChatSnapshot`] after every state transition.
    pub fn subscribe(&self) -> watch::Receiver<ChatSnapshot> {
        self.updates.subscribe()
    }

    /// Run one turn: append the user's text, ask for a completion, append
    /// the reply (or the failure notice).
    ///
    /// Only the submitted text is sent upstream, not the earlier history.
    pub async fn submit(&self, text: &str) -> Result<TurnOutcome, SubmitError> {
        let prompt = Prompt::try_new(text).map_err(|_| SubmitError::EmptyInput)?;

        let writer = self.writer.lock().await;
        let (snapshot, token) = {
            let mut state = self.lock_state();
            if state.phase == SessionPhase::Sending {
                return Err(SubmitError::Busy);
            }
            state.conversation.push(Message::user(prompt.as_str()));
            state.phase = SessionPhase::Sending;
            let token = CancellationToken::new();
            state.in_flight = Some(token.clone());
            (state.snapshot(), token)
        };
        let mut turn = PendingTurn {
            session: self,
            settled: false,
        };

        debug!("Turn started ({} chars)", prompt.as_str().chars().count());
        self.transcript.log(TranscriptEvent::new(
            "user_message",
            serde_json::json!({ "user": self.identity.id(), "text": prompt.as_str() }),
        ));
        self.on_mutate(snapshot).await;
        drop(writer);

        let result = self.request_completion(&prompt, &token).await;

        let (reply, outcome) = match result {
            Ok(text) => {
                let text = if text.trim().is_empty() {
                    FALLBACK_REPLY.to_string()
                } else {
                    text
                };
                let reply = Message::bot(text);
                (reply.clone(), TurnOutcome::Resolved(reply))
            }
            Err(error) => {
                warn!("Completion failed ({}): {}", error.kind(), error);
                let reply = Message::bot(NETWORK_ERROR_REPLY);
                (reply.clone(), TurnOutcome::Failed { reply, error })
            }
        };

        let _writer = self.writer.lock().await;
        let snapshot = {
            let mut state = self.lock_state();
            state.conversation.push(reply);
            state.phase = SessionPhase::Idle;
            state.in_flight = None;
            turn.settled = true;
            state.snapshot()
        };

        match &outcome {
            TurnOutcome::Resolved(reply) => self.transcript.log(TranscriptEvent::new(
                "bot_reply",
                serde_json::json!({ "user": self.identity.id(), "text": reply.text() }),
            )),
            TurnOutcome::Failed { error, .. } => self.transcript.log(TranscriptEvent::new(
                "completion_failed",
                serde_json::json!({
                    "user": self.identity.id(),
                    "kind": error.kind(),
                    "error": error.to_string(),
                }),
            )),
        }
        self.on_mutate(snapshot).await;

        Ok(outcome)
    }

    /// Reset the conversation to the seed greeting and save it.
    ///
    /// Rejected with [`SubmitError::Busy`] while a turn is in flight, so a
    /// reset can never race the pending reply's save.
    pub async fn clear(&self) -> Result<(), SubmitError> {
        let _writer = self.writer.lock().await;
        let snapshot = {
            let mut state = self.lock_state();
            if state.phase == SessionPhase::Sending {
                return Err(SubmitError::Busy);
            }
            state.conversation.reset();
            state.snapshot()
        };

        info!("Conversation cleared for {}", self.identity);
        self.transcript.log(TranscriptEvent::new(
            "conversation_cleared",
            serde_json::json!({ "user": self.identity.id() }),
        ));
        self.on_mutate(snapshot).await;
        Ok(())
    }

    /// Abort the in-flight completion request, if any.
    ///
    /// The pending turn still gets its answer: it resolves as
    /// [`TurnOutcome::Failed`] with [`CompletionError::Cancelled`].
    pub fn cancel_pending(&self) -> bool {
        match &self.lock_state().in_flight {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    async fn request_completion(
        &self,
        prompt: &Prompt,
        token: &CancellationToken,
    ) -> Result<String, CompletionError> {
        let request = self.client.complete(prompt.as_str());
        let bounded = async {
            match self.config.request_timeout {
                Some(limit) => match tokio::time::timeout(limit, request).await {
                    Ok(result) => result,
                    Err(_) => Err(CompletionError::Timeout),
                },
                None => request.await,
            }
        };

        tokio::select! {
            biased;
            _ = token.cancelled() => Err(CompletionError::Cancelled),
            result = bounded => result,
        }
    }

    /// Persist and publish a mutation. Called right after every append or
    /// reset, while the writer lock is held.
    async fn on_mutate(&self, snapshot: ChatSnapshot) {
        if let Err(e) = self.store.save(&self.key, &snapshot.messages).await {
            warn!(
                "Failed to save conversation '{}' ({} messages): {}",
                self.key,
                snapshot.messages.len(),
                e
            );
        }
        self.updates.send_replace(snapshot);
    }

    /// Save the snapshot that is current once the writer lock is free.
    fn spawn_catch_up_save(&self) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            debug!("No runtime to save the abandoned turn; deferring");
            return;
        };
        let writer = self.writer.clone();
        let store = self.store.clone();
        let key = self.key.clone();
        let updates = self.updates.subscribe();
        handle.spawn(async move {
            let _writer = writer.lock_owned().await;
            let messages = updates.borrow().messages.clone();
            if let Err(e) = store.save(&key, &messages).await {
                warn!("Failed to save conversation '{}': {}", key, e);
            }
        });
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Answers a turn whose `submit` future was dropped before the reply was
/// appended, so the session never stays stuck in `Sending`.
///
/// The notice is saved from a spawned task when a tokio runtime is
/// available. Otherwise the next mutation, or the next `start`, writes it.
struct PendingTurn<'a> {
    session: &'a ChatSessionUseCase,
    settled: bool,
}

impl Drop for PendingTurn<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let snapshot = {
            let mut state = self.session.lock_state();
            if let Some(token) = state.in_flight.take() {
                token.cancel();
            }
            if state.phase == SessionPhase::Sending {
                state.conversation.push(Message::bot(NETWORK_ERROR_REPLY));
                state.phase = SessionPhase::Idle;
            }
            state.snapshot()
        };
        warn!("Turn abandoned before a reply arrived");
        self.session.updates.send_replace(snapshot);
        self.session.spawn_catch_up_save();
    }
}
