//! CLI entrypoint for buddy-chat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod logging;

use anyhow::{Context, Result, bail};
use buddy_application::{ChatSessionUseCase, ConversationStore, TranscriptLogger};
use buddy_domain::UserIdentity;
use buddy_infrastructure::{
    ConfigLoader, FileConfig, GeminiCompletionClient, InMemoryConversationStore,
    JsonFileConversationStore, JsonlTranscriptLogger, Severity,
};
use buddy_presentation::{ChatRepl, Cli, ReplConfig};
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Transcript file name inside the log directory
const TRANSCRIPT_FILE: &str = "transcript.jsonl";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // Load configuration before logging so the log directory can come from it
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("failed to load configuration")?
    };

    if let Some(model) = &cli.model {
        config.completion.model = model.clone();
    }
    if cli.ephemeral {
        config.storage.ephemeral = true;
    }

    let data_dir = if config.storage.ephemeral {
        None
    } else {
        Some(config.storage.resolve_data_dir()?)
    };
    let log_dir = cli
        .log_dir
        .clone()
        .or_else(|| config.logging.resolve_log_dir(data_dir.as_ref()));

    let _log_guard = logging::init(cli.verbose, log_dir.as_deref());

    info!("Starting buddy-chat");

    report_config_issues(&config)?;

    // === Dependency Injection ===
    let identity = build_identity(&cli)?;

    let store: Arc<dyn ConversationStore> = match &data_dir {
        Some(dir) => {
            let store = JsonFileConversationStore::new(dir);
            info!("Conversations stored in {}", store.dir().display());
            Arc::new(store)
        }
        None => {
            info!("Ephemeral mode: conversation is kept in memory only");
            Arc::new(InMemoryConversationStore::new())
        }
    };

    let client = Arc::new(GeminiCompletionClient::from_config(&config.completion)?);
    info!("Completion endpoint: {}", client.endpoint());

    let mut session = ChatSessionUseCase::start(
        identity,
        store,
        client,
        config.completion.to_session_config(),
    )
    .await;

    if config.logging.transcript {
        match log_dir.as_ref().map(|dir| dir.join(TRANSCRIPT_FILE)) {
            Some(path) => {
                if let Some(logger) = JsonlTranscriptLogger::new(&path) {
                    info!("Writing transcript to {}", logger.path().display());
                    let logger: Arc<dyn TranscriptLogger> = Arc::new(logger);
                    session = session.with_transcript_logger(logger);
                }
            }
            None => warn!("logging.transcript is set but no log directory is available"),
        }
    }

    let repl_config = ReplConfig {
        show_progress: !cli.quiet,
        color: !cli.no_color,
        history_file: data_dir.as_ref().map(|d| d.join("history.txt")),
    };

    let mut repl = ChatRepl::new(Arc::new(session)).with_config(repl_config);
    repl.run().await?;

    Ok(())
}

fn build_identity(cli: &Cli) -> Result<UserIdentity> {
    let identity = match &cli.user {
        Some(id) => UserIdentity::new(id.as_str()).context("invalid --user")?,
        None => UserIdentity::anonymous(),
    };
    Ok(match &cli.name {
        Some(name) => identity.with_display_name(name.as_str()),
        None => identity,
    })
}

fn report_config_issues(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Error => error!("{}: {}", issue.field, issue.message),
            Severity::Warning => warn!("{}: {}", issue.field, issue.message),
        }
    }
    if FileConfig::has_errors(&issues) {
        bail!("configuration has errors, see messages above");
    }
    Ok(())
}
