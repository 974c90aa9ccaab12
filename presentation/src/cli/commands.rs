//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for buddy-chat
#[derive(Parser, Debug)]
#[command(name = "buddy-chat")]
#[command(author, version, about = "Your Buddy - a local-first wellness chat companion")]
#[command(long_about = r#"
Chat with Your Buddy from the terminal. The conversation is saved after every
message and picked up again next time.

The API key is read from the environment variable named by
completion.api_key_env (GEMINI_API_KEY by default).

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./buddy.toml        Project-level config
3. ~/.config/buddy-chat/config.toml   Global config

Example:
  buddy-chat
  buddy-chat --user uid-42 --name Sam
  buddy-chat --ephemeral --model gemini-2.5-flash
"#)]
pub struct Cli {
    /// User id owning the conversation (defaults to the local anonymous user)
    #[arg(short, long, value_name = "ID")]
    pub user: Option<String>,

    /// Display name for the user
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Completion model to use (overrides completion.model)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Keep the conversation in memory only
    #[arg(long)]
    pub ephemeral: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the busy spinner
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Directory for the rolling log file (overrides logging.log_dir)
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
