//! Presentation-level configuration
//!
//! Configuration for the interactive chat.

use std::path::PathBuf;

/// REPL configuration for the presentation layer
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Show the busy spinner while a reply is pending
    pub show_progress: bool,
    /// Enable colored terminal output
    pub color: bool,
    /// Path to the input history file
    pub history_file: Option<PathBuf>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            color: true,
            history_file: dirs::data_dir().map(|d| d.join("buddy-chat").join("history.txt")),
        }
    }
}
