//! Busy indicator shown while a reply is pending

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner displayed while the session is `Sending`.
///
/// Disabled spinners are no-ops, so callers don't need to branch.
pub struct BusySpinner {
    bar: Option<ProgressBar>,
}

impl BusySpinner {
    /// Start a spinner with `message`, or a no-op one if `enabled` is false
    pub fn start(enabled: bool, message: &str) -> Self {
        if !enabled {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.magenta} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar: Some(bar) }
    }

    /// Remove the spinner line
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

impl Drop for BusySpinner {
    fn drop(&mut self) {
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_spinner_is_inactive() {
        let spinner = BusySpinner::start(false, "thinking");
        assert!(spinner.bar.is_none());
        spinner.finish();
    }

    #[test]
    fn test_finish_deactivates() {
        let spinner = BusySpinner::start(true, "thinking");
        spinner.finish();
        assert!(spinner.bar.as_ref().is_some_and(|bar| bar.is_finished()));
    }
}
