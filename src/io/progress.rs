//! Terminal spinner for long-running image work

use crate::io::configuration::SPINNER_TICK_MS;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

static SPINNER_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg} [{elapsed}]")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

/// Spinner that is hidden entirely in quiet mode
pub struct ProgressSpinner {
    bar: ProgressBar,
}

impl ProgressSpinner {
    /// Start a spinner with the given message
    pub fn start(message: &str, visible: bool) -> Self {
        let bar = if visible {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        bar.set_style(SPINNER_STYLE.clone());
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
        Self { bar }
    }

    /// Replace the message while keeping the spinner running
    pub fn set_stage(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    /// Stop the spinner and clear it from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
