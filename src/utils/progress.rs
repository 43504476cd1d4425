//! Progress indicators
//!
//! Resolution of a game with many DLC issues one request per DLC, which can
//! take a while against the remote endpoint. A spinner on stderr shows which id
//! is being resolved.
//!
//! Spinners are hidden when disabled by the caller (`--no-progress`), when
//! `PERMASCRIPT_NO_PROGRESS` is set, or when stderr is not a terminal, so
//! scripted use and the test suite see clean output.
//!
//! ```rust,no_run
//! use permascript::utils::progress::ProgressSpinner;
//!
//! let spinner = ProgressSpinner::new(true);
//! spinner.set_message("Resolving app 730");
//! // resolve...
//! spinner.finish_and_clear();
//! ```

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle as IndicatifStyle};
use std::io::IsTerminal;
use std::time::Duration;

/// Environment variable that disables every progress indicator.
pub const NO_PROGRESS_ENV: &str = "PERMASCRIPT_NO_PROGRESS";

fn is_progress_disabled() -> bool {
    std::env::var_os(NO_PROGRESS_ENV).is_some() || !std::io::stderr().is_terminal()
}

fn spinner_style() -> IndicatifStyle {
    IndicatifStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| IndicatifStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
}

/// Spinner for work of unknown length.
#[derive(Clone)]
pub struct ProgressSpinner {
    inner: IndicatifBar,
}

impl ProgressSpinner {
    /// Create a spinner; `enabled = false` yields a hidden one.
    pub fn new(enabled: bool) -> Self {
        let bar = if !enabled || is_progress_disabled() {
            IndicatifBar::hidden()
        } else {
            let bar = IndicatifBar::new_spinner();
            bar.set_style(spinner_style());
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        };
        Self {
            inner: bar,
        }
    }

    /// A spinner that never draws.
    pub fn hidden() -> Self {
        Self::new(false)
    }

    pub fn is_hidden(&self) -> bool {
        self.inner.is_hidden()
    }

    pub fn set_message(&self, msg: impl Into<String>) {
        self.inner.set_message(msg.into());
    }

    /// Stop and erase the spinner.
    pub fn finish_and_clear(&self) {
        self.inner.finish_and_clear();
    }
}
