//! Progress display with indicatif
//!
//! Bars are only drawn when stderr is a terminal and the user has not asked
//! for quiet output. In every other case the tracker is silent and its
//! methods are no-ops.

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

static DISCOVERY_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg} [{elapsed_precise}]")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
});

static WRITING_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{spinner:.green} {msg} [{elapsed_precise}] {wide_bar:.cyan/blue} {pos}/{len} ({per_sec})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
});

/// Progress tracking modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    /// No progress bars (for non-TTY or quiet mode)
    Silent,
    /// Show progress bars
    Visible,
}

/// Progress tracker for the discovery and writing phases
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    mode: ProgressMode,
    discovery: Option<ProgressBar>,
    writing: Option<ProgressBar>,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::silent()
    }
}

impl ProgressTracker {
    /// Create a tracker, visible only on an interactive stderr
    pub fn new(quiet: bool) -> Self {
        let mode = if !quiet && atty::is(atty::Stream::Stderr) {
            ProgressMode::Visible
        } else {
            ProgressMode::Silent
        };
        Self::with_mode(mode)
    }

    pub fn silent() -> Self {
        Self::with_mode(ProgressMode::Silent)
    }

    pub fn with_mode(mode: ProgressMode) -> Self {
        Self {
            mode,
            discovery: None,
            writing: None,
        }
    }

    pub fn mode(&self) -> ProgressMode {
        self.mode
    }

    /// Start the discovery spinner
    pub fn start_discovery(&mut self) {
        if self.mode == ProgressMode::Silent {
            return;
        }
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(DISCOVERY_STYLE.clone());
        spinner.set_message("Discovering files");
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.discovery = Some(spinner);
    }

    pub fn finish_discovery(&mut self, total_files: usize) {
        if let Some(spinner) = self.discovery.take() {
            spinner.finish_and_clear();
        }
        tracing::debug!("Discovery finished with {} files", total_files);
    }

    /// Start the writing bar for `total_files` files
    pub fn start_writing(&mut self, total_files: usize) {
        if self.mode == ProgressMode::Silent {
            return;
        }
        let bar = ProgressBar::new(total_files as u64);
        bar.set_style(WRITING_STYLE.clone());
        bar.set_message("Writing context");
        self.writing = Some(bar);
    }

    /// Advance the writing bar by one file
    pub fn file_written(&self) {
        if let Some(bar) = &self.writing {
            bar.inc(1);
        }
    }

    pub fn finish_writing(&mut self) {
        if let Some(bar) = self.writing.take() {
            bar.finish_and_clear();
        }
    }
}
