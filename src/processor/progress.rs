//! Progress reporting for export runs
//!
//! The pipeline calls a [`ProgressReporter`] synchronously at fixed
//! checkpoints: before each file, before sorting, and before the final
//! write. Reports are advisory and carry no cancellation.

use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

/// Receives `(current, total, message)` progress updates
pub trait ProgressReporter {
    fn report(&self, current: usize, total: usize, message: &str);
}

impl<F> ProgressReporter for F
where
    F: Fn(usize, usize, &str),
{
    fn report(&self, current: usize, total: usize, message: &str) {
        self(current, total, message)
    }
}

/// Reporter that ignores every update
pub fn silent(_current: usize, _total: usize, _message: &str) {}

/// Terminal progress bar driven by pipeline reports
pub struct TerminalProgress {
    progress_bar: Option<ProgressBar>,
}

impl TerminalProgress {
    /// Create a progress bar, or a no-op reporter when `enabled` is false
    pub fn new(total_files: usize, enabled: bool) -> Self {
        let progress_bar = enabled.then(|| {
            let pb = ProgressBar::new(total_files as u64);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            {
                pb.set_style(style.progress_chars("#>-"));
            }
            pb.set_message("Initializing...");
            pb
        });

        Self { progress_bar }
    }

    /// Apply a pipeline report to the bar
    pub fn update(&self, current: usize, total: usize, message: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.set_length(total as u64);
            pb.set_position(current as u64);
            pb.set_message(message.to_string());
        }
    }

    pub fn finish(&self, message: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_with_message(message.to_string());
            debug!("Progress reporting completed: {}", message);
        }
    }

    pub fn finish_with_error(&self, error_message: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.abandon_with_message(format!("Failed: {}", error_message));
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.progress_bar.is_some()
    }
}
