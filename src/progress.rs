//! Progress display for variant builds

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display for a multi-variant build
///
/// Draws to stderr and hides itself when stderr is not a terminal, so piped
/// and CI output stays clean.
pub struct ProgressDisplay {
    /// One tick per finished variant
    variant_pb: ProgressBar,
    /// Spinner while the packager runs
    step_pb: Option<ProgressBar>,
}

impl ProgressDisplay {
    /// Create a new progress display with total variant count
    pub fn new(total_variants: u64) -> Self {
        let variant_pb = ProgressBar::new(total_variants);
        if let Ok(style) = ProgressStyle::default_bar().template("[{bar:40.cyan/blue}] {pos}/{len} {msg}") {
            variant_pb.set_style(style.progress_chars("#>-"));
        }

        Self {
            variant_pb,
            step_pb: None,
        }
    }

    /// Progress display that never draws (quiet mode and tests)
    pub fn hidden() -> Self {
        Self {
            variant_pb: ProgressBar::hidden(),
            step_pb: None,
        }
    }

    /// Show a spinner for a long-running step of the current variant
    pub fn start_step(&mut self, message: impl Into<String>) {
        if self.variant_pb.is_hidden() {
            return;
        }
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner} {msg}") {
            pb.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]));
        }
        pb.set_message(message.into());
        pb.enable_steady_tick(Duration::from_millis(80));
        self.step_pb = Some(pb);
    }

    /// Clear the step spinner
    pub fn finish_step(&mut self) {
        if let Some(pb) = self.step_pb.take() {
            pb.finish_and_clear();
        }
    }

    /// Update to show the variant being built
    pub fn update_variant(&self, variant_id: &str, current: usize, total: usize) {
        self.variant_pb
            .set_message(format!("({current}/{total}) {variant_id}"));
    }

    /// Increment variant progress
    pub fn inc_variant(&self) {
        self.variant_pb.inc(1);
    }

    /// Finish all progress bars
    pub fn finish(&mut self) {
        self.finish_step();
        self.variant_pb.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&mut self) {
        if let Some(pb) = self.step_pb.take() {
            pb.abandon();
        }
        self.variant_pb.abandon();
    }
}
