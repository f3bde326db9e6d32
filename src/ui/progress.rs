use crate::collector::CollectionProgress;
use crate::ui::output::format_duration;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

pub struct ProgressManager {
    enabled: bool,
}

impl ProgressManager {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Spinner counting scanned files. The total is unknown up front since the
    /// walk is lazy.
    pub fn create_scan_spinner(&self, message: &str) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {pos} files {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"]),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

pub fn update_collection_progress(pb: &ProgressBar, progress: &CollectionProgress) {
    pb.set_position(progress.files_scanned as u64);

    match progress.current_file {
        Some(ref current_file) => pb.set_message(format!(
            "({} written) {}",
            progress.files_written, current_file
        )),
        None => pb.set_message("Scanning..."),
    }
}

pub fn finish_progress_with_summary(pb: &ProgressBar, message: &str, duration: Duration) {
    // Spinner output goes to stderr; clearing keeps stdout down to the completion line.
    pb.finish_and_clear();
    tracing::debug!("{} (completed in {})", message, format_duration(duration));
}
