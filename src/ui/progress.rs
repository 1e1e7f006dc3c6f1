use crate::extractor::ExtractionProgress;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub struct ProgressManager {
    enabled: bool,
}

impl ProgressManager {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn create_unit_progress(&self, total_units: u64) -> ProgressBar {
        if !self.enabled || total_units == 0 {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total_units);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>4}/{len:4} slides {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
        );
        pb.set_message("Writing slides...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

pub fn update_unit_progress(pb: &ProgressBar, progress: &ExtractionProgress) {
    pb.set_position(progress.units_written as u64);

    match progress.current_file {
        Some(ref current_file) => {
            let name = current_file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            pb.set_message(format!("Wrote {}", name));
        }
        None => pb.set_message("Writing slides..."),
    }
}

/// The summary line is printed by the formatter, so the bar leaves nothing behind.
pub fn finish_unit_progress(pb: &ProgressBar) {
    pb.finish_and_clear();
}
