use std::path::Path;
use std::sync::Mutex;

use disc_intake::progress::{FileOutcome, ProgressSink};
use disc_intake::CopyProgress;
use indicatif::{ProgressBar, ProgressStyle};

/// Draws one progress bar per copy on the terminal.
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock() {
            if let Some(pb) = guard.as_ref() {
                f(pb);
            }
        }
    }
}

impl ProgressSink for CliReporter {
    fn on_copy_start(&self, total_files: usize) {
        let pb = ProgressBar::new(total_files as u64);
        if let Ok(style) = ProgressStyle::with_template(
            "{msg}: {percent:>3}%|{bar:30.cyan/dim}| {pos}/{len} [{elapsed_precise}<{eta_precise}] file(s)",
        ) {
            pb.set_style(style.progress_chars("█▉ "));
        }
        pb.set_message("Copying files");

        if let Ok(mut guard) = self.bar.lock() {
            if let Some(old) = guard.replace(pb) {
                old.finish_and_clear();
            }
        }
    }

    fn on_file(&self, _path: &Path, _outcome: FileOutcome) {
        self.with_bar(|pb| pb.inc(1));
    }

    fn on_copy_complete(&self, progress: &CopyProgress) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(pb) = guard.take() {
                pb.finish_with_message(format!("Copied ({} skipped)", progress.skipped));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(reporter: &CliReporter) -> Option<u64> {
        reporter.bar.lock().unwrap().as_ref().map(|pb| pb.position())
    }

    #[test]
    fn test_file_before_start_is_ignored() {
        let reporter = CliReporter::new();
        reporter.on_file(Path::new("a.dcm"), FileOutcome::Rewritten);
        assert_eq!(position(&reporter), None);
    }

    #[test]
    fn test_bar_counts_every_file_and_clears_on_complete() {
        let reporter = CliReporter::new();
        reporter.on_copy_start(3);
        reporter.on_file(Path::new("a.dcm"), FileOutcome::Rewritten);
        reporter.on_file(Path::new("notes.txt"), FileOutcome::Skipped);
        assert_eq!(position(&reporter), Some(2));

        reporter.on_copy_complete(&CopyProgress {
            processed: 1,
            skipped: 1,
            total: 3,
        });
        assert_eq!(position(&reporter), None);
    }
}
