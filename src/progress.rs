use std::path::Path;

use crate::copier::CopyProgress;

/// What happened to one file during a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Parsed as a record, relabelled and written.
    Rewritten,
    /// Not a record; nothing written.
    Skipped,
}

/// Receives copy progress.
///
/// `on_file` is called exactly once per file, whatever its outcome, so the
/// number of calls always equals the total announced in `on_copy_start`.
/// All methods have default no-op implementations.
pub trait ProgressSink: Send + Sync {
    fn on_copy_start(&self, _total_files: usize) {}
    fn on_file(&self, _path: &Path, _outcome: FileOutcome) {}
    fn on_copy_complete(&self, _progress: &CopyProgress) {}
}

/// No-op sink for silent operation.
pub struct SilentSink;

impl ProgressSink for SilentSink {}
