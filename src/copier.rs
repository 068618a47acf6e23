use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::Result;
use crate::progress::{FileOutcome, ProgressSink};
use crate::record::{self, ParseOutcome};

/// Counters for one copy.
///
/// `total` is every file under the source. Files that are not records are
/// counted in `skipped` and not in `processed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyProgress {
    pub processed: usize,
    pub skipped: usize,
    pub total: usize,
}

/// One step of a copy, in walk order. A directory always precedes the
/// entries beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkItem {
    Directory {
        destination: PathBuf,
    },
    File {
        source: PathBuf,
        destination: PathBuf,
    },
}

fn walk(root: &Path) -> WalkDir {
    WalkDir::new(root).follow_links(true).sort_by_file_name()
}

/// Number of non-directory entries anywhere under `dir`.
pub fn count_files(dir: &Path) -> Result<usize> {
    let mut count = 0;
    for entry in walk(dir) {
        if !entry?.file_type().is_dir() {
            count += 1;
        }
    }
    Ok(count)
}

/// Lazily maps the tree under `source` onto `destination`. The first item is
/// always the destination root itself.
pub fn work_items<'a>(
    source: &'a Path,
    destination: &'a Path,
) -> impl Iterator<Item = Result<WorkItem>> + 'a {
    walk(source).into_iter().map(move |entry| -> Result<WorkItem> {
        let entry = entry?;
        let relative = entry.path().strip_prefix(source).map_err(|_| {
            io::Error::new(
                io::ErrorKind::Other,
                format!(
                    "{} is not under {}",
                    entry.path().display(),
                    source.display()
                ),
            )
        })?;
        let target = if relative.as_os_str().is_empty() {
            destination.to_path_buf()
        } else {
            destination.join(relative)
        };

        if entry.file_type().is_dir() {
            Ok(WorkItem::Directory {
                destination: target,
            })
        } else {
            Ok(WorkItem::File {
                source: entry.into_path(),
                destination: target,
            })
        }
    })
}

/// Relabels one file into `destination`, or skips it if it is not a record.
pub fn copy_file(patient_label: &str, source: &Path, destination: &Path) -> Result<FileOutcome> {
    match record::read_record(source)? {
        ParseOutcome::Parsed(mut obj) => {
            record::set_patient_name(&mut obj, patient_label);
            record::write_record(&obj, destination)?;
            debug!("Rewrote {} -> {}", source.display(), destination.display());
            Ok(FileOutcome::Rewritten)
        }
        ParseOutcome::NotThisFormat => {
            debug!("Skipping non-record file {}", source.display());
            Ok(FileOutcome::Skipped)
        }
    }
}

/// Mirrors `source` under `destination`, rewriting the patient name of every
/// record to `patient_label`.
///
/// The sink gets one `on_file` call per file, including skipped ones. Any
/// I/O or record error aborts the copy and leaves what was already written.
pub fn copy_tree(
    patient_label: &str,
    source: &Path,
    destination: &Path,
    sink: &dyn ProgressSink,
) -> Result<CopyProgress> {
    let mut progress = CopyProgress {
        total: count_files(source)?,
        ..CopyProgress::default()
    };
    info!(
        "Copying {} file(s) from {} to {}",
        progress.total,
        source.display(),
        destination.display()
    );
    sink.on_copy_start(progress.total);

    for item in work_items(source, destination) {
        match item? {
            WorkItem::Directory { destination: dir } => fs::create_dir_all(&dir)?,
            WorkItem::File {
                source: from,
                destination: to,
            } => {
                let outcome = copy_file(patient_label, &from, &to)?;
                match outcome {
                    FileOutcome::Rewritten => progress.processed += 1,
                    FileOutcome::Skipped => progress.skipped += 1,
                }
                sink.on_file(&from, outcome);
            }
        }
    }

    sink.on_copy_complete(&progress);
    info!(
        "Copied {} of {} file(s), {} skipped",
        progress.processed, progress.total, progress.skipped
    );
    Ok(progress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_count_files_ignores_directories() {
        let tmp = tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("a/b/c")).unwrap();
        fs::create_dir_all(tmp.path().join("empty")).unwrap();
        fs::write(tmp.path().join("top.txt"), "x").unwrap();
        fs::write(tmp.path().join("a/b/c/deep.txt"), "x").unwrap();
        assert_eq!(count_files(tmp.path()).unwrap(), 2);
    }

    #[test]
    fn test_work_items_directory_precedes_children() {
        let tmp = tempdir().unwrap();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");
        fs::create_dir_all(src.join("sub")).unwrap();
        fs::write(src.join("sub/file.txt"), "x").unwrap();

        let items: Vec<WorkItem> = work_items(&src, &dst).map(|i| i.unwrap()).collect();
        assert_eq!(
            items,
            vec![
                WorkItem::Directory {
                    destination: dst.clone()
                },
                WorkItem::Directory {
                    destination: dst.join("sub")
                },
                WorkItem::File {
                    source: src.join("sub/file.txt"),
                    destination: dst.join("sub/file.txt"),
                },
            ]
        );
    }

    #[test]
    fn test_copy_file_skips_non_record() {
        let tmp = tempdir().unwrap();
        let src = tmp.path().join("notes.txt");
        let dst = tmp.path().join("out.txt");
        fs::write(&src, "not an image").unwrap();
        assert_eq!(copy_file("L", &src, &dst).unwrap(), FileOutcome::Skipped);
        assert!(!dst.exists());
    }

    #[test]
    fn test_count_files_missing_source_is_an_error() {
        let tmp = tempdir().unwrap();
        assert!(count_files(&tmp.path().join("missing")).is_err());
    }
}
