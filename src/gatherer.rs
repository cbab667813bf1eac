/*!
 * File content gathering
 */

use std::cell::RefCell;
use std::cmp::Ordering;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use indicatif::ProgressBar;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::filter::FilterPolicy;
use crate::types::{EntryKind, FileReportInfo, GathererStatistics};
use crate::utils::{decode_permissive, entry_name};

/// Line opening a file block
pub fn start_marker(rel_path: &str) -> String {
    format!("--- START OF FILE {} ---", rel_path)
}

/// Line closing a file block
pub fn end_marker(rel_path: &str) -> String {
    format!("--- END OF FILE {} ---", rel_path)
}

/// Body written in place of a file that could not be read
pub fn error_placeholder(err: &std::io::Error) -> String {
    format!("*** Error reading file: {} ***", err)
}

/// Concatenates every admitted file below a root into delimited blocks
pub struct ContentGatherer<'a> {
    policy: &'a FilterPolicy,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
    statistics: RefCell<GathererStatistics>,
}

impl<'a> ContentGatherer<'a> {
    pub fn new(policy: &'a FilterPolicy, progress: Arc<ProgressBar>) -> Self {
        Self {
            policy,
            progress,
            statistics: RefCell::new(GathererStatistics::default()),
        }
    }

    /// Statistics from the last call to [`gather`](Self::gather)
    pub fn get_statistics(&self) -> GathererStatistics {
        self.statistics.borrow().clone()
    }

    /// Walk `root` top-down and emit one block per admitted file.
    ///
    /// Within a directory, files come first in name order, then each
    /// subdirectory is walked in name order. Pruned directories are never
    /// entered. Each block is a start marker, the decoded content and an end
    /// marker, with a blank line between blocks.
    pub fn gather(&self, root: &Path) -> String {
        *self.statistics.borrow_mut() = GathererStatistics::default();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by(files_then_directories)
            .into_iter()
            .filter_entry(|e| !self.is_pruned(e));

        let mut parts = Vec::new();
        for res in walker {
            let entry = match res {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Skipping unreadable entry under {}: {}", root.display(), e);
                    self.statistics.borrow_mut().skipped_entries += 1;
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }

            let kind = EntryKind::of(entry.path());
            if kind != EntryKind::File || !self.policy.admits(&entry_name(entry.path()), kind) {
                continue;
            }

            let rel_path = relative_path(root, entry.path());
            parts.push(start_marker(&rel_path));
            parts.push(self.read_file_content(entry.path(), &rel_path));
            parts.push(format!("{}\n", end_marker(&rel_path)));
        }

        parts.join("\n")
    }

    fn is_pruned(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && self.policy.prunes(&entry.file_name().to_string_lossy())
    }

    /// Read a file's content, or an error placeholder, and update statistics
    pub fn read_file_content(&self, path: &Path, rel_path: &str) -> String {
        self.progress.inc(1);
        self.progress.set_message(format!("Current file: {}", rel_path));

        let mut stats = self.statistics.borrow_mut();
        stats.files_bundled += 1;

        match fs::read(path) {
            Ok(bytes) => {
                let content = decode_permissive(&bytes);
                let info = FileReportInfo {
                    lines: content.lines().count(),
                    chars: content.chars().count(),
                };
                stats.total_lines += info.lines;
                stats.total_chars += info.chars;
                stats.file_details.insert(rel_path.to_string(), info);
                content
            }
            Err(e) => {
                debug!("Failed to read {}: {}", path.display(), e);
                stats.unreadable_files += 1;
                stats
                    .file_details
                    .insert(rel_path.to_string(), FileReportInfo::default());
                error_placeholder(&e)
            }
        }
    }
}

/// Sibling order: files before directories, then by name
fn files_then_directories(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

/// `path` relative to `root`, always `/`-separated
pub fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
