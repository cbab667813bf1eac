/*!
 * Core types shared by the tree renderer and the content gatherer
 */

use std::collections::HashMap;
use std::path::Path;

/// Kind of a filesystem entry as seen by the filter policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Directory (or symlink to one)
    Directory,
    /// Regular file (or symlink to one)
    File,
    /// Anything else: broken links, sockets, fifos
    Other,
}

impl EntryKind {
    /// Classify a path, following symlinks
    pub fn of(path: &Path) -> Self {
        if path.is_dir() {
            Self::Directory
        } else if path.is_file() {
            Self::File
        } else {
            Self::Other
        }
    }

    pub fn is_dir(self) -> bool {
        self == Self::Directory
    }
}

/// Line and character counts for one bundled file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileReportInfo {
    /// Number of lines in the decoded content
    pub lines: usize,
    /// Number of characters in the decoded content
    pub chars: usize,
}

/// Statistics collected while drawing the project tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStatistics {
    /// Directories drawn, excluding the root line
    pub directories: usize,
    /// Files drawn
    pub files: usize,
}

/// Statistics collected while gathering file contents
#[derive(Debug, Clone, Default)]
pub struct GathererStatistics {
    /// Number of file blocks emitted
    pub files_bundled: usize,
    /// Files whose body was replaced by an error placeholder
    pub unreadable_files: usize,
    /// Directories or entries the walk could not list
    pub skipped_entries: usize,
    /// Total number of lines
    pub total_lines: usize,
    /// Total number of characters
    pub total_chars: usize,
    /// Details for each file, keyed by relative path
    pub file_details: HashMap<String, FileReportInfo>,
}
