/*!
 * Filter policy deciding which entries make it into a bundle
 */

use std::collections::BTreeSet;

use crate::types::EntryKind;
use crate::utils::{DEFAULT_IGNORE_DIRS, DEFAULT_IGNORE_EXTENSIONS, DEFAULT_IGNORE_FILES};

/// Immutable set of ignore rules shared by the tree renderer and the gatherer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPolicy {
    ignore_dirs: BTreeSet<String>,
    ignore_files: BTreeSet<String>,
    ignore_extensions: BTreeSet<String>,
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_IGNORE_DIRS.iter().copied(),
            DEFAULT_IGNORE_FILES.iter().copied(),
            DEFAULT_IGNORE_EXTENSIONS.iter().copied(),
        )
    }
}

impl FilterPolicy {
    /// Build a policy from explicit directory names, file names and extensions
    pub fn new<D, F, E>(dirs: D, files: F, extensions: E) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        Self {
            ignore_dirs: dirs.into_iter().map(Into::into).collect(),
            ignore_files: files.into_iter().map(Into::into).collect(),
            ignore_extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }

    /// Return a copy of this policy that also ignores `name`
    pub fn with_ignored_file(mut self, name: impl Into<String>) -> Self {
        self.ignore_files.insert(name.into());
        self
    }

    /// Whether a directory with this name is pruned from traversal
    pub fn prunes(&self, name: &str) -> bool {
        self.ignore_dirs.contains(name) || self.ignore_files.contains(name)
    }

    /// Whether an entry with this name and kind is included
    pub fn admits(&self, name: &str, kind: EntryKind) -> bool {
        match kind {
            EntryKind::Directory => !self.prunes(name),
            EntryKind::File => {
                !self.ignore_files.contains(name)
                    && !self
                        .ignore_extensions
                        .iter()
                        .any(|ext| name.ends_with(ext.as_str()))
            }
            EntryKind::Other => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignored_directory_is_pruned() {
        let policy = FilterPolicy::default();
        assert!(policy.prunes("node_modules"));
        assert!(!policy.admits(".git", EntryKind::Directory));
        assert!(policy.admits("src", EntryKind::Directory));
    }

    #[test]
    fn test_directory_rule_does_not_apply_to_files() {
        let policy = FilterPolicy::default();
        assert!(policy.admits("build", EntryKind::File));
        assert!(!policy.admits("build", EntryKind::Directory));
    }

    #[test]
    fn test_ignored_file_names_apply_to_both_kinds() {
        let policy = FilterPolicy::default();
        assert!(!policy.admits(".DS_Store", EntryKind::File));
        assert!(!policy.admits(".env", EntryKind::Directory));
        assert!(policy.admits(".envrc", EntryKind::File));
    }

    #[test]
    fn test_extension_suffix_is_case_sensitive() {
        let policy = FilterPolicy::default();
        assert!(!policy.admits("logo.png", EntryKind::File));
        assert!(!policy.admits("font.woff2", EntryKind::File));
        assert!(policy.admits("LOGO.PNG", EntryKind::File));
        // Extension rule is for files only
        assert!(policy.admits("assets.png", EntryKind::Directory));
    }

    #[test]
    fn test_other_entries_are_never_admitted() {
        let none: [&str; 0] = [];
        let policy = FilterPolicy::new(none, none, none);
        assert!(!policy.admits("socket", EntryKind::Other));
    }

    #[test]
    fn test_with_ignored_file() {
        let policy =
            FilterPolicy::new(["target"], ["Cargo.lock"], [".rlib"]).with_ignored_file("out.txt");
        assert!(!policy.admits("out.txt", EntryKind::File));
        assert!(!policy.admits("Cargo.lock", EntryKind::File));
        assert!(!policy.admits("libfoo.rlib", EntryKind::File));
        assert!(policy.admits("main.rs", EntryKind::File));
        assert!(policy.prunes("target"));
    }
}
