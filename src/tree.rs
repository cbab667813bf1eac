/*!
 * ASCII-art rendering of the project structure
 */

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::filter::FilterPolicy;
use crate::types::{EntryKind, TreeStatistics};
use crate::utils::entry_name;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// A listed directory entry that survived the filter policy
struct TreeEntry {
    name: String,
    path: PathBuf,
    kind: EntryKind,
    /// Real directory, not a link to one
    descend: bool,
}

/// Renders a directory as a `tree`-style listing
pub struct TreeRenderer<'a> {
    policy: &'a FilterPolicy,
    statistics: RefCell<TreeStatistics>,
}

impl<'a> TreeRenderer<'a> {
    pub fn new(policy: &'a FilterPolicy) -> Self {
        Self {
            policy,
            statistics: RefCell::new(TreeStatistics::default()),
        }
    }

    /// Counts from the last call to [`render`](Self::render)
    pub fn get_statistics(&self) -> TreeStatistics {
        *self.statistics.borrow()
    }

    /// Render `root` and everything below it that the policy admits.
    ///
    /// The first line is the root's own name followed by `/`. Directories
    /// come before files at every level and each group is sorted by name.
    /// Directories that cannot be listed are drawn without children.
    pub fn render(&self, root: &Path) -> String {
        *self.statistics.borrow_mut() = TreeStatistics::default();

        let root_name = fs::canonicalize(root)
            .map(|abs| entry_name(&abs))
            .unwrap_or_else(|_| entry_name(root));

        let mut lines = vec![format!("{}/", root_name)];
        self.render_directory(root, "", &mut lines);
        lines.join("\n")
    }

    fn render_directory(&self, dir: &Path, prefix: &str, lines: &mut Vec<String>) {
        let (dirs, files): (Vec<_>, Vec<_>) = self
            .list_entries(dir)
            .into_iter()
            .partition(|e| e.kind.is_dir());

        let total = dirs.len() + files.len();
        for (i, entry) in dirs.into_iter().chain(files).enumerate() {
            let is_last = i + 1 == total;
            let connector = if is_last { LAST_BRANCH } else { BRANCH };

            if entry.kind.is_dir() {
                lines.push(format!("{}{}{}/", prefix, connector, entry.name));
                self.statistics.borrow_mut().directories += 1;

                if entry.descend {
                    let child_prefix = format!("{}{}", prefix, if is_last { SPACE } else { PIPE });
                    self.render_directory(&entry.path, &child_prefix, lines);
                }
            } else {
                lines.push(format!("{}{}{}", prefix, connector, entry.name));
                self.statistics.borrow_mut().files += 1;
            }
        }
    }

    /// Immediate children of `dir`, sorted by name and filtered
    fn list_entries(&self, dir: &Path) -> Vec<TreeEntry> {
        WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|res| match res {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!("Skipping unreadable entry in {}: {}", dir.display(), e);
                    None
                }
            })
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().to_string();
                let kind = EntryKind::of(entry.path());
                self.policy.admits(&name, kind).then(|| TreeEntry {
                    name,
                    path: entry.path().to_path_buf(),
                    kind,
                    descend: entry.file_type().is_dir(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn policy() -> FilterPolicy {
        FilterPolicy::default()
    }

    #[test]
    fn test_render_nested_tree() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        let root = dir.path();
        fs::create_dir_all(root.join("src").join("bin"))?;
        fs::create_dir(root.join("docs"))?;
        fs::write(root.join("README.md"), "readme")?;
        fs::write(root.join("Cargo.toml"), "[package]")?;
        fs::write(root.join("src").join("lib.rs"), "")?;
        fs::write(root.join("src").join("bin").join("main.rs"), "")?;
        fs::write(root.join("docs").join("guide.md"), "")?;

        let policy = policy();
        let renderer = TreeRenderer::new(&policy);
        let tree = renderer.render(root);
        let root_name = entry_name(&fs::canonicalize(root)?);

        let expected = [
            format!("{}/", root_name),
            "├── docs/".to_string(),
            "│   └── guide.md".to_string(),
            "├── src/".to_string(),
            "│   ├── bin/".to_string(),
            "│   │   └── main.rs".to_string(),
            "│   └── lib.rs".to_string(),
            "├── Cargo.toml".to_string(),
            "└── README.md".to_string(),
        ]
        .join("\n");
        assert_eq!(tree, expected);

        let stats = renderer.get_statistics();
        assert_eq!(stats.directories, 3);
        assert_eq!(stats.files, 5);
        Ok(())
    }

    #[test]
    fn test_last_directory_uses_blank_padding() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        fs::create_dir(dir.path().join("only"))?;
        fs::write(dir.path().join("only").join("a.rs"), "")?;
        fs::write(dir.path().join("only").join("b.rs"), "")?;

        let policy = policy();
        let tree = TreeRenderer::new(&policy).render(dir.path());
        let lines: Vec<&str> = tree.lines().skip(1).collect();
        assert_eq!(lines, vec!["└── only/", "    ├── a.rs", "    └── b.rs"]);
        Ok(())
    }

    #[test]
    fn test_ignored_entries_are_absent() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        let root = dir.path();
        fs::create_dir_all(root.join("node_modules").join("pkg"))?;
        fs::write(root.join("node_modules").join("pkg").join("index.js"), "")?;
        fs::create_dir_all(root.join("app").join(".git"))?;
        fs::write(root.join("app").join(".git").join("HEAD"), "")?;
        fs::write(root.join("a.txt"), "hello")?;
        fs::write(root.join("img.png"), [0u8])?;
        fs::write(root.join(".DS_Store"), "")?;

        let policy = policy();
        let tree = TreeRenderer::new(&policy).render(root);
        let lines: Vec<&str> = tree.lines().skip(1).collect();
        assert_eq!(lines, vec!["├── app/", "└── a.txt"]);
        assert!(!tree.contains("node_modules"));
        assert!(!tree.contains("index.js"));
        assert!(!tree.contains("HEAD"));
        Ok(())
    }

    #[test]
    fn test_empty_root_renders_single_line() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        let policy = policy();
        let tree = TreeRenderer::new(&policy).render(dir.path());
        assert_eq!(tree.lines().count(), 1);
        assert!(tree.ends_with('/'));
        Ok(())
    }

    #[test]
    fn test_missing_root_contributes_nothing() {
        let policy = policy();
        let tree = TreeRenderer::new(&policy).render(Path::new("/definitely/not/here"));
        assert_eq!(tree, "here/");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_is_not_descended() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        let root = dir.path();
        fs::create_dir(root.join("real"))?;
        fs::write(root.join("real").join("file.rs"), "")?;
        std::os::unix::fs::symlink(root.join("real"), root.join("alias"))?;

        let policy = policy();
        let tree = TreeRenderer::new(&policy).render(root);
        let lines: Vec<&str> = tree.lines().skip(1).collect();
        assert_eq!(lines, vec!["├── alias/", "└── real/", "    └── file.rs"]);
        Ok(())
    }

    #[test]
    fn test_render_is_repeatable() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        for name in ["b.rs", "a.rs", "c.rs"] {
            fs::write(dir.path().join(name), name)?;
        }
        let policy = policy();
        let renderer = TreeRenderer::new(&policy);
        assert_eq!(renderer.render(dir.path()), renderer.render(dir.path()));
        assert_eq!(renderer.get_statistics().files, 3);
        Ok(())
    }
}
