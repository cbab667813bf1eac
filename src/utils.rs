/*!
 * Utility functions for codebundle
 */

use std::path::Path;

use once_cell::sync::Lazy;
use walkdir::WalkDir;

use crate::config::OUTPUT_FILENAME;
use crate::filter::FilterPolicy;
use crate::types::EntryKind;

/// Count the files the gatherer will emit, for progress tracking
pub fn count_files(dir: &Path, policy: &FilterPolicy) -> u64 {
    let mut count = 0;

    let walker = WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0 || !e.file_type().is_dir() || !policy.prunes(&entry_name(e.path()))
        });

    for entry in walker.filter_map(Result::ok) {
        if entry.depth() == 0 || entry.file_type().is_dir() {
            continue;
        }
        let kind = EntryKind::of(entry.path());
        if kind == EntryKind::File && policy.admits(&entry_name(entry.path()), kind) {
            count += 1;
        }
    }

    count
}

/// Final path component as an owned string
pub fn entry_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

/// Decode bytes as UTF-8, dropping any invalid sequences
pub fn decode_permissive(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

/// Directories skipped at any depth
pub static DEFAULT_IGNORE_DIRS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        ".git",
        ".venv",
        "__pycache__",
        "instance",
        ".vscode",
        ".mypy_cache",
        "node_modules",
        "dist",
        ".vite",
        "build",
    ]
});

/// File names skipped at any depth
pub static DEFAULT_IGNORE_FILES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        ".DS_Store",
        "package-lock.json",
        OUTPUT_FILENAME,
        "tempCodeRunnerFile.py",
        // Secrets
        ".env",
    ]
});

/// Suffixes of binary and asset files
pub static DEFAULT_IGNORE_EXTENSIONS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Images
        ".png", ".jpg", ".jpeg", ".gif", ".svg", ".ico", ".webp",
        // Documents & Archives
        ".pdf", ".zip", ".gz", ".tar", ".rar",
        // Media
        ".mp3", ".mp4", ".mov", ".avi",
        // Fonts
        ".woff", ".woff2", ".eot", ".ttf", ".otf",
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_permissive_drops_invalid_bytes() {
        assert_eq!(decode_permissive(b"hello"), "hello");
        assert_eq!(decode_permissive(b"he\xffllo\xc3"), "hello");
        assert_eq!(decode_permissive("héllo".as_bytes()), "héllo");
        assert_eq!(decode_permissive(b""), "");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(512), "512 bytes");
        assert_eq!(format_file_size(2048), "2.00 KB");
        assert_eq!(format_file_size(3 * 1024 * 1024), "3.00 MB");
    }

    #[test]
    fn test_count_files_respects_policy() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::create_dir(dir.path().join("node_modules"))?;
        std::fs::write(dir.path().join("node_modules").join("x.js"), "x")?;
        std::fs::write(dir.path().join("a.txt"), "a")?;
        std::fs::write(dir.path().join("img.png"), [0u8])?;

        assert_eq!(count_files(dir.path(), &FilterPolicy::default()), 1);
        Ok(())
    }
}
