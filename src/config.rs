/*!
 * Configuration handling for codebundle
 */

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::ensure;
use crate::error::Result;
use crate::filter::FilterPolicy;

/// Directory bundled when none is given
pub const DEFAULT_ROOT_DIR: &str = ".";

/// Name of the bundle written into the root directory
pub const OUTPUT_FILENAME: &str = "project_bundle.txt";

/// Command-line arguments for codebundle
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "codebundle",
    version = env!("CARGO_PKG_VERSION"),
    about = "Bundle a project's tree and file contents into a single text document",
    long_about = "Renders the project structure and concatenates every non-ignored file into one document, writes it next to the project and copies it to the clipboard."
)]
pub struct Args {
    /// Project directory to bundle
    #[clap(default_value = DEFAULT_ROOT_DIR)]
    pub directory_path: String,

    /// Output file name, relative to the project directory
    #[clap(long, short, default_value = OUTPUT_FILENAME)]
    pub output: String,

    /// Skip copying the bundle to the clipboard
    #[clap(long)]
    pub no_clip: bool,
}

/// Application configuration, built once at startup
#[derive(Clone, Debug)]
pub struct Config {
    /// Root of the traversal
    pub root_dir: PathBuf,

    /// Path the bundle is written to
    pub output_file: PathBuf,

    /// Ignore rules applied by both the tree renderer and the gatherer
    pub policy: FilterPolicy,

    /// Copy the bundle to the clipboard
    pub clip: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(PathBuf::from(DEFAULT_ROOT_DIR), OUTPUT_FILENAME)
    }
}

impl Config {
    /// Configuration for `root_dir` with the stock ignore rules
    pub fn new(root_dir: PathBuf, output: &str) -> Self {
        let output_path = PathBuf::from(output);
        let output_file = if output_path.is_absolute() {
            output_path
        } else {
            root_dir.join(output_path)
        };

        // The bundle never includes itself; an output outside the root hides nothing
        let policy = match output_file.file_name() {
            Some(name) if is_in_directory(&output_file, &root_dir) => {
                FilterPolicy::default().with_ignored_file(name.to_string_lossy())
            }
            _ => FilterPolicy::default(),
        };

        Self {
            root_dir,
            output_file,
            policy,
            clip: true,
        }
    }

    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        let mut config = Self::new(PathBuf::from(args.directory_path), &args.output);
        config.clip = !args.no_clip;
        config
    }

    /// Name of the output file as printed in the bundle header
    pub fn output_name(&self) -> String {
        self.output_file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| OUTPUT_FILENAME.to_string())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.root_dir.is_dir(),
            PathNotFound,
            "Project directory not found: {}",
            self.root_dir.display()
        );

        ensure!(
            is_in_directory(&self.output_file, &self.root_dir)
                || !is_below(&self.output_file, &self.root_dir),
            Config,
            "Output file must be in the project directory itself or outside it: {}",
            self.output_file.display()
        );

        if let Some(parent) = self.output_file.parent() {
            ensure!(
                parent.as_os_str().is_empty() || parent.is_dir(),
                Config,
                "Output directory not found: {}",
                parent.display()
            );
        }

        Ok(())
    }
}

/// True when `path` sits directly in `dir`
fn is_in_directory(path: &Path, dir: &Path) -> bool {
    match path.parent() {
        Some(parent) if parent == dir => true,
        Some(parent) => same_directory(parent, dir),
        None => false,
    }
}

/// True when `path` lies anywhere below `dir`
fn is_below(path: &Path, dir: &Path) -> bool {
    match (path.parent().map(fs::canonicalize), fs::canonicalize(dir)) {
        (Some(Ok(parent)), Ok(dir)) => parent.starts_with(dir),
        _ => path.starts_with(dir),
    }
}

fn same_directory(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
