/*!
 * End-to-end bundling run: tree, contents, output file, clipboard
 */

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use indicatif::ProgressBar;
use tracing::{debug, warn};

use crate::clipboard::{Clipboard, ClipboardError};
use crate::config::Config;
use crate::error::Result;
use crate::gatherer::ContentGatherer;
use crate::report::BundleReport;
use crate::tree::TreeRenderer;
use crate::types::{GathererStatistics, TreeStatistics};
use crate::writer::BundleWriter;

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct BundleOutcome {
    /// The full bundle document
    pub document: String,
    /// Where the document was written
    pub output_file: PathBuf,
    /// Whether the clipboard copy succeeded
    pub copied_to_clipboard: bool,
    pub tree: TreeStatistics,
    pub contents: GathererStatistics,
    pub duration: Duration,
}

impl BundleOutcome {
    /// Summary used by the console report
    pub fn report(&self) -> BundleReport {
        BundleReport {
            output_file: self.output_file.display().to_string(),
            output_bytes: self.document.len() as u64,
            duration: self.duration,
            copied_to_clipboard: self.copied_to_clipboard,
            tree: self.tree,
            contents: self.contents.clone(),
        }
    }
}

/// Runs each stage of a bundle exactly once
pub struct Bundler<'a> {
    config: Config,
    clipboard: &'a dyn Clipboard,
    progress: Arc<ProgressBar>,
}

impl<'a> Bundler<'a> {
    pub fn new(config: Config, clipboard: &'a dyn Clipboard, progress: Arc<ProgressBar>) -> Self {
        Self {
            config,
            clipboard,
            progress,
        }
    }

    /// Render, gather, write and copy.
    ///
    /// Only a failure to write the output file is returned as an error.
    /// Unreadable directories and files are skipped or replaced by a
    /// placeholder, and a clipboard failure is reported on stdout.
    pub fn run(&self) -> Result<BundleOutcome> {
        let start_time = Instant::now();
        let policy = &self.config.policy;
        let root = &self.config.root_dir;
        let output_name = self.config.output_name();

        debug!("Bundling {} with {:?}", root.display(), policy);
        println!("🚀 Starting project bundling process...");

        let renderer = TreeRenderer::new(policy);
        let tree = renderer.render(root);

        println!("📚 Gathering file contents...");
        let gatherer = ContentGatherer::new(policy, Arc::clone(&self.progress));
        let contents = gatherer.gather(root);
        self.progress.finish_and_clear();

        let writer = BundleWriter::new(self.config.clone());
        let document = writer.compose(&tree, &contents);

        println!("💾 Saving bundle to '{}'...", output_name);
        writer.write(&document)?;

        let copied_to_clipboard = match self.clipboard.copy_to_clipboard(&document) {
            Ok(()) => {
                println!("📋✅ Project bundle successfully copied to clipboard!");
                true
            }
            Err(ClipboardError::Disabled) => {
                println!("📋 Clipboard copy skipped.");
                false
            }
            Err(e) => {
                warn!("Clipboard copy failed: {}", e);
                println!(
                    "📋❌ Could not copy to clipboard. Please copy contents from '{}'.",
                    output_name
                );
                false
            }
        };

        println!("\n✨ Process complete.");

        Ok(BundleOutcome {
            document,
            output_file: self.config.output_file.clone(),
            copied_to_clipboard,
            tree: renderer.get_statistics(),
            contents: gatherer.get_statistics(),
            duration: start_time.elapsed(),
        })
    }
}
