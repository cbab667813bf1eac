/*!
 * Bundle document assembly and output
 */

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::config::Config;
use crate::error::{Result, ResultExt};
use crate::gatherer::start_marker;

pub const STRUCTURE_START: &str = "--- PROJECT STRUCTURE ---";
pub const STRUCTURE_END: &str = "--- END OF PROJECT STRUCTURE ---";

/// Writes the bundle document to the configured output file
pub struct BundleWriter {
    /// Writer configuration
    config: Config,
}

impl BundleWriter {
    /// Create a new bundle writer
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Header naming the output file followed by the project structure block
    pub fn header(&self, tree: &str) -> String {
        format!(
            "{}\n\n{}\n\n{}\n\n{}\n\n",
            start_marker(&self.config.output_name()),
            STRUCTURE_START,
            tree,
            STRUCTURE_END
        )
    }

    /// Assemble the full document from the tree and the gathered contents
    pub fn compose(&self, tree: &str, contents: &str) -> String {
        let mut document = self.header(tree);
        document.push_str(contents);
        document
    }

    /// Write the document, replacing any previous bundle
    pub fn write(&self, document: &str) -> Result<()> {
        let path = &self.config.output_file;
        let context = || format!("Failed to write bundle to {}", path.display());

        let file = File::create(path).with_context(context)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(document.as_bytes()).with_context(context)?;
        writer.flush().with_context(context)?;

        Ok(())
    }
}
