/*!
 * codebundle - Bundle a project into a single text document for LLM context
 *
 * This library renders a project's directory tree, concatenates the contents
 * of every non-ignored file between start/end markers, and writes the result
 * to one document that can be pasted into another context.
 */

pub mod bundle;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod filter;
pub mod gatherer;
pub mod logger;
pub mod report;
pub mod tree;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use bundle::{BundleOutcome, Bundler};
pub use clipboard::{Clipboard, ClipboardError, DisabledClipboard, SystemClipboard};
pub use config::Config;
pub use error::{BundleError, Result};
pub use filter::FilterPolicy;
pub use gatherer::ContentGatherer;
pub use report::{BundleReport, Reporter};
pub use tree::TreeRenderer;
pub use types::{EntryKind, FileReportInfo, GathererStatistics, TreeStatistics};
pub use utils::{count_files, format_file_size};
pub use writer::BundleWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
