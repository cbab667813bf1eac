/*!
 * Reporting functionality for codebundle
 *
 * Renders the completion summary printed after a bundle has been written,
 * using the tabled library for table rendering.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::types::{GathererStatistics, TreeStatistics};
use crate::utils::format_file_size;

/// Number of files listed when the bundle is large
const TOP_FILES: usize = 10;
/// Bundles with more files than this only list the largest ones
const FULL_LISTING_LIMIT: usize = 15;

/// Statistics for one bundling run
#[derive(Debug, Clone)]
pub struct BundleReport {
    /// Output file path
    pub output_file: String,
    /// Size of the written document in bytes
    pub output_bytes: u64,
    /// Time taken by the whole run
    pub duration: Duration,
    /// Whether the clipboard copy succeeded
    pub copied_to_clipboard: bool,
    /// Tree renderer counts
    pub tree: TreeStatistics,
    /// Content gatherer counts
    pub contents: GathererStatistics,
}

/// Report generator for bundling results
pub struct Reporter;

impl Reporter {
    /// Format a number with human-readable units
    fn format_number(num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Print the report to stdout
    pub fn print_report(report: &BundleReport) {
        println!("\n{}", Self::generate_report(report));
    }

    /// Generate the files table followed by the summary table
    pub fn generate_report(report: &BundleReport) -> String {
        let files_title = if report.contents.file_details.len() > FULL_LISTING_LIMIT {
            "📋  TOP 10 LARGEST FILES BY CHARACTER COUNT  📋"
        } else {
            "📋  BUNDLED FILES"
        };

        format!(
            "{}\n{}\n\n{}\n{}",
            files_title,
            Self::create_files_table(report),
            "✅  BUNDLE COMPLETE",
            Self::create_summary_table(report)
        )
    }

    fn create_summary_table(report: &BundleReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: &'static str,

            #[tabled(rename = "Value")]
            value: String,
        }

        let stats = &report.contents;
        let rows = vec![
            SummaryRow {
                key: "📂 Output File",
                value: format!(
                    "{} ({})",
                    report.output_file,
                    format_file_size(report.output_bytes)
                ),
            },
            SummaryRow {
                key: "⏱️ Process Time",
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "🌳 Tree Entries",
                value: format!(
                    "{} directories, {} files",
                    Self::format_number(report.tree.directories),
                    Self::format_number(report.tree.files)
                ),
            },
            SummaryRow {
                key: "📄 Files Bundled",
                value: Self::format_number(stats.files_bundled),
            },
            SummaryRow {
                key: "⚠️ Unreadable Files",
                value: Self::format_number(stats.unreadable_files),
            },
            SummaryRow {
                key: "🚫 Skipped Entries",
                value: Self::format_number(stats.skipped_entries),
            },
            SummaryRow {
                key: "📝 Total Lines",
                value: Self::format_number(stats.total_lines),
            },
            SummaryRow {
                key: "📦 LLM Tokens",
                value: format!(
                    "{} tokens (estimated)",
                    Self::format_number(stats.total_chars / 4)
                ),
            },
            SummaryRow {
                key: "📋 Clipboard",
                value: if report.copied_to_clipboard {
                    "copied".to_string()
                } else {
                    "not copied".to_string()
                },
            },
        ];

        Self::style(Table::new(rows))
    }

    fn create_files_table(report: &BundleReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Lines")]
            lines: String,

            #[tabled(rename = "Est. Tokens")]
            tokens: String,
        }

        // Largest first, ties by path so the listing is stable
        let mut files: Vec<_> = report.contents.file_details.iter().collect();
        files.sort_by(|(pa, a), (pb, b)| b.chars.cmp(&a.chars).then_with(|| pa.cmp(pb)));
        if files.len() > FULL_LISTING_LIMIT {
            files.truncate(TOP_FILES);
        }

        let rows: Vec<FileRow> = files
            .into_iter()
            .map(|(path, info)| FileRow {
                path: path.clone(),
                lines: Self::format_number(info.lines),
                tokens: Self::format_number(info.chars / 4),
            })
            .collect();

        Self::style(Table::new(rows))
    }

    fn style(mut table: Table) -> String {
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }
}
