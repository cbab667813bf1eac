/*!
 * Command-line interface for codebundle
 */

use std::io;
use std::sync::Arc;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use codebundle::clipboard::{Clipboard, DisabledClipboard, SystemClipboard};
use codebundle::config::{Args, Config};
use codebundle::logger::initialize_logger;
use codebundle::report::Reporter;
use codebundle::utils::count_files;
use codebundle::Bundler;

fn main() -> io::Result<()> {
    let args = Args::parse();
    initialize_logger();

    let config = Config::from_args(args);
    config.validate()?;

    // Sized by the same rules the gatherer applies
    let total_files = count_files(&config.root_dir, &config.policy);
    let progress = ProgressBar::new(total_files);
    match ProgressStyle::default_bar()
        .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len} ({percent}%)")
    {
        Ok(style) => progress.set_style(style),
        Err(e) => tracing::debug!("Falling back to default progress style: {}", e),
    }
    progress.set_prefix("📚 Gathering");

    let clipboard: Box<dyn Clipboard> = if config.clip {
        Box::new(SystemClipboard)
    } else {
        Box::new(DisabledClipboard)
    };

    let bundler = Bundler::new(config, clipboard.as_ref(), Arc::new(progress));
    let outcome = bundler.run()?;

    Reporter::print_report(&outcome.report());

    Ok(())
}
