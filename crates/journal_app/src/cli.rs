use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

/// Convert exported HTML journal entries to Markdown.
#[derive(Debug, Parser)]
#[command(name = "journal2md", version, about, long_about = None)]
pub struct Cli {
    /// Directory containing the exported entry files.
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Directory where Markdown files and the Media tree are written.
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Log every file written or skipped.
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only report errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Also append the log to this file.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else if self.quiet {
            LevelFilter::Error
        } else {
            LevelFilter::Info
        }
    }
}
