mod cli;
mod logging;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use journal_engine::{run_batch, BatchConfig};
use journal_logging::journal_error;

use crate::cli::Cli;
use crate::logging::LogOptions;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::initialize(&LogOptions {
        level: cli.log_level(),
        log_file: cli.log_file.clone(),
    });

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            journal_error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = BatchConfig {
        input_dir: cli.input_dir,
        output_dir: cli.output_dir,
    };
    run_batch(&config).with_context(|| {
        format!(
            "converting {} into {}",
            config.input_dir.display(),
            config.output_dir.display()
        )
    })?;
    Ok(())
}
