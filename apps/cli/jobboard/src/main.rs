use jobboard::cli::Cli;
use jobboard::commands::{config_dir, run};
use jobboard::error::CliError;
use jobboard::logger::initialize as LoggerInitialize;

use std::fs::create_dir_all;
use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, error, info};

const LOG_DIR_NAME: &str = "logs";

fn start_logging(cli: &Cli) -> Result<(), CliError> {
    let log_dir = config_dir(cli)?.join(LOG_DIR_NAME);
    create_dir_all(&log_dir).map_err(|e| {
        CliError::jobboard(format!(
            "Failed to create log directory {}: {e}",
            log_dir.display()
        ))
    })?;

    let console_level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    LoggerInitialize(&log_dir, console_level)?;

    info!("Log directory: {}", log_dir.display());
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = start_logging(&cli) {
        eprintln!("Logging disabled: {}", e.user_message());
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
