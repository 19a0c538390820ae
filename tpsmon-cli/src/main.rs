//! tpsmon - TPS telemetry collection and charting

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;

use tpsmon_common::{Clock, LoggingConfig, SystemClock};
use tpsmon_config::ConfigLoader;

mod collect;
mod report;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Collect and chart per-minute transaction rates", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sample the transaction database for one day and store the per-minute series
    Collect {
        /// Specific date to collect (format: YYYY-MM-DD); defaults to yesterday
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Render the TPS chart for a previously collected day
    Report {
        /// Specific date to report (format: YYYY-MM-DD); defaults to yesterday
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    tpsmon_common::init_logging(LoggingConfig {
        level: config.logging.level.clone(),
        file_path: config.logging.file.clone(),
        ..LoggingConfig::default()
    })
    .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    info!("Configuration loaded");

    match args.command {
        Command::Collect { date } => {
            let target = date.unwrap_or_else(|| SystemClock.yesterday());
            collect::run(&config, target).await
        }
        Command::Report { date } => {
            let target = date.unwrap_or_else(|| SystemClock.yesterday());
            report::run(&config, target).await
        }
    }
}
