//! Homework Watch CLI
//!
//! Command-line interface for the homework review status notifier.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use homework_watch::{load_config, Config};
use tracing::Level;

#[derive(Parser)]
#[command(name = "homework-watch")]
#[command(about = "Homework review status notifier")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seconds between polls (overrides config file)
    #[arg(long)]
    poll_interval: Option<u64>,

    /// Run a single polling cycle and exit
    #[arg(long)]
    once: bool,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, poll_interval={:?}, once={}, log_level={:?}",
        args.config,
        args.poll_interval,
        args.once,
        args.log_level
    );

    match start(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Program stopped: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn start(args: Args) -> homework_watch::Result<()> {
    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    config.resolve_secrets()?;

    if let Some(poll_interval) = args.poll_interval {
        config.polling.interval_seconds = poll_interval;
    }

    if args.once {
        let outcome = homework_watch::run_once(config).await?;
        tracing::info!("Cycle finished: {:?}", outcome);
        return Ok(());
    }

    tracing::info!("Starting homework watch");
    homework_watch::run(config).await
}
