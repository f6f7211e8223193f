//! Homework Watch - homework review status notifier
//!
//! Polls the homework status API, detects review status changes, and sends
//! Telegram notifications.

pub mod config;
pub mod engine;
pub mod error;
pub mod fetcher;
pub mod io;
pub mod notifier;
pub mod state;
pub mod status;
pub mod telegram;
pub mod validator;

pub use config::{load_config, Config};
pub use error::{Result, WatchError};

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::engine::{CycleOutcome, Engine};
use crate::fetcher::PracticumClient;
use crate::io::ReqwestHttpClient;
use crate::state::PollState;
use crate::telegram::TelegramNotifier;

/// Build an engine wired to the real status API and Telegram
pub fn build_engine(config: &Config, cancel: CancellationToken) -> Result<Engine> {
    config.validate()?;

    let timeout = Duration::from_secs(config.polling.request_timeout_seconds);
    let http: Arc<dyn io::HttpClient> = Arc::new(ReqwestHttpClient::with_timeout(timeout)?);

    let source = Arc::new(PracticumClient::new(&config.practicum, Arc::clone(&http)));
    let notifier = Arc::new(TelegramNotifier::new(&config.telegram, Arc::clone(&http)));

    Ok(Engine::new(
        source,
        notifier,
        PollState::starting_now(),
        Duration::from_secs(config.polling.interval_seconds),
        cancel,
    ))
}

/// Run the watcher with the given configuration
pub async fn run(config: Config) -> Result<()> {
    let cancel = CancellationToken::new();
    let mut engine = build_engine(&config, cancel.clone())?;

    // Setup shutdown handler
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
            return;
        }
        tracing::info!("Shutdown signal received");
        cancel_for_signal.cancel();
    });

    tracing::info!(
        "Homework watch started, polling every {}s",
        config.polling.interval_seconds
    );

    // Run the engine (blocks until cancelled)
    engine.run().await;

    tracing::info!("Homework watch stopped");
    Ok(())
}

/// Run a single polling cycle and report how it ended
pub async fn run_once(config: Config) -> Result<CycleOutcome> {
    let mut engine = build_engine(&config, CancellationToken::new())?;
    Ok(engine.run_cycle().await)
}
