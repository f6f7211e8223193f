//! Engine: the fetch, validate, interpret, notify cycle

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::fetcher::StatusSource;
use crate::notifier::{deliver, Notification, Notifier};
use crate::state::{PollState, FAILURE_WARN_THRESHOLD};
use crate::{status, validator, WatchError};

/// What a single cycle ended with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new status message was produced and handed to the notifier
    Notified(String),
    /// The newest submission still has the last reported status
    Unchanged,
    /// The API reported no submissions in the window
    NoSubmissions,
    /// The cycle failed; carries the error message shown to the user
    Failed(String),
}

/// The engine polls the status API and dispatches notifications
#[derive(Debug)]
pub struct Engine {
    source: Arc<dyn StatusSource>,
    notifier: Arc<dyn Notifier>,
    state: PollState,
    interval: Duration,
    cancel: CancellationToken,
}

impl Engine {
    pub fn new(
        source: Arc<dyn StatusSource>,
        notifier: Arc<dyn Notifier>,
        state: PollState,
        interval: Duration,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            source,
            notifier,
            state,
            interval,
            cancel,
        }
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// Run cycles until the cancellation token is triggered
    pub async fn run(&mut self) {
        loop {
            let outcome = self.run_cycle().await;
            tracing::debug!(
                "Cycle finished: {:?}, next cursor {}",
                outcome,
                self.state.cursor
            );

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = self.cancel.cancelled() => {
                    tracing::debug!("Polling loop cancelled");
                    break;
                }
            }
        }
    }

    /// Run one fetch, validate, interpret, notify pass
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        tracing::debug!("Fetching homework statuses from {}", self.state.cursor);

        let raw = match self.source.fetch(self.state.cursor).await {
            Ok(raw) => raw,
            Err(e) => return self.report_failure(e).await,
        };

        let interpreted =
            validator::validate(&raw).and_then(|records| status::interpret(&records));

        // Advanced even when the body is bad, so stale data is not re-fetched forever.
        self.state.advance_cursor(validator::current_date(&raw));

        let message = match interpreted {
            Ok(message) => message,
            Err(e) => return self.report_failure(e).await,
        };

        // Only a cycle that got all the way through ends the failure streak.
        self.state.clear_error();

        match message {
            None => {
                tracing::debug!("No homework status updates");
                CycleOutcome::NoSubmissions
            }
            Some(message) if self.state.status_changed(&message) => {
                deliver(self.notifier.as_ref(), &Notification::new(message.clone())).await;
                self.state.record_status(message.clone());
                CycleOutcome::Notified(message)
            }
            Some(message) => {
                tracing::debug!("Status unchanged: {}", message);
                CycleOutcome::Unchanged
            }
        }
    }

    async fn report_failure(&mut self, error: WatchError) -> CycleOutcome {
        let message = error_message(&error);

        let failures = self.state.record_failure();
        if failures == FAILURE_WARN_THRESHOLD {
            tracing::warn!("{} consecutive polling cycles have failed", failures);
        }

        if self.state.error_is_new(&message) {
            tracing::error!("{}", message);
            deliver(self.notifier.as_ref(), &Notification::new(message.clone())).await;
            self.state.record_error(message.clone());
        } else {
            tracing::debug!("Suppressing repeated error: {}", message);
        }

        CycleOutcome::Failed(message)
    }
}

/// The text sent to the user for a failed cycle
pub fn error_message(error: &WatchError) -> String {
    format!("Program failure: {}", error)
}
