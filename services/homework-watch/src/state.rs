//! Polling state carried from one cycle to the next

use std::time::{SystemTime, UNIX_EPOCH};

/// Consecutive failed cycles after which a warning is logged
pub const FAILURE_WARN_THRESHOLD: u32 = 5;

/// In-memory state of the watcher; lost on restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollState {
    /// Lower bound (seconds since epoch) of the next fetch window
    pub cursor: i64,
    /// Last status message that was sent
    pub last_status: Option<String>,
    /// Last error message that was sent
    pub last_error: Option<String>,
    pub consecutive_failures: u32,
}

impl PollState {
    pub fn new(cursor: i64) -> Self {
        Self {
            cursor,
            last_status: None,
            last_error: None,
            consecutive_failures: 0,
        }
    }

    /// State whose cursor starts at the current time
    pub fn starting_now() -> Self {
        Self::new(current_epoch_secs())
    }

    /// Move the cursor to the server-reported date, if any
    pub fn advance_cursor(&mut self, current_date: Option<i64>) {
        if let Some(date) = current_date {
            self.cursor = date;
        }
    }

    pub fn status_changed(&self, message: &str) -> bool {
        self.last_status.as_deref() != Some(message)
    }

    pub fn record_status(&mut self, message: String) {
        self.last_status = Some(message);
    }

    pub fn error_is_new(&self, message: &str) -> bool {
        self.last_error.as_deref() != Some(message)
    }

    pub fn record_error(&mut self, message: String) {
        self.last_error = Some(message);
    }

    /// Forget the last error once the status API answers again
    pub fn clear_error(&mut self) {
        self.last_error = None;
        self.consecutive_failures = 0;
    }

    /// Count a failed cycle, returning the new streak length
    pub fn record_failure(&mut self) -> u32 {
        self.consecutive_failures += 1;
        self.consecutive_failures
    }
}

pub fn current_epoch_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
