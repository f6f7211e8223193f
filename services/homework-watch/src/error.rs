//! Error types for the homework watcher

/// Errors that can occur while watching homework review status
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Status API unavailable: {0}")]
    ApiUnavailable(String),

    #[error("Malformed API response: {0}")]
    MalformedResponse(String),

    #[error("Unknown homework status: {0}")]
    UnknownStatus(String),

    #[error("Missing field in homework record: {0}")]
    MissingField(&'static str),

    #[error("Notification failed: {0}")]
    Notification(String),
}

/// Result type alias for homework watcher operations
pub type Result<T> = std::result::Result<T, WatchError>;
