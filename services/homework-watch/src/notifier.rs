//! Notifier trait for sending messages to the user

use async_trait::async_trait;

/// A notification to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
}

impl Notification {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Trait for sending notifications
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Get the notifier type name (e.g. "telegram")
    fn type_name(&self) -> &str;

    /// Send a notification
    async fn notify(&self, notification: &Notification) -> crate::Result<()>;
}

/// Send a notification once, logging and absorbing any delivery failure.
///
/// Returns whether the message was delivered.
pub async fn deliver(notifier: &dyn Notifier, notification: &Notification) -> bool {
    match notifier.notify(notification).await {
        Ok(()) => {
            tracing::info!(
                "Sent notification via '{}': {}",
                notifier.type_name(),
                notification.text
            );
            true
        }
        Err(e) => {
            tracing::error!(
                "Notification via '{}' failed: {}",
                notifier.type_name(),
                e
            );
            false
        }
    }
}
