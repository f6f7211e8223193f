//! Telegram Bot API notification client

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::TelegramConfig;
use crate::io::HttpClient;
use crate::notifier::{Notification, Notifier};

/// Envelope of every Bot API response
#[derive(Debug, Deserialize)]
struct TelegramApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram notification sender
pub struct TelegramNotifier {
    send_url: String,
    chat_id: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig, http: Arc<dyn HttpClient>) -> Self {
        let send_url = format!(
            "{}/bot{}/sendMessage",
            config.api_url.trim_end_matches('/'),
            config.bot_token
        );

        tracing::debug!("Created TelegramNotifier for chat '{}'", config.chat_id);

        Self {
            send_url,
            chat_id: config.chat_id.clone(),
            http,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn type_name(&self) -> &str {
        "telegram"
    }

    async fn notify(&self, notification: &Notification) -> crate::Result<()> {
        let body = serde_json::json!({
            "chat_id": self.chat_id,
            "text": notification.text,
        });

        tracing::debug!("Sending Telegram message to chat '{}'", self.chat_id);

        let response = self
            .http
            .post_json(&self.send_url, &body)
            .await
            .map_err(|e| crate::WatchError::Notification(e.to_string()))?;

        let parsed = serde_json::from_str::<TelegramApiResponse>(&response.body).ok();

        if response.status != 200 || !parsed.as_ref().is_some_and(|r| r.ok) {
            let description = parsed
                .and_then(|r| r.description)
                .unwrap_or(response.body);
            return Err(crate::WatchError::Notification(format!(
                "Telegram API returned status {}: {}",
                response.status, description
            )));
        }

        tracing::debug!("Telegram message sent successfully");
        Ok(())
    }
}
