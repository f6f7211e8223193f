//! Configuration types for the homework watcher

use serde::{Deserialize, Serialize};
use std::path::Path;

pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub practicum: PracticumConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub polling: PollingConfig,
}

/// Homework status API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticumConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub token: String,
}

impl Default for PracticumConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            token: String::new(),
        }
    }
}

/// Telegram bot settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default)]
    pub bot_token: String,
    #[serde(default)]
    pub chat_id: String,
    #[serde(default = "default_telegram_api_url")]
    pub api_url: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: String::new(),
            api_url: default_telegram_api_url(),
        }
    }
}

/// Polling cadence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_interval_seconds")]
    pub interval_seconds: u64,
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_seconds: default_interval_seconds(),
            request_timeout_seconds: default_request_timeout_seconds(),
        }
    }
}

fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_interval_seconds() -> u64 {
    600
}

fn default_request_timeout_seconds() -> u64 {
    30
}

impl Config {
    /// Fill empty credentials from the environment (and a `.env` file if present)
    pub fn resolve_secrets(&mut self) -> crate::Result<()> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("Loaded environment from {:?}", path),
            Err(e) if e.not_found() => {}
            Err(e) => {
                return Err(crate::WatchError::Config(format!(
                    "Failed to read .env file: {}",
                    e
                )))
            }
        }
        self.resolve_secrets_with(|name| std::env::var(name).ok());
        Ok(())
    }

    /// Fill empty credentials using the given variable lookup
    pub fn resolve_secrets_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let slots = [
            (&mut self.practicum.token, PRACTICUM_TOKEN_VAR),
            (&mut self.telegram.bot_token, TELEGRAM_TOKEN_VAR),
            (&mut self.telegram.chat_id, TELEGRAM_CHAT_ID_VAR),
        ];
        for (slot, var) in slots {
            if slot.is_empty() {
                if let Some(value) = lookup(var) {
                    tracing::debug!("Using {} from environment", var);
                    *slot = value;
                }
            }
        }
    }

    /// Check that every credential needed to start polling is present
    pub fn validate(&self) -> crate::Result<()> {
        let missing: Vec<&str> = [
            (&self.practicum.token, PRACTICUM_TOKEN_VAR),
            (&self.telegram.bot_token, TELEGRAM_TOKEN_VAR),
            (&self.telegram.chat_id, TELEGRAM_CHAT_ID_VAR),
        ]
        .into_iter()
        .filter(|(value, _)| value.trim().is_empty())
        .map(|(_, var)| var)
        .collect();

        for var in &missing {
            tracing::error!("Required variable {} is not set", var);
        }

        if !missing.is_empty() {
            return Err(crate::WatchError::Config(format!(
                "missing required credentials: {}",
                missing.join(", ")
            )));
        }

        if self.polling.interval_seconds == 0 {
            return Err(crate::WatchError::Config(
                "polling.interval_seconds must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::WatchError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}
