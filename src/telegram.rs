//! Telegram delivery channel.
//!
//! A thin wrapper over the Bot API `sendMessage` method. Delivery failures
//! are returned as [`NotifyError`] so the caller can log them; nothing in
//! the crate treats a failed send as fatal.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

const TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Errors that can occur while delivering a chat message.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The Bot API rejected the request (e.g. bad chat id, revoked token).
    #[error("Telegram API returned status {status}: {message}")]
    Api { status: u16, message: String },

    /// Network-layer failure.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Capability to deliver a text message to the configured chat.
pub trait Notify {
    fn send(&self, text: &str) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Client for one bot token and one destination chat.
pub struct TelegramClient {
    token: String,
    chat_id: String,
    client: Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new(token: String, chat_id: String) -> Self {
        Self::with_base_url(token, chat_id, TELEGRAM_API_URL.to_string())
    }

    /// Create a client pointing at a custom base URL (useful for testing).
    pub fn with_base_url(token: String, chat_id: String, base_url: String) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");
        Self {
            token,
            chat_id,
            client,
            base_url,
        }
    }
}

impl Notify for TelegramClient {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.token);
        let response = self
            .client
            .post(&url)
            .json(&SendMessageRequest {
                chat_id: &self.chat_id,
                text,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(NotifyError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}
