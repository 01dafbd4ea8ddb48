//! Telegram delivery client.
//!
//! One outbound `sendMessage` call per recipient. The client reports failures
//! through its `Result`; deciding what a failure means (log and move on) is
//! the dispatcher's job, not this module's.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crescendo_common::error::AppError;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Seam for message delivery, implemented by [`TelegramClient`] in production
/// and by recording fakes in tests.
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), AppError>;
}

#[derive(Serialize)]
struct SendMessageBody<'a> {
    chat_id: &'a str,
    text: &'a str,
}

pub struct TelegramClient {
    client: reqwest::Client,
    api_base: String,
    bot_token: String,
}

impl TelegramClient {
    pub fn new(bot_token: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_base: TELEGRAM_API_BASE.to_string(),
            bot_token: bot_token.into(),
        })
    }

    /// Point the client at a different API host (tests).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

#[async_trait]
impl Messenger for TelegramClient {
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), AppError> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.bot_token);
        let body = SendMessageBody { chat_id, text };

        self.client
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
