//! Telegram bot alert channel.
//!
//! Uses the Bot API `sendMessage` method directly over HTTPS; no SDK.
//! See <https://core.telegram.org/bots/api#sendmessage>

use async_trait::async_trait;

use crate::{AlertChannel, NotifyError};

/// Telegram bot channel configured with a bot token and target chat.
pub struct TelegramChannel {
    client: reqwest::Client,
    bot_token: String,
    chat_id: String,
}

impl TelegramChannel {
    /// Creates a channel from `TELEGRAM_BOT_TOKEN` and
    /// `TELEGRAM_CHAT_ID`; `None` when either is unset.
    #[must_use]
    pub fn from_env(client: reqwest::Client) -> Option<Self> {
        let bot_token = std::env::var("TELEGRAM_BOT_TOKEN").ok()?;
        let chat_id = std::env::var("TELEGRAM_CHAT_ID").ok()?;
        Some(Self {
            client,
            bot_token,
            chat_id,
        })
    }
}

#[async_trait]
impl AlertChannel for TelegramChannel {
    fn id(&self) -> &'static str {
        "telegram"
    }

    async fn send(&self, message: &str) -> Result<(), NotifyError> {
        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.bot_token);

        let resp = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "chat_id": self.chat_id,
                "text": message,
            }))
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(())
        } else {
            Err(NotifyError::Rejected {
                message: format!("Telegram API returned {}", resp.status()),
            })
        }
    }
}
