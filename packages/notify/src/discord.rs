//! Discord webhook alert channel.
//!
//! Posts the alert as plain message content to a configured webhook.
//! Discord returns `204 No Content` on success.

use async_trait::async_trait;

use crate::{AlertChannel, NotifyError};

/// Discord webhook channel.
pub struct DiscordChannel {
    client: reqwest::Client,
    webhook_url: String,
}

impl DiscordChannel {
    /// Creates a channel from `DISCORD_WEBHOOK_URL`; `None` when unset.
    #[must_use]
    pub fn from_env(client: reqwest::Client) -> Option<Self> {
        let webhook_url = std::env::var("DISCORD_WEBHOOK_URL").ok()?;
        Some(Self {
            client,
            webhook_url,
        })
    }
}

#[async_trait]
impl AlertChannel for DiscordChannel {
    fn id(&self) -> &'static str {
        "discord"
    }

    async fn send(&self, message: &str) -> Result<(), NotifyError> {
        let resp = self
            .client
            .post(&self.webhook_url)
            .json(&serde_json::json!({ "content": message }))
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(())
        } else {
            Err(NotifyError::Rejected {
                message: format!("Discord webhook returned {}", resp.status()),
            })
        }
    }
}
