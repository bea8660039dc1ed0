//! Twilio SMS alert channel.
//!
//! Posts to the Twilio Messages REST endpoint with HTTP basic auth, one
//! request per configured recipient. The channel reports success when at
//! least one recipient received the message; per-recipient failures are
//! logged individually.

use async_trait::async_trait;

use crate::{AlertChannel, NotifyError};

/// Twilio SMS channel with a fixed recipient list.
pub struct TwilioSmsChannel {
    client: reqwest::Client,
    account_sid: String,
    auth_token: String,
    from_number: String,
    recipients: Vec<String>,
}

impl TwilioSmsChannel {
    /// Creates a channel from `TWILIO_ACCOUNT_SID`, `TWILIO_AUTH_TOKEN`,
    /// `TWILIO_PHONE_NUMBER`, and the comma-separated
    /// `SMS_ALERT_NUMBERS` recipient list; `None` when anything is
    /// missing or the recipient list is empty.
    #[must_use]
    pub fn from_env(client: reqwest::Client) -> Option<Self> {
        let account_sid = std::env::var("TWILIO_ACCOUNT_SID").ok()?;
        let auth_token = std::env::var("TWILIO_AUTH_TOKEN").ok()?;
        let from_number = std::env::var("TWILIO_PHONE_NUMBER").ok()?;
        let recipients: Vec<String> = std::env::var("SMS_ALERT_NUMBERS")
            .ok()?
            .split(',')
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();

        if recipients.is_empty() {
            return None;
        }

        Some(Self {
            client,
            account_sid,
            auth_token,
            from_number,
            recipients,
        })
    }

    async fn send_one(&self, to: &str, message: &str) -> Result<(), NotifyError> {
        let url = format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            self.account_sid
        );

        let resp = self
            .client
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[
                ("Body", message),
                ("From", self.from_number.as_str()),
                ("To", to),
            ])
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(())
        } else {
            Err(NotifyError::Rejected {
                message: format!("Twilio API returned {}", resp.status()),
            })
        }
    }
}

#[async_trait]
impl AlertChannel for TwilioSmsChannel {
    fn id(&self) -> &'static str {
        "sms"
    }

    async fn send(&self, message: &str) -> Result<(), NotifyError> {
        let mut sent = 0usize;

        for recipient in &self.recipients {
            match self.send_one(recipient, message).await {
                Ok(()) => sent += 1,
                Err(e) => log::warn!("SMS to {recipient} failed: {e}"),
            }
        }

        if sent > 0 {
            Ok(())
        } else {
            Err(NotifyError::Rejected {
                message: format!("all {} SMS recipients failed", self.recipients.len()),
            })
        }
    }
}
