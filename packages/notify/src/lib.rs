#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Alert notification fan-out for new case reports.
//!
//! Each delivery channel (Telegram bot, Discord webhook, Twilio SMS) is an
//! [`AlertChannel`] trait object constructed from environment
//! configuration; unconfigured channels simply don't exist at runtime.
//! [`broadcast`] is fire-and-forget from the caller's perspective: a
//! failing channel is logged and skipped, never fatal — a notification
//! outage must not block case intake.

pub mod discord;
pub mod sms;
pub mod telegram;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while sending an alert.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The channel's API rejected the request.
    #[error("Channel rejected request: {message}")]
    Rejected {
        /// Description of the rejection.
        message: String,
    },
}

/// A single alert delivery channel.
#[async_trait]
pub trait AlertChannel: Send + Sync {
    /// Stable identifier used in logs (`"telegram"`, `"discord"`, `"sms"`).
    fn id(&self) -> &'static str;

    /// Delivers one alert message.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] if delivery fails; the broadcast layer
    /// logs and continues.
    async fn send(&self, message: &str) -> Result<(), NotifyError>;
}

/// Builds every channel that has complete environment configuration.
#[must_use]
pub fn channels_from_env(client: &reqwest::Client) -> Vec<Box<dyn AlertChannel>> {
    let mut channels: Vec<Box<dyn AlertChannel>> = Vec::new();

    if let Some(channel) = telegram::TelegramChannel::from_env(client.clone()) {
        channels.push(Box::new(channel));
    } else {
        log::debug!("Telegram not configured (missing token or chat id)");
    }

    if let Some(channel) = discord::DiscordChannel::from_env(client.clone()) {
        channels.push(Box::new(channel));
    } else {
        log::debug!("Discord not configured (missing webhook URL)");
    }

    if let Some(channel) = sms::TwilioSmsChannel::from_env(client.clone()) {
        channels.push(Box::new(channel));
    } else {
        log::debug!("Twilio SMS not configured (missing credentials or recipients)");
    }

    channels
}

/// Sends one alert through every channel, returning the number of
/// channels that delivered.
///
/// Failures are logged per channel and never propagate.
pub async fn broadcast(channels: &[Box<dyn AlertChannel>], message: &str) -> usize {
    let mut delivered = 0;

    for channel in channels {
        match channel.send(message).await {
            Ok(()) => {
                log::info!("Alert sent via {}", channel.id());
                delivered += 1;
            }
            Err(e) => {
                log::warn!("Alert via {} failed: {e}", channel.id());
            }
        }
    }

    log::info!(
        "Alert broadcast: {delivered}/{} channels successful",
        channels.len()
    );

    delivered
}

/// Formats the standard alert message for a newly reported case.
#[must_use]
pub fn format_case_alert(name: &str, age: i32, location_text: &str, report_id: &str) -> String {
    format!(
        "MISSING CHILD ALERT\n\
         Name: {name}\n\
         Age: {age}\n\
         Last seen: {location_text}\n\
         Report ID: {report_id}\n\
         If you have any information, please submit a sighting."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_alert_contains_key_fields() {
        let message = format_case_alert("Asha Sharma", 7, "Shivaji Park", "abc-123");
        assert!(message.contains("Asha Sharma"));
        assert!(message.contains("Age: 7"));
        assert!(message.contains("Shivaji Park"));
        assert!(message.contains("abc-123"));
    }
}
