//! Change notifications delivered to chat webhooks.
//!
//! This module provides:
//! - The notification event ([`IpChange`])
//! - Per-channel message bodies ([`Channel`], [`Payload`])
//! - The sender abstraction ([`Notifier`]) and its webhook implementation
//!   ([`WebhookNotifier`])
//! - Fan-out with per-channel fault isolation ([`notify_all`], [`Delivery`])
//!
//! Delivery is a single attempt per channel. There are no retries.

mod error;
mod payload;
mod webhook;

#[cfg(test)]
pub mod mock;


pub use error::NotifyError;
pub use payload::{
    Channel, DISCORD_EMBED_COLOR, DiscordEmbed, DiscordMessage, EmbedField, Payload, SlackBlock,
    SlackMessage, SlackText,
};
pub use webhook::{Delivery, IpChange, Notifier, WebhookNotifier, notify_all};
