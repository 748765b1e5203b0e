//! Message bodies for each chat channel.
//!
//! The shapes follow the incoming-webhook formats of Slack (`text` plus
//! Block Kit `blocks`) and Discord (`embeds`).

use std::fmt;

use serde::Serialize;

use crate::time::{local_datetime, rfc3339};

use super::IpChange;

/// Title used by both channels.
pub const TITLE: &str = "🔔 IP Address Changed!";

/// Embed accent color (orange).
pub const DISCORD_EMBED_COLOR: u32 = 16_744_256;

/// A notification destination kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Slack,
    Discord,
}

impl Channel {
    /// Both channels, in delivery order.
    pub const ALL: [Self; 2] = [Self::Slack, Self::Discord];

    /// Builds the message body for this channel.
    #[must_use]
    pub fn payload(self, change: &IpChange<'_>) -> Payload {
        match self {
            Self::Slack => Payload::Slack(SlackMessage::from_change(change)),
            Self::Discord => Payload::Discord(DiscordMessage::from_change(change)),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slack => write!(f, "Slack"),
            Self::Discord => write!(f, "Discord"),
        }
    }
}

/// Channel-specific body, serialized as the bare message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Slack(SlackMessage),
    Discord(DiscordMessage),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlackMessage {
    /// Fallback text for clients that do not render blocks.
    pub text: String,
    pub blocks: Vec<SlackBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlackBlock {
    Header { text: SlackText },
    Section { fields: Vec<SlackText> },
    Context { elements: Vec<SlackText> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlackText {
    PlainText { text: String },
    Mrkdwn { text: String },
}

impl SlackText {
    fn mrkdwn(text: impl Into<String>) -> Self {
        Self::Mrkdwn { text: text.into() }
    }
}

impl SlackMessage {
    /// Header, a section with old/new address, location and ISP, and a
    /// context line with the local detection time.
    #[must_use]
    pub fn from_change(change: &IpChange<'_>) -> Self {
        let current = change.current;
        Self {
            text: TITLE.to_string(),
            blocks: vec![
                SlackBlock::Header {
                    text: SlackText::PlainText {
                        text: TITLE.to_string(),
                    },
                },
                SlackBlock::Section {
                    fields: vec![
                        SlackText::mrkdwn(format!("*Old IP:*\n`{}`", change.previous_ip)),
                        SlackText::mrkdwn(format!("*New IP:*\n`{}`", current.ip)),
                        SlackText::mrkdwn(format!("*Location:*\n{}", current.place())),
                        SlackText::mrkdwn(format!("*ISP:*\n{}", current.network.isp)),
                    ],
                },
                SlackBlock::Context {
                    elements: vec![SlackText::mrkdwn(format!(
                        "🦊 Detected by myip.foo | {}",
                        local_datetime(change.detected_at)
                    ))],
                },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscordMessage {
    pub embeds: Vec<DiscordEmbed>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscordEmbed {
    pub title: String,
    pub color: u32,
    pub fields: Vec<EmbedField>,
    pub footer: EmbedFooter,
    /// RFC 3339, UTC.
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

impl EmbedField {
    fn inline(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
            inline: true,
        }
    }
}

impl DiscordMessage {
    /// One embed with old/new address, type, location, ISP and connection.
    #[must_use]
    pub fn from_change(change: &IpChange<'_>) -> Self {
        let current = change.current;
        Self {
            embeds: vec![DiscordEmbed {
                title: TITLE.to_string(),
                color: DISCORD_EMBED_COLOR,
                fields: vec![
                    EmbedField::inline("Old IP", format!("`{}`", change.previous_ip)),
                    EmbedField::inline("New IP", format!("`{}`", current.ip)),
                    EmbedField::inline("Type", current.kind.as_str()),
                    EmbedField::inline("Location", current.place()),
                    EmbedField::inline("ISP", current.network.isp.as_str()),
                    EmbedField::inline("Connection", current.connection_label()),
                ],
                footer: EmbedFooter {
                    text: "🦊 Powered by myip.foo".to_string(),
                },
                timestamp: rfc3339(change.detected_at),
            }],
        }
    }
}
