//! Payload for events created from a chat message.

use serde::{Deserialize, Serialize};

use super::PayloadVariant;

/// Where an event came from in a chat server, and how to announce it.
///
/// Ids are the platform's 64-bit snowflakes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatPayload {
    pub guild_id: i64,
    pub channel_id: i64,
    /// The message that created the event
    pub origin_message_id: i64,
    pub author_id: i64,
    pub provided_link: Option<String>,
    /// Announce with a mention of everyone in the channel
    pub mention_everyone: bool,
}

impl ChatPayload {
    pub fn new(guild_id: i64, channel_id: i64, origin_message_id: i64, author_id: i64) -> Self {
        ChatPayload {
            guild_id,
            channel_id,
            origin_message_id,
            author_id,
            ..Default::default()
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.provided_link = Some(link.into());
        self
    }

    pub fn with_mention_everyone(mut self, mention_everyone: bool) -> Self {
        self.mention_everyone = mention_everyone;
        self
    }
}

// Tag kept from the first (Discord-only) version of the format.
impl PayloadVariant for ChatPayload {
    const TAG: &'static str = "DiscordEventData";
}
