//! Ghost ping detection - decides whether a deleted message was a ghost ping.
//!
//! The types here describe a message as it looked when it was deleted, independent
//! of the Discord library that captured it. `is_ghost_ping` is a pure function over
//! that snapshot.

use std::collections::BTreeSet;

/// User identities explicitly mentioned in a message.
///
/// Ordered so that notifications list mentions deterministically.
pub type MentionSet = BTreeSet<u64>;

/// The author of a deleted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    /// Discord user ID
    pub id: u64,
    /// Display name at the time of deletion
    pub name: String,
    /// Whether the account is a bot
    pub is_bot: bool,
}

impl Author {
    /// Discord mention markup for this user.
    #[must_use]
    pub fn mention(&self) -> String {
        mention(self.id)
    }
}

/// Identifies the message a deleted message was replying to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyReference {
    /// Guild of the replied-to message
    pub guild_id: u64,
    /// Channel of the replied-to message
    pub channel_id: u64,
    /// The replied-to message
    pub message_id: u64,
}

impl ReplyReference {
    /// Builds a reference from the partial data Discord attaches to a reply.
    ///
    /// A missing target message yields `None`. A missing guild falls back to the
    /// deleted message's own guild; with neither there is nothing to resolve against.
    #[must_use]
    pub fn from_parts(
        guild_id: Option<u64>,
        channel_id: u64,
        message_id: Option<u64>,
        fallback_guild_id: Option<u64>,
    ) -> Option<Self> {
        Some(Self {
            guild_id: guild_id.or(fallback_guild_id)?,
            channel_id,
            message_id: message_id?,
        })
    }

    /// Jump link to the referenced message.
    #[must_use]
    pub fn jump_link(&self) -> String {
        format!(
            "https://discord.com/channels/{}/{}/{}",
            self.guild_id, self.channel_id, self.message_id
        )
    }
}

/// The last known state of a message at the moment it was deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedMessageSnapshot {
    /// The deleted message's ID
    pub message_id: u64,
    /// Who wrote it
    pub author: Author,
    /// Text content as delivered by Discord
    pub content: String,
    /// Users mentioned directly in the content
    pub mentions: MentionSet,
    /// Channel the message was posted in
    pub channel_id: u64,
    /// Guild the message was posted in, `None` for DMs
    pub guild_id: Option<u64>,
    /// Present only when the message was a reply
    pub reply_reference: Option<ReplyReference>,
}

impl DeletedMessageSnapshot {
    /// Mentioned users excluding the author.
    #[must_use]
    pub fn others_mentioned(&self) -> MentionSet {
        self.mentions
            .iter()
            .copied()
            .filter(|id| *id != self.author.id)
            .collect()
    }
}

/// Decides whether a deleted message counts as a ghost ping.
///
/// True when a human author mentioned at least one user other than themselves.
/// Role and channel mentions are not considered.
#[must_use]
pub fn is_ghost_ping(snapshot: &DeletedMessageSnapshot) -> bool {
    if snapshot.author.is_bot {
        return false;
    }

    !snapshot.others_mentioned().is_empty()
}

/// Discord mention markup for a user ID.
#[must_use]
pub fn mention(user_id: u64) -> String {
    format!("<@{user_id}>")
}
