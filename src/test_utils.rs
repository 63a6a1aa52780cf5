//! Shared test utilities for the ghost ping watcher.
//!
//! Provides snapshot builders with sensible defaults and a recording
//! [`MockGateway`] standing in for Discord.

#![allow(clippy::unwrap_used)]

use crate::{
    core::{
        ghost_ping::{Author, DeletedMessageSnapshot, MentionSet, ReplyReference},
        notification::{
            DiscordGateway, FetchedMessage, Notification, NotificationPayload, ResolvedChannel,
        },
    },
    errors::{Error, Result},
};
use async_trait::async_trait;
use std::sync::Mutex;

/// Author of every default snapshot
pub const AUTHOR_ID: u64 = 100_000_000_000_000_001;
/// User pinged by default snapshots
pub const MENTIONED_ID: u64 = 328_194_044_587_147_278;
/// Channel the ghost ping was posted in
pub const CHANNEL_ID: u64 = 200_000_000_000_000_002;
/// Guild the ghost ping was posted in
pub const GUILD_ID: u64 = 300_000_000_000_000_003;
/// ID of the deleted message
pub const DELETED_MESSAGE_ID: u64 = 400_000_000_000_000_004;
/// Guild of the replied-to message
pub const REPLY_GUILD_ID: u64 = 328_194_044_587_147_279;
/// Channel of the replied-to message
pub const REPLY_CHANNEL_ID: u64 = 328_194_044_587_147_278;
/// The replied-to message
pub const REPLY_MESSAGE_ID: u64 = 328_194_044_587_147_280;
/// Author of the replied-to message
pub const REPLIED_AUTHOR_ID: u64 = 500_000_000_000_000_005;

/// A human author named "Tester".
#[must_use]
pub fn human_author() -> Author {
    Author {
        id: AUTHOR_ID,
        name: "Tester".to_string(),
        is_bot: false,
    }
}

/// A bot author.
#[must_use]
pub fn bot_author() -> Author {
    Author {
        id: 600_000_000_000_000_006,
        name: "SomeBot".to_string(),
        is_bot: true,
    }
}

/// Creates a snapshot of a deleted guild message with the given content and mentions.
///
/// # Defaults
/// * author: [`human_author`]
/// * channel/guild: [`CHANNEL_ID`] / [`GUILD_ID`]
/// * no reply reference
#[must_use]
pub fn snapshot_mentioning(content: &str, mentions: &[u64]) -> DeletedMessageSnapshot {
    DeletedMessageSnapshot {
        message_id: DELETED_MESSAGE_ID,
        author: human_author(),
        content: content.to_string(),
        mentions: mentions.iter().copied().collect::<MentionSet>(),
        channel_id: CHANNEL_ID,
        guild_id: Some(GUILD_ID),
        reply_reference: None,
    }
}

/// Creates a snapshot of a deleted reply that pinged [`MENTIONED_ID`].
#[must_use]
pub fn reply_snapshot() -> DeletedMessageSnapshot {
    let mut snapshot = snapshot_mentioning("this is a reply", &[MENTIONED_ID]);
    snapshot.guild_id = Some(REPLY_GUILD_ID);
    snapshot.reply_reference = Some(ReplyReference {
        guild_id: REPLY_GUILD_ID,
        channel_id: REPLY_CHANNEL_ID,
        message_id: REPLY_MESSAGE_ID,
    });
    snapshot
}

/// The message [`reply_snapshot`] replied to.
#[must_use]
pub fn replied_message() -> FetchedMessage {
    FetchedMessage {
        id: REPLY_MESSAGE_ID,
        channel_id: REPLY_CHANNEL_ID,
        guild_id: Some(REPLY_GUILD_ID),
        author: Author {
            id: REPLIED_AUTHOR_ID,
            name: "Replied".to_string(),
            is_bot: false,
        },
    }
}

/// In-memory gateway recording every call.
///
/// By default no channel resolves and every send succeeds.
#[derive(Debug, Default)]
pub struct MockGateway {
    resolvable: bool,
    reply_target: Option<FetchedMessage>,
    fail_send: bool,
    resolve_calls: Mutex<usize>,
    fetch_calls: Mutex<usize>,
    sent: Mutex<Vec<(u64, Notification)>>,
}

impl MockGateway {
    /// Channels resolve, but fetches fail unless a target is also set.
    #[must_use]
    pub fn with_resolvable_channel(mut self) -> Self {
        self.resolvable = true;
        self
    }

    /// Channels resolve and fetches return `message`.
    #[must_use]
    pub fn with_reply_target(mut self, message: FetchedMessage) -> Self {
        self.resolvable = true;
        self.reply_target = Some(message);
        self
    }

    /// Every send fails.
    #[must_use]
    pub fn with_failing_send(mut self) -> Self {
        self.fail_send = true;
        self
    }

    /// Payloads sent so far, with their destination channel.
    pub fn sent(&self) -> Vec<(u64, NotificationPayload)> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(channel_id, notification)| (*channel_id, notification.payload.clone()))
            .collect()
    }

    /// Full notifications sent so far, including who they may ping.
    pub fn sent_notifications(&self) -> Vec<(u64, Notification)> {
        self.sent.lock().unwrap().clone()
    }

    /// Number of channel resolutions attempted.
    pub fn resolve_calls(&self) -> usize {
        *self.resolve_calls.lock().unwrap()
    }

    /// Number of message fetches attempted.
    pub fn fetch_calls(&self) -> usize {
        *self.fetch_calls.lock().unwrap()
    }
}

#[async_trait]
impl DiscordGateway for MockGateway {
    async fn resolve_channel(&self, guild_id: u64, channel_id: u64) -> Option<ResolvedChannel> {
        *self.resolve_calls.lock().unwrap() += 1;
        self.resolvable.then_some(ResolvedChannel {
            id: channel_id,
            guild_id,
        })
    }

    async fn fetch_message(
        &self,
        channel: &ResolvedChannel,
        message_id: u64,
    ) -> Result<FetchedMessage> {
        *self.fetch_calls.lock().unwrap() += 1;
        self.reply_target
            .clone()
            .ok_or_else(|| Error::MessageFetch {
                channel_id: channel.id,
                message_id,
                reason: "Unknown Message".to_string(),
            })
    }

    async fn send(&self, channel_id: u64, notification: &Notification) -> Result<()> {
        if self.fail_send {
            return Err(Error::Send {
                channel_id,
                reason: "Missing Permissions".to_string(),
            });
        }
        self.sent
            .lock()
            .unwrap()
            .push((channel_id, notification.clone()));
        Ok(())
    }
}
