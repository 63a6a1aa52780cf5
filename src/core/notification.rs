//! Notification composition - builds and sends the ghost ping notice.
//!
//! A deleted reply gets an embed linking to the message it replied to. Everything
//! else, including replies whose target can no longer be resolved or fetched, gets
//! a plain text notice. Discord access goes through [`DiscordGateway`] so this
//! module never touches the framework directly.

use crate::{
    config::NotificationConfig,
    core::ghost_ping::{Author, DeletedMessageSnapshot, MentionSet, ReplyReference, mention},
    errors::{Error, Result},
};
use async_trait::async_trait;
use poise::serenity_prelude::MessageBuilder;
use tracing::{debug, info, warn};

/// Discord's cap on a message's text content
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Discord's cap on an embed field value
pub const MAX_FIELD_CHARS: usize = 1024;

/// Title of the reply-context embed
pub const EMBED_TITLE: &str = "Ghost Ping Detected!";

/// Field naming the author of the replied-to message
pub const REPLY_TO_FIELD: &str = "Reply to";

/// Field holding the jump link to the replied-to message
pub const REPLIED_MESSAGE_FIELD: &str = "Message replied to";

/// A single named embed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    /// Field heading
    pub name: String,
    /// Field body
    pub value: String,
    /// Whether Discord may lay it out beside its neighbours
    pub inline: bool,
}

/// Structured notification content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedPayload {
    /// Embed heading
    pub title: String,
    /// Sidebar colour
    pub colour: u32,
    /// Fields in display order
    pub fields: Vec<EmbedField>,
}

impl EmbedPayload {
    /// Looks up a field by its name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&EmbedField> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// What gets sent back to the channel the ghost ping was deleted from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationPayload {
    /// Plain message content
    Text(String),
    /// Embed with reply context
    Embed(EmbedPayload),
}

/// A payload together with the users it is allowed to ping.
///
/// Everything else in the content (`@everyone`, role mentions, the author) is
/// rendered without notifying anyone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// What gets posted
    pub payload: NotificationPayload,
    /// Users whose mentions are allowed to ping
    pub ping_user_ids: MentionSet,
}

/// A channel that was found in a guild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedChannel {
    /// Channel ID
    pub id: u64,
    /// Guild the channel belongs to
    pub guild_id: u64,
}

/// A message retrieved from Discord.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedMessage {
    /// Message ID
    pub id: u64,
    /// Channel it lives in
    pub channel_id: u64,
    /// Guild it lives in, `None` for DMs
    pub guild_id: Option<u64>,
    /// Who wrote it
    pub author: Author,
}

/// The Discord operations the composer depends on.
#[async_trait]
pub trait DiscordGateway: Send + Sync {
    /// Finds a channel by ID within a guild. `None` if unknown or inaccessible.
    async fn resolve_channel(&self, guild_id: u64, channel_id: u64) -> Option<ResolvedChannel>;

    /// Fetches a message from a resolved channel.
    async fn fetch_message(
        &self,
        channel: &ResolvedChannel,
        message_id: u64,
    ) -> Result<FetchedMessage>;

    /// Sends a notification to a channel.
    async fn send(&self, channel_id: u64, notification: &Notification) -> Result<()>;
}

/// The replied-to message plus the link pointing at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyContext {
    /// The message the ghost ping replied to
    pub replied_to: FetchedMessage,
    /// Jump link built from the reply reference
    pub link: String,
}

/// Resolves the channel of a reply reference, then fetches the referenced message.
///
/// The fetch only starts once the channel has resolved. No retries.
///
/// # Errors
/// - `Error::ChannelResolution` if the channel cannot be found in the guild
/// - `Error::MessageFetch` (or whatever the gateway reports) if the fetch fails
pub async fn resolve_reply_context<G>(
    gateway: &G,
    reference: &ReplyReference,
) -> Result<ReplyContext>
where
    G: DiscordGateway + ?Sized,
{
    let channel = gateway
        .resolve_channel(reference.guild_id, reference.channel_id)
        .await
        .ok_or(Error::ChannelResolution {
            guild_id: reference.guild_id,
            channel_id: reference.channel_id,
        })?;

    let replied_to = gateway.fetch_message(&channel, reference.message_id).await?;
    debug!(
        guild_id = channel.guild_id,
        channel_id = replied_to.channel_id,
        message_id = replied_to.id,
        message_guild_id = ?replied_to.guild_id,
        author_id = replied_to.author.id,
        "Reply context resolved"
    );

    Ok(ReplyContext {
        replied_to,
        link: reference.jump_link(),
    })
}

/// Cuts `text` to at most `max_chars` characters, marking the cut with an ellipsis.
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }

    let mut cut: String = text.chars().take(max_chars - 1).collect();
    cut.push('…');
    cut
}

fn others_mentioned_list(snapshot: &DeletedMessageSnapshot) -> String {
    snapshot
        .others_mentioned()
        .into_iter()
        .map(mention)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Builds the plain text notice naming the author, who they pinged, and what they wrote.
#[must_use]
pub fn plain_notification(
    snapshot: &DeletedMessageSnapshot,
    settings: &NotificationConfig,
) -> NotificationPayload {
    let mut text = format!(
        "👻 **Ghost ping detected!** {} ({}) pinged {} and deleted the message.",
        MessageBuilder::new()
            .push_bold_safe(snapshot.author.name.as_str())
            .build(),
        snapshot.author.mention(),
        others_mentioned_list(snapshot)
    );

    let preview = truncate(snapshot.content.trim(), settings.content_preview_chars);
    if !preview.is_empty() {
        text.push_str("\n>>> ");
        text.push_str(&preview);
    }

    NotificationPayload::Text(truncate(&text, MAX_MESSAGE_CHARS))
}

/// Builds the embed notice carrying the reply context.
#[must_use]
pub fn reply_notification(
    snapshot: &DeletedMessageSnapshot,
    context: &ReplyContext,
    settings: &NotificationConfig,
) -> NotificationPayload {
    let preview = truncate(
        snapshot.content.trim(),
        settings.content_preview_chars.min(MAX_FIELD_CHARS),
    );
    // Discord rejects empty field values
    let message = if preview.is_empty() {
        "*no text content*".to_string()
    } else {
        preview
    };

    let field = |name: &str, value: String, inline: bool| EmbedField {
        name: name.to_string(),
        value,
        inline,
    };

    NotificationPayload::Embed(EmbedPayload {
        title: EMBED_TITLE.to_string(),
        colour: settings.embed_colour,
        fields: vec![
            field("Author", snapshot.author.mention(), true),
            field("Message", message, true),
            field(REPLY_TO_FIELD, context.replied_to.author.mention(), true),
            field(REPLIED_MESSAGE_FIELD, context.link.clone(), false),
        ],
    })
}

/// Composes the notification for an eligible ghost ping and sends it to the
/// channel the message was deleted from.
///
/// Reply context that cannot be resolved or fetched degrades to the plain notice.
/// Only the users the author pinged are pinged again.
/// Callers are expected to have checked [`is_ghost_ping`](crate::core::ghost_ping::is_ghost_ping).
///
/// # Errors
/// Returns the gateway's error if the notification cannot be sent.
pub async fn notify<G>(
    gateway: &G,
    snapshot: &DeletedMessageSnapshot,
    settings: &NotificationConfig,
) -> Result<Notification>
where
    G: DiscordGateway + ?Sized,
{
    let payload = match &snapshot.reply_reference {
        None => plain_notification(snapshot, settings),
        Some(reference) => match resolve_reply_context(gateway, reference).await {
            Ok(context) => reply_notification(snapshot, &context, settings),
            Err(e) => {
                warn!(
                    message_id = snapshot.message_id,
                    error = %e,
                    "Reply context unavailable, sending plain notification"
                );
                plain_notification(snapshot, settings)
            }
        },
    };

    let notification = Notification {
        payload,
        ping_user_ids: snapshot.others_mentioned(),
    };

    gateway.send(snapshot.channel_id, &notification).await?;
    info!(
        message_id = snapshot.message_id,
        channel_id = snapshot.channel_id,
        author_id = snapshot.author.id,
        "Ghost ping notification sent"
    );

    Ok(notification)
}
