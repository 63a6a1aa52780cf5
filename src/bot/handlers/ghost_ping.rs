//! Ghost ping event handling.
//!
//! New messages are snapshotted into the tracker, edits refresh the snapshot, and
//! deletions pull the snapshot back out and run it through the ghost ping check.
//! A create that arrives after its own delete is checked on arrival.

use crate::{
    bot::{
        BotData,
        gateway::{SerenityGateway, author_from_user},
    },
    config::NotificationConfig,
    core::{
        ghost_ping::{DeletedMessageSnapshot, MentionSet, ReplyReference, is_ghost_ping},
        notification::{DiscordGateway, Notification, notify},
    },
    errors::Result,
};
use poise::serenity_prelude as serenity;
use tracing::debug;

/// Captures the state of a message as Discord delivered it.
#[must_use]
pub fn snapshot_from_message(message: &serenity::Message) -> DeletedMessageSnapshot {
    let guild_id = message.guild_id.map(serenity::GuildId::get);
    let reply_reference = message.message_reference.as_ref().and_then(|reference| {
        ReplyReference::from_parts(
            reference.guild_id.map(serenity::GuildId::get),
            reference.channel_id.get(),
            reference.message_id.map(serenity::MessageId::get),
            guild_id,
        )
    });

    DeletedMessageSnapshot {
        message_id: message.id.get(),
        author: author_from_user(&message.author),
        content: message.content.clone(),
        mentions: mention_set(&message.mentions),
        channel_id: message.channel_id.get(),
        guild_id,
        reply_reference,
    }
}

fn mention_set(users: &[serenity::User]) -> MentionSet {
    users.iter().map(|user| user.id.get()).collect()
}

/// Checks a deleted message and, if it was a ghost ping, sends the notification.
///
/// Returns the notification that was sent, or `None` when the message was not a ghost ping.
///
/// # Errors
/// Returns the gateway's error if the notification cannot be sent.
pub async fn process_deleted_message<G>(
    gateway: &G,
    snapshot: &DeletedMessageSnapshot,
    settings: &NotificationConfig,
) -> Result<Option<Notification>>
where
    G: DiscordGateway + ?Sized,
{
    if !is_ghost_ping(snapshot) {
        debug!(message_id = snapshot.message_id, "Deleted message is not a ghost ping");
        return Ok(None);
    }

    notify(gateway, snapshot, settings).await.map(Some)
}

/// Records a new message, or checks it right away if its delete already arrived.
///
/// # Errors
/// Returns the gateway's error if a notification cannot be sent.
pub async fn handle_new_message<G>(
    gateway: &G,
    data: &BotData,
    message: &serenity::Message,
) -> Result<Option<Notification>>
where
    G: DiscordGateway + ?Sized,
{
    let Some(snapshot) = data.tracker.record(snapshot_from_message(message)) else {
        return Ok(None);
    };

    debug!(
        message_id = snapshot.message_id,
        "Message was deleted before it was recorded"
    );
    process_deleted_message(gateway, &snapshot, &data.config.notification).await
}

/// Refreshes a tracked message with the fields an edit delivered.
pub fn on_message_update(data: &BotData, event: &serenity::MessageUpdateEvent) {
    let updated = data.tracker.apply_edit(
        event.id.get(),
        event.content.clone(),
        event.mentions.as_deref().map(mention_set),
    );
    if !updated {
        debug!(message_id = event.id.get(), "Edit for untracked message ignored");
    }
}

/// Takes the snapshot of a deleted message and checks it.
///
/// # Errors
/// Returns the gateway's error if a notification cannot be sent.
pub async fn handle_deletion<G>(
    gateway: &G,
    data: &BotData,
    message_id: u64,
) -> Result<Option<Notification>>
where
    G: DiscordGateway + ?Sized,
{
    let Some(snapshot) = data.tracker.take(message_id) else {
        debug!(message_id, "Deleted message was not tracked, skipping");
        return Ok(None);
    };

    process_deleted_message(gateway, &snapshot, &data.config.notification).await
}

/// Handles a newly posted message.
///
/// # Errors
/// Returns an error if a ghost ping notification cannot be sent.
pub async fn on_message(
    ctx: &serenity::Context,
    data: &BotData,
    message: &serenity::Message,
) -> Result<()> {
    handle_new_message(&SerenityGateway::new(ctx), data, message).await?;
    Ok(())
}

/// Handles a single message deletion.
///
/// # Errors
/// Returns an error if a ghost ping notification cannot be sent.
pub async fn on_message_delete(
    ctx: &serenity::Context,
    data: &BotData,
    deleted_message_id: serenity::MessageId,
) -> Result<()> {
    handle_deletion(&SerenityGateway::new(ctx), data, deleted_message_id.get()).await?;
    Ok(())
}
