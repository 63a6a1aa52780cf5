//! Discord gateway event handlers
//!
//! This module routes the events the bot subscribes to. Everything other than
//! message creation, edits, and deletions is ignored.

/// Message tracking and ghost ping detection
pub mod ghost_ping;

use crate::{bot::BotData, errors::Error};
use poise::serenity_prelude as serenity;

/// Poise event hook.
///
/// # Errors
/// Returns an error if a ghost ping notification cannot be sent.
pub async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, BotData, Error>,
    data: &BotData,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Message { new_message } => {
            ghost_ping::on_message(ctx, data, new_message).await?;
        }
        serenity::FullEvent::MessageUpdate { event, .. } => {
            ghost_ping::on_message_update(data, event);
        }
        serenity::FullEvent::MessageDelete {
            deleted_message_id, ..
        } => {
            ghost_ping::on_message_delete(ctx, data, *deleted_message_id).await?;
        }
        _ => {}
    }
    Ok(())
}
