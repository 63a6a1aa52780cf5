//! Serenity-backed [`DiscordGateway`].
//!
//! Channel resolution uses the guild cache only; message fetches and sends go
//! over HTTP.

use crate::{
    core::{
        ghost_ping::Author,
        notification::{
            DiscordGateway, FetchedMessage, Notification, NotificationPayload, ResolvedChannel,
        },
    },
    errors::{Error, Result},
};
use async_trait::async_trait;
use poise::serenity_prelude as serenity;

/// Converts a Discord user into a snapshot author.
#[must_use]
pub fn author_from_user(user: &serenity::User) -> Author {
    Author {
        id: user.id.get(),
        name: user.global_name.clone().unwrap_or_else(|| user.name.clone()),
        is_bot: user.bot,
    }
}

/// Builds the outgoing message for a notification.
///
/// Mention parsing is limited to the notification's ping list, so quoted
/// `@everyone`, role, or author mentions render without notifying anyone.
#[must_use]
pub fn build_message(notification: &Notification) -> serenity::CreateMessage {
    let allowed_mentions = serenity::CreateAllowedMentions::new().users(
        notification
            .ping_user_ids
            .iter()
            .copied()
            .map(serenity::UserId::new),
    );
    let message = serenity::CreateMessage::new().allowed_mentions(allowed_mentions);

    match &notification.payload {
        NotificationPayload::Text(text) => message.content(text),
        NotificationPayload::Embed(embed) => {
            let fields = embed
                .fields
                .iter()
                .map(|field| (field.name.clone(), field.value.clone(), field.inline));
            message.embed(
                serenity::CreateEmbed::new()
                    .title(&embed.title)
                    .colour(embed.colour)
                    .fields(fields),
            )
        }
    }
}

/// Gateway bound to the serenity context of the event being handled.
pub struct SerenityGateway<'a> {
    ctx: &'a serenity::Context,
}

impl<'a> SerenityGateway<'a> {
    /// Wraps a serenity context.
    #[must_use]
    pub const fn new(ctx: &'a serenity::Context) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl DiscordGateway for SerenityGateway<'_> {
    async fn resolve_channel(&self, guild_id: u64, channel_id: u64) -> Option<ResolvedChannel> {
        let guild = self.ctx.cache.guild(serenity::GuildId::new(guild_id))?;
        let channel_id = serenity::ChannelId::new(channel_id);

        let known = guild.channels.contains_key(&channel_id)
            || guild.threads.iter().any(|thread| thread.id == channel_id);

        known.then_some(ResolvedChannel {
            id: channel_id.get(),
            guild_id,
        })
    }

    async fn fetch_message(
        &self,
        channel: &ResolvedChannel,
        message_id: u64,
    ) -> Result<FetchedMessage> {
        let message = serenity::ChannelId::new(channel.id)
            .message(self.ctx, serenity::MessageId::new(message_id))
            .await
            .map_err(|e| Error::MessageFetch {
                channel_id: channel.id,
                message_id,
                reason: e.to_string(),
            })?;

        Ok(FetchedMessage {
            id: message.id.get(),
            channel_id: message.channel_id.get(),
            guild_id: message.guild_id.map(serenity::GuildId::get),
            author: author_from_user(&message.author),
        })
    }

    async fn send(&self, channel_id: u64, notification: &Notification) -> Result<()> {
        serenity::ChannelId::new(channel_id)
            .send_message(self.ctx, build_message(notification))
            .await
            .map(|_| ())
            .map_err(|e| Error::Send {
                channel_id,
                reason: e.to_string(),
            })
    }
}
