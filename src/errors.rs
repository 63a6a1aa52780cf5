//! Unified error types for the ghost ping watcher.

use thiserror::Error;

/// Every failure the bot can report.
///
/// `ChannelResolution` and `MessageFetch` are recovered inside the notification
/// composer by falling back to a plain notification. `Send` is returned to the
/// event handler and ends up in the framework's error hook.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// A required environment variable is missing or invalid.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// The channel a deleted message replied to is unknown or inaccessible.
    #[error("Channel {channel_id} could not be resolved in guild {guild_id}")]
    ChannelResolution {
        /// Guild the lookup was scoped to
        guild_id: u64,
        /// Channel that was looked up
        channel_id: u64,
    },

    /// The message a deleted message replied to could not be fetched.
    #[error("Message {message_id} could not be fetched from channel {channel_id}: {reason}")]
    MessageFetch {
        /// Channel the fetch was issued against
        channel_id: u64,
        /// Message that was requested
        message_id: u64,
        /// Platform-reported cause
        reason: String,
    },

    /// The notification itself could not be delivered.
    #[error("Failed to send notification to channel {channel_id}: {reason}")]
    Send {
        /// Destination channel
        channel_id: u64,
        /// Platform-reported cause
        reason: String,
    },

    /// Serenity/Poise framework error.
    #[error("Serenity/Poise framework error: {0}")]
    #[allow(clippy::enum_variant_names)]
    FrameworkError(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::FrameworkError(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
