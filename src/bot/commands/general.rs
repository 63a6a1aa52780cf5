//! General Discord commands - ping and help.
//! These commands don't touch the message tracker; they exist so server
//! members can check the bot is alive and learn what it does.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };
    use tracing::info;

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        info!("Ping command received from user: {}", ctx.author().name);
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Explains what the bot watches for and what it posts.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let tracked = ctx.data().tracker.len();
        let help_text = format!(
            "**Ghost Ping Watcher**\n\
            When someone mentions another user and then deletes the message, \
            I repost who pinged whom and what the message said in the same channel.\n\n\
            • Bots and self-mentions are ignored.\n\
            • If the deleted message was a reply, the notice links to the message it replied to.\n\
            • Only recent messages can be checked ({tracked} currently remembered).\n\n\
            **Commands**\n\
            • `/ping` - Checks if the bot is responsive.\n\
            • `/help` - Shows this help message."
        );

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
