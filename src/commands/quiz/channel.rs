//! Presentation seam between the round engine and Discord.
//!
//! The engine drives a single display message through this trait, which
//! keeps it runnable against a recording fake in the integration tests.

use super::session::Choice;
use super::QuizError;
use async_trait::async_trait;
use serenity::builder::{CreateEmbed, CreateMessage, EditMessage};
use serenity::model::channel::ReactionType;
use serenity::model::id::{ChannelId, GuildId, MessageId, UserId};
use serenity::prelude::Context;

/// Where a session posts its rounds and collects reactions. `post` returns
/// the display handle all later calls refer to.
#[async_trait]
pub trait QuizChannel: Send + Sync {
    async fn post(
        &self,
        content: Option<String>,
        embed: CreateEmbed,
    ) -> Result<MessageId, QuizError>;

    /// Edits the display message. `None` leaves the corresponding part of
    /// the message as it is.
    async fn update(
        &self,
        handle: MessageId,
        content: Option<String>,
        embed: Option<CreateEmbed>,
    ) -> Result<(), QuizError>;

    /// Primes the display with the reaction symbols participants answer with.
    async fn add_allowed_choices(
        &self,
        handle: MessageId,
        choices: &[Choice],
    ) -> Result<(), QuizError>;

    /// Removes all collected reactions between rounds.
    async fn clear_responses(&self, handle: MessageId) -> Result<(), QuizError>;

    /// Avatar URL for highlighting the winner; best effort.
    async fn portrait_url(&self, user: UserId) -> Option<String>;

    /// Link that jumps straight to the display message.
    fn jump_link(&self, handle: MessageId) -> String;
}

/// Production channel bound to the guild text channel the command came from.
pub struct DiscordChannel {
    ctx: Context,
    guild_id: GuildId,
    channel_id: ChannelId,
}

impl DiscordChannel {
    pub fn new(ctx: Context, guild_id: GuildId, channel_id: ChannelId) -> Self {
        Self {
            ctx,
            guild_id,
            channel_id,
        }
    }
}

#[async_trait]
impl QuizChannel for DiscordChannel {
    async fn post(
        &self,
        content: Option<String>,
        embed: CreateEmbed,
    ) -> Result<MessageId, QuizError> {
        let mut builder = CreateMessage::new().embed(embed);
        if let Some(content) = content {
            builder = builder.content(content);
        }
        let message = self.channel_id.send_message(&self.ctx.http, builder).await?;
        Ok(message.id)
    }

    async fn update(
        &self,
        handle: MessageId,
        content: Option<String>,
        embed: Option<CreateEmbed>,
    ) -> Result<(), QuizError> {
        let mut builder = EditMessage::new();
        if let Some(content) = content {
            builder = builder.content(content);
        }
        if let Some(embed) = embed {
            builder = builder.embed(embed);
        }
        self.channel_id
            .edit_message(&self.ctx.http, handle, builder)
            .await?;
        Ok(())
    }

    async fn add_allowed_choices(
        &self,
        handle: MessageId,
        choices: &[Choice],
    ) -> Result<(), QuizError> {
        for choice in choices {
            self.ctx
                .http
                .create_reaction(
                    self.channel_id,
                    handle,
                    &ReactionType::Unicode(choice.emoji().to_string()),
                )
                .await?;
        }
        Ok(())
    }

    async fn clear_responses(&self, handle: MessageId) -> Result<(), QuizError> {
        self.ctx
            .http
            .delete_message_reactions(self.channel_id, handle)
            .await?;
        Ok(())
    }

    async fn portrait_url(&self, user: UserId) -> Option<String> {
        self.ctx.http.get_user(user).await.ok().map(|u| u.face())
    }

    fn jump_link(&self, handle: MessageId) -> String {
        format!(
            "https://discord.com/channels/{}/{}/{}",
            self.guild_id, self.channel_id, handle
        )
    }
}
