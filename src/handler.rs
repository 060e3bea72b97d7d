//! Gateway event handler: routes prefix commands and feeds reaction events
//! into the active quiz session for the guild they came from.

use crate::commands;
use crate::commands::quiz::session::Choice;
use crate::model::AppState;
use serenity::async_trait;
use serenity::model::channel::{Message, Reaction, ReactionType};
use serenity::model::gateway::Ready;
use serenity::prelude::{Context, EventHandler};
use std::str::FromStr;
use tracing::info;

enum Command {
    Ping,
    Prefix,
    Quiz,
    Unknown,
}

impl FromStr for Command {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ping" => Ok(Command::Ping),
            "prefix" => Ok(Command::Prefix),
            "quiz" => Ok(Command::Quiz),
            _ => Ok(Command::Unknown),
        }
    }
}

pub struct Handler;

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        let Some(app_state) = AppState::from_ctx(&ctx).await else {
            return;
        };
        let prefix = app_state.prefix.read().await.clone();
        let Some(stripped) = msg.content.strip_prefix(&prefix) else {
            return;
        };

        let mut parts = stripped.split_whitespace();
        let Some(command_word) = parts.next() else {
            return;
        };
        let args_vec: Vec<&str> = parts.collect();

        match Command::from_str(&command_word.to_lowercase()).unwrap_or(Command::Unknown) {
            Command::Ping => commands::ping::run(&ctx, &msg).await,
            Command::Prefix => {
                commands::prefix::run(&ctx, &msg, app_state.prefix.clone(), args_vec).await
            }
            Command::Quiz => commands::quiz::run::run_prefix(&ctx, &msg, args_vec).await,
            Command::Unknown => {}
        }
    }

    /// Every reaction in a guild with an active session is a candidate
    /// answer event. Anything stale, foreign, or non-quiz input falls
    /// through one of the early returns and is dropped silently.
    async fn reaction_add(&self, ctx: Context, reaction: Reaction) {
        let Some(guild_id) = reaction.guild_id else {
            return;
        };
        let Some(user_id) = reaction.user_id else {
            return;
        };
        // The bot primes each round with its own A-D reactions.
        let me = ctx.cache.current_user().id;
        if user_id == me {
            return;
        }
        let ReactionType::Unicode(ref emoji) = reaction.emoji else {
            return;
        };
        let Some(choice) = Choice::from_unicode(emoji) else {
            return;
        };
        let Some(app_state) = AppState::from_ctx(&ctx).await else {
            return;
        };
        let Some(session) = app_state.quiz_registry.get(guild_id).await else {
            return;
        };
        session
            .record_answer(reaction.message_id, user_id, choice)
            .await;
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("{} is connected and ready!", ready.user.name);
    }
}
