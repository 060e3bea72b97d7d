//! Implements the `quiz` prefix command: parse the round count, claim the
//! guild's session slot, drive the engine, and release the slot when done.

use super::channel::DiscordChannel;
use super::engine::RoundEngine;
use super::registry::Admission;
use super::source::OpenTdbSource;
use crate::constants::{MAX_ROUNDS, MIN_ROUNDS};
use crate::model::AppState;
use serenity::model::channel::Message;
use serenity::prelude::*;
use tracing::error;

const DEFAULT_ROUNDS: usize = 5;

pub async fn run_prefix(ctx: &Context, msg: &Message, args: Vec<&str>) {
    let Some(guild_id) = msg.guild_id else {
        msg.reply(&ctx.http, "Quizzes can only be run in a server.")
            .await
            .ok();
        return;
    };

    let rounds = match args.first() {
        None => DEFAULT_ROUNDS,
        Some(raw) => match raw.parse::<usize>() {
            Ok(n) => n,
            Err(_) => {
                msg.reply(
                    &ctx.http,
                    "Make sure to specify a *positive number* of rounds.",
                )
                .await
                .ok();
                return;
            }
        },
    };
    if !(MIN_ROUNDS..=MAX_ROUNDS).contains(&rounds) {
        msg.reply(
            &ctx.http,
            format!("A quiz can have between {MIN_ROUNDS} and {MAX_ROUNDS} questions."),
        )
        .await
        .ok();
        return;
    }

    let Some(app_state) = AppState::from_ctx(ctx).await else {
        return;
    };

    let state = match app_state.quiz_registry.try_start(guild_id).await {
        Admission::Started(state) => state,
        Admission::AlreadyActive(existing) => {
            let location = existing
                .jump_url()
                .await
                .unwrap_or_else(|| "It is just getting started.".to_string());
            msg.reply(
                &ctx.http,
                format!(
                    "Only one quiz can be active at once. \
                     You can find the current game here:\n{location}"
                ),
            )
            .await
            .ok();
            return;
        }
    };

    let channel = DiscordChannel::new(ctx.clone(), guild_id, msg.channel_id);
    let prefix = app_state.prefix.read().await.clone();
    let result = match RoundEngine::new(channel, OpenTdbSource::new(), state, rounds, prefix) {
        Ok(engine) => engine.run().await,
        Err(e) => Err(e),
    };

    // The slot is released no matter how the session ended, so a failed
    // session never blocks the guild's next quiz.
    app_state.quiz_registry.end(guild_id).await;

    if let Err(e) = result {
        error!(guild = %guild_id, error = %e, "quiz session aborted");
        msg.channel_id
            .say(
                &ctx.http,
                "The quiz ran into a problem and had to stop. Try again in a bit.",
            )
            .await
            .ok();
    }
}
