use std::env;
use std::sync::Arc;

use quizmaster_bot::constants::DEFAULT_PREFIX;
use quizmaster_bot::handler::Handler;
use quizmaster_bot::model::{AppState, ShardManagerContainer};
use serenity::model::gateway::GatewayIntents;
use serenity::prelude::*;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let token = env::var("DISCORD_TOKEN").expect("Expected DISCORD_TOKEN in the environment.");
    let prefix = env::var("COMMAND_PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string());

    // Reactions carry the quiz answers, so the reaction intent is required
    // alongside the usual message intents.
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MESSAGE_REACTIONS;

    let mut client = Client::builder(&token, intents)
        .event_handler(Handler)
        .await
        .expect("Error creating the Discord client.");

    {
        let mut data = client.data.write().await;
        data.insert::<ShardManagerContainer>(client.shard_manager.clone());
        data.insert::<AppState>(Arc::new(AppState::new(prefix)));
    }

    if let Err(why) = client.start().await {
        error!("Client error: {:?}", why);
    }
}
