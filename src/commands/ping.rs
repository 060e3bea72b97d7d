use crate::model::ShardManagerContainer;
use serenity::model::channel::Message;
use serenity::prelude::*;
use tracing::warn;

/// Reports gateway heartbeat latency for the shard that saw the message.
pub async fn run(ctx: &Context, msg: &Message) {
    let latency = {
        let data = ctx.data.read().await;
        let Some(shard_manager) = data.get::<ShardManagerContainer>() else {
            return;
        };
        let runners = shard_manager.runners.lock().await;
        runners.get(&ctx.shard_id).and_then(|runner| runner.latency)
    };

    let response = match latency {
        Some(beat) => format!("Pong! Gateway heartbeat: `{} ms`", beat.as_millis()),
        None => "Pong! No heartbeat measured yet; ask again shortly.".to_string(),
    };
    if let Err(why) = msg.channel_id.say(&ctx.http, response).await {
        warn!("Error sending ping response: {:?}", why);
    }
}
