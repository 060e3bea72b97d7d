//! Shared data structures stored in Serenity's global `TypeMap`.

use crate::commands::quiz::registry::SessionRegistry;
use serenity::gateway::ShardManager;
use serenity::prelude::TypeMapKey;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A container for the ShardManager, allowing it to be stored in the global
/// context. Used by `ping` to report gateway latency.
pub struct ShardManagerContainer;

impl TypeMapKey for ShardManagerContainer {
    type Value = Arc<ShardManager>;
}

/// The central, shared state of the application. An `Arc<AppState>` is
/// stored in the global context for access from any event handler.
pub struct AppState {
    /// Active quiz sessions, at most one per guild.
    pub quiz_registry: SessionRegistry,
    /// The current command prefix.
    pub prefix: Arc<RwLock<String>>,
}

impl TypeMapKey for AppState {
    type Value = Arc<AppState>;
}

impl AppState {
    pub fn new(prefix: String) -> Self {
        Self {
            quiz_registry: SessionRegistry::new(),
            prefix: Arc::new(RwLock::new(prefix)),
        }
    }

    pub async fn from_ctx(ctx: &serenity::prelude::Context) -> Option<Arc<Self>> {
        ctx.data.read().await.get::<AppState>().cloned()
    }
}
