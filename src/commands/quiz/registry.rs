//! Admission control: at most one active quiz session per guild.

use super::session::SessionState;
use serenity::model::id::GuildId;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Outcome of a start attempt. A rejected start is a normal admission
/// result, not an error; the existing session is handed back so the caller
/// can point spectators at the game already running.
pub enum Admission {
    Started(Arc<SessionState>),
    AlreadyActive(Arc<SessionState>),
}

/// Process-wide table of active sessions, keyed by guild. Insert-if-absent
/// under one write lock, so two concurrent starts for the same guild can
/// never both be admitted.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<GuildId, Arc<SessionState>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admits a new session for `guild_id`, or returns the one already
    /// running. There is no queueing; the loser of the race is rejected
    /// immediately.
    pub async fn try_start(&self, guild_id: GuildId) -> Admission {
        let mut sessions = self.sessions.write().await;
        match sessions.entry(guild_id) {
            Entry::Occupied(existing) => Admission::AlreadyActive(existing.get().clone()),
            Entry::Vacant(slot) => {
                let state = Arc::new(SessionState::new(guild_id));
                slot.insert(state.clone());
                Admission::Started(state)
            }
        }
    }

    pub async fn get(&self, guild_id: GuildId) -> Option<Arc<SessionState>> {
        self.sessions.read().await.get(&guild_id).cloned()
    }

    /// Ends a guild's session, freeing the slot for the next `quiz` command.
    /// Any round still open is closed so late reaction events routed through
    /// a lingering reference can no longer land.
    pub async fn end(&self, guild_id: GuildId) {
        let removed = self.sessions.write().await.remove(&guild_id);
        if let Some(state) = removed {
            state.lock_round().await;
        }
    }
}
