//! Per-guild session bookkeeping: the open round's pending choices and the
//! scoreboard that accumulates across rounds.

use super::score::ScoreRecord;
use serenity::model::id::{GuildId, MessageId, UserId};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// The four answer symbols, in fixed display order A through D.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    A,
    B,
    C,
    D,
}

impl Choice {
    pub const ALL: [Choice; 4] = [Choice::A, Choice::B, Choice::C, Choice::D];

    /// The regional-indicator emoji used as the reaction for this choice.
    pub fn emoji(self) -> &'static str {
        match self {
            Choice::A => "\u{1F1E6}",
            Choice::B => "\u{1F1E7}",
            Choice::C => "\u{1F1E8}",
            Choice::D => "\u{1F1E9}",
        }
    }

    /// Maps a raw unicode reaction back to a choice. Anything else is not
    /// quiz input and is ignored upstream.
    pub fn from_unicode(raw: &str) -> Option<Choice> {
        Choice::ALL.into_iter().find(|c| c.emoji() == raw)
    }
}

/// The currently-open round: which message collects reactions and what each
/// participant's latest (not yet locked) choice is.
struct OpenRound {
    message_id: MessageId,
    pending: HashMap<UserId, Choice>,
}

/// Shared state for one active session. The engine task drives round
/// transitions while the gateway event handler upserts pending choices
/// concurrently; both go through the same lock, so an answer either lands
/// before the lock snapshot or is dropped.
pub struct SessionState {
    guild_id: GuildId,
    open_round: RwLock<Option<OpenRound>>,
    records: RwLock<HashMap<UserId, ScoreRecord>>,
    /// Jump link to the session's display message, for redirecting a second
    /// `quiz` invocation to the game in progress.
    jump_url: RwLock<Option<String>>,
}

impl SessionState {
    pub fn new(guild_id: GuildId) -> Self {
        Self {
            guild_id,
            open_round: RwLock::new(None),
            records: RwLock::new(HashMap::new()),
            jump_url: RwLock::new(None),
        }
    }

    pub fn guild_id(&self) -> GuildId {
        self.guild_id
    }

    /// Records a participant's answer for the open round. A later call for
    /// the same participant overwrites the earlier one; only the choice held
    /// at lock time is scored. Events for a locked, stale, or unrelated
    /// message are dropped without effect.
    pub async fn record_answer(&self, message_id: MessageId, user: UserId, choice: Choice) {
        let mut guard = self.open_round.write().await;
        match guard.as_mut() {
            Some(round) if round.message_id == message_id => {
                round.pending.insert(user, choice);
            }
            _ => {}
        }
    }

    /// Opens the answer window for a round displayed on `message_id`.
    pub async fn open_round(&self, message_id: MessageId) {
        let mut guard = self.open_round.write().await;
        *guard = Some(OpenRound {
            message_id,
            pending: HashMap::new(),
        });
    }

    /// Closes the answer window and returns the authoritative snapshot of
    /// pending choices. Once this returns, no further answer event for the
    /// round can be recorded.
    pub async fn lock_round(&self) -> HashMap<UserId, Choice> {
        let mut guard = self.open_round.write().await;
        guard.take().map(|round| round.pending).unwrap_or_default()
    }

    /// Scores a locked round: exactly one mutation per participant in the
    /// snapshot, creating their record on first answer. Participants absent
    /// from the snapshot are untouched.
    pub async fn tally(&self, snapshot: &HashMap<UserId, Choice>, correct: Choice) {
        let mut records = self.records.write().await;
        for (&user, &choice) in snapshot {
            let record = records.entry(user).or_default();
            if choice == correct {
                record.apply_correct();
            } else {
                record.apply_incorrect();
            }
        }
    }

    pub async fn records_snapshot(&self) -> HashMap<UserId, ScoreRecord> {
        self.records.read().await.clone()
    }

    pub async fn set_jump_url(&self, url: String) {
        *self.jump_url.write().await = Some(url);
    }

    pub async fn jump_url(&self) -> Option<String> {
        self.jump_url.read().await.clone()
    }
}
