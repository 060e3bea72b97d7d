//! Leaderboard ordering and competition-style rank assignment.

use super::score::ScoreRecord;
use serenity::model::id::UserId;
use std::collections::HashMap;

/// One rendered leaderboard line: derived fresh each time standings are
/// shown, never stored.
#[derive(Debug, Clone)]
pub struct StandingsEntry {
    pub user: UserId,
    pub record: ScoreRecord,
    /// Competition rank: ties share a rank, and the rank after a tie group
    /// reflects position, so the sequence can skip numbers (1, 2, 2, 4).
    pub rank: usize,
}

/// Sorts all records descending by score and assigns competition ranks over
/// the full sequence. Callers wanting a top-N view truncate afterwards, so
/// displayed ranks always match the participant's overall placing.
pub fn rank_standings(records: &HashMap<UserId, ScoreRecord>) -> Vec<StandingsEntry> {
    let mut ordered: Vec<(UserId, ScoreRecord)> = records
        .iter()
        .map(|(&user, record)| (user, record.clone()))
        .collect();
    // Secondary key keeps tied entries in a deterministic display order.
    ordered.sort_by(|a, b| b.1.score.cmp(&a.1.score).then(a.0.cmp(&b.0)));

    let mut standings: Vec<StandingsEntry> = Vec::with_capacity(ordered.len());
    for (position, (user, record)) in ordered.into_iter().enumerate() {
        let rank = match standings.last() {
            Some(prev) if prev.record.score == record.score => prev.rank,
            _ => position + 1,
        };
        standings.push(StandingsEntry { user, record, rank });
    }
    standings
}

/// The session winner, if anyone is on the board.
pub fn winner(standings: &[StandingsEntry]) -> Option<&StandingsEntry> {
    standings.first()
}
