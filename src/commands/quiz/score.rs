//! Pure scoring state for one quiz participant.
//!
//! Records are created lazily on a participant's first locked-in answer and
//! live only as long as the session that owns them.

use crate::constants::{CORRECT_POINTS, INCORRECT_PENALTY, STREAK_BONUS};

/// Running tally for a single participant within one session.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScoreRecord {
    /// Total answers locked in across rounds (correct + incorrect).
    pub answered: u32,
    pub correct: u32,
    /// May go negative; incorrect answers cost points.
    pub score: i64,
    /// Consecutive correct answers, reset by any incorrect one.
    pub current_streak: u32,
    pub max_streak: u32,
    /// Set for exactly one round after a streak greater than 1 is broken,
    /// so the reveal can show an "extinguished" marker. Cleared by the next
    /// answer of either kind. Display-only.
    pub streak_just_reset: bool,
}

impl ScoreRecord {
    /// Applies a correct answer: base points plus a bonus that grows with
    /// the streak held *before* this answer extends it.
    pub fn apply_correct(&mut self) {
        self.answered += 1;
        self.correct += 1;
        self.score += CORRECT_POINTS + STREAK_BONUS * i64::from(self.current_streak);
        self.current_streak += 1;
        self.max_streak = self.max_streak.max(self.current_streak);
        self.streak_just_reset = false;
    }

    /// Applies an incorrect answer: flat penalty and streak reset.
    pub fn apply_incorrect(&mut self) {
        self.answered += 1;
        self.score -= INCORRECT_PENALTY;
        self.streak_just_reset = self.current_streak > 1;
        self.current_streak = 0;
    }

    pub fn incorrect(&self) -> u32 {
        self.answered - self.correct
    }
}
