// Central constants for quiz pacing, scoring, and limits.
use std::time::Duration;

/// Delay between the lobby announcement and the first question.
pub const WARMUP_DELAY: Duration = Duration::from_secs(10);
/// Total answer window per question, in seconds.
pub const ANSWER_WINDOW_SECS: u64 = 15;
/// The countdown display is refreshed once per sub-interval of the window.
pub const COUNTDOWN_STEP: Duration = Duration::from_secs(5);
/// Pause on the answer reveal before the next question (or the final scores).
pub const REVEAL_PAUSE: Duration = Duration::from_secs(5);

/// Points awarded for a correct answer before any streak bonus.
pub const CORRECT_POINTS: i64 = 1000;
/// Extra points per consecutive correct answer already on the streak.
pub const STREAK_BONUS: i64 = 50;
/// Points deducted for an incorrect answer.
pub const INCORRECT_PENALTY: i64 = 250;

/// Inclusive bounds on the number of rounds in one quiz.
pub const MIN_ROUNDS: usize = 1;
pub const MAX_ROUNDS: usize = 15;

/// Standings are truncated to this many entries on the per-round reveal.
pub const STANDINGS_LIMIT: usize = 10;

pub const QUIZ_COLOR: u32 = 0x8B008B;

pub const DEFAULT_PREFIX: &str = "6th.";
