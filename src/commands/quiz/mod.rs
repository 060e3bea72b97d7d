//! The multi-round trivia engine: per-guild sessions, reaction-driven
//! answers, streak scoring, and competition-ranked standings.

pub mod channel;
pub mod engine;
pub mod registry;
pub mod run;
pub mod score;
pub mod session;
pub mod source;
pub mod standings;
pub mod ui;

use crate::constants::{MAX_ROUNDS, MIN_ROUNDS};
use thiserror::Error;

/// Failures that abort a quiz session. Stale or invalid answer events are
/// not part of this taxonomy; they are silently dropped at ingestion.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("round count {0} is outside the allowed range {MIN_ROUNDS}..={MAX_ROUNDS}")]
    InvalidRoundCount(usize),
    #[error("question source request failed: {0}")]
    SourceRequest(#[from] reqwest::Error),
    #[error("question source returned an unusable payload: {0}")]
    SourcePayload(String),
    #[error("discord request failed: {0}")]
    Discord(#[from] serenity::Error),
}
