//! Drives one quiz session from lobby to final scores.
//!
//! A session is a single sequential task: warmup, then per round
//! open → locked → revealed, with cooperative timed waits between phases.
//! The only concurrency is reaction events landing in [`SessionState`]
//! while a round is open.

use super::channel::QuizChannel;
use super::session::{Choice, SessionState};
use super::source::{Difficulty, Question, QuestionSource};
use super::standings::{self, rank_standings};
use super::{ui, QuizError};
use crate::constants::{
    ANSWER_WINDOW_SECS, COUNTDOWN_STEP, MAX_ROUNDS, MIN_ROUNDS, REVEAL_PAUSE, WARMUP_DELAY,
};
use rand::seq::SliceRandom;
use serenity::model::id::MessageId;
use std::sync::Arc;
use tokio::time::sleep;
use tracing::info;

/// Splits `rounds` as evenly as possible across the three difficulty tiers.
/// A remainder goes to medium first, then hard, never easy.
pub fn allocate_rounds(rounds: usize) -> [(Difficulty, usize); 3] {
    let base = rounds / 3;
    let remainder = rounds % 3;
    [
        (Difficulty::Easy, base),
        (Difficulty::Medium, base + usize::from(remainder != 0)),
        (Difficulty::Hard, base + usize::from(remainder == 2)),
    ]
}

/// Shuffles the four options into display order and reports where the
/// correct answer landed. Fisher-Yates via `SliceRandom`, uniform over the
/// 24 permutations.
pub fn shuffle_options(question: &Question) -> ([&str; 4], usize) {
    let pool: [&str; 4] = [
        &question.incorrect_answers[0],
        &question.incorrect_answers[1],
        &question.incorrect_answers[2],
        &question.correct_answer,
    ];
    let mut order = [0usize, 1, 2, 3];
    order.shuffle(&mut rand::rng());
    let options = order.map(|i| pool[i]);
    // Slot 3 in the pool is the correct answer. Matching by index rather
    // than by text keeps duplicate option strings unambiguous.
    let correct_index = order.iter().position(|&i| i == 3).unwrap_or(0);
    (options, correct_index)
}

/// One session's round loop, generic over its presentation channel and
/// question source.
pub struct RoundEngine<C, S> {
    channel: C,
    source: S,
    state: Arc<SessionState>,
    rounds: usize,
    /// Active command prefix, shown in the restart hint on the final embed.
    prefix: String,
}

impl<C: QuizChannel, S: QuestionSource> RoundEngine<C, S> {
    /// Rejects an out-of-range round count before anything is fetched or
    /// displayed.
    pub fn new(
        channel: C,
        source: S,
        state: Arc<SessionState>,
        rounds: usize,
        prefix: String,
    ) -> Result<Self, QuizError> {
        if !(MIN_ROUNDS..=MAX_ROUNDS).contains(&rounds) {
            return Err(QuizError::InvalidRoundCount(rounds));
        }
        Ok(Self {
            channel,
            source,
            state,
            rounds,
            prefix,
        })
    }

    /// Runs the whole session. On error the session is abandoned where it
    /// stands; the caller releases the registry slot either way.
    pub async fn run(&self) -> Result<(), QuizError> {
        let questions = self.fetch_questions().await?;

        let handle = self
            .channel
            .post(None, ui::lobby_embed(self.rounds))
            .await?;
        self.state
            .set_jump_url(self.channel.jump_link(handle))
            .await;
        info!(
            guild = %self.state.guild_id(),
            rounds = self.rounds,
            "quiz session starting"
        );
        sleep(WARMUP_DELAY).await;

        for (index, question) in questions.iter().enumerate() {
            self.play_round(handle, index, question).await?;
        }

        let standings = rank_standings(&self.state.records_snapshot().await);
        let portrait = match standings::winner(&standings) {
            Some(entry) => self.channel.portrait_url(entry.user).await,
            None => None,
        };
        self.channel
            .update(
                handle,
                Some(String::new()),
                Some(ui::final_embed(
                    &standings,
                    self.rounds,
                    portrait,
                    &self.prefix,
                )),
            )
            .await?;
        info!(guild = %self.state.guild_id(), "quiz session complete");
        Ok(())
    }

    /// Fetches the whole question batch up front, one request per
    /// difficulty tier. A failed or short batch aborts the session; there
    /// is no retry.
    async fn fetch_questions(&self) -> Result<Vec<Question>, QuizError> {
        let mut questions = Vec::with_capacity(self.rounds);
        for (difficulty, count) in allocate_rounds(self.rounds) {
            questions.extend(self.source.fetch(difficulty, count).await?);
        }
        Ok(questions)
    }

    async fn play_round(
        &self,
        handle: MessageId,
        index: usize,
        question: &Question,
    ) -> Result<(), QuizError> {
        let (options, correct_index) = shuffle_options(question);
        let correct_choice = Choice::ALL[correct_index];

        self.channel
            .update(
                handle,
                None,
                Some(ui::question_embed(question, &options, index, self.rounds)),
            )
            .await?;
        self.channel
            .add_allowed_choices(handle, &Choice::ALL)
            .await?;
        self.state.open_round(handle).await;

        let mut seconds_left = ANSWER_WINDOW_SECS;
        while seconds_left > 0 {
            self.channel
                .update(handle, Some(ui::countdown_content(seconds_left)), None)
                .await?;
            sleep(COUNTDOWN_STEP).await;
            seconds_left = seconds_left.saturating_sub(COUNTDOWN_STEP.as_secs());
        }

        // Authoritative cut-off: every event after this point is dropped,
        // regardless of how long the reveal below takes.
        let snapshot = self.state.lock_round().await;
        self.channel
            .update(handle, Some(ui::times_up_content()), None)
            .await?;
        self.channel.clear_responses(handle).await?;

        self.state.tally(&snapshot, correct_choice).await;

        let mut correct_users = Vec::new();
        let mut incorrect_users = Vec::new();
        for (&user, &choice) in &snapshot {
            if choice == correct_choice {
                correct_users.push(user);
            } else {
                incorrect_users.push(user);
            }
        }
        correct_users.sort_unstable();
        incorrect_users.sort_unstable();

        let standings = rank_standings(&self.state.records_snapshot().await);
        self.channel
            .update(
                handle,
                Some(String::new()),
                Some(ui::reveal_embed(
                    correct_choice,
                    &question.correct_answer,
                    &correct_users,
                    &incorrect_users,
                    &standings,
                    self.rounds - index - 1,
                )),
            )
            .await?;
        sleep(REVEAL_PAUSE).await;
        Ok(())
    }
}
