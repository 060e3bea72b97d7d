//! Session-level behavior: answer ingestion, admission control, and full
//! engine runs against recording fakes under paused time.

use async_trait::async_trait;
use quizmaster_bot::commands::quiz::channel::QuizChannel;
use quizmaster_bot::commands::quiz::engine::RoundEngine;
use quizmaster_bot::commands::quiz::registry::{Admission, SessionRegistry};
use quizmaster_bot::commands::quiz::session::{Choice, SessionState};
use quizmaster_bot::commands::quiz::source::{Difficulty, Question, QuestionSource};
use quizmaster_bot::commands::quiz::standings::rank_standings;
use quizmaster_bot::commands::quiz::QuizError;
use serenity::builder::CreateEmbed;
use serenity::model::id::{GuildId, MessageId, UserId};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn display() -> MessageId {
    MessageId::new(77)
}

fn guild() -> GuildId {
    GuildId::new(1)
}

fn sample_question(difficulty: Difficulty) -> Question {
    Question {
        text: "Which crate drives this bot's gateway connection?".to_string(),
        correct_answer: "serenity".to_string(),
        incorrect_answers: [
            "twilight".to_string(),
            "serde".to_string(),
            "hyper".to_string(),
        ],
        category: "Science: Computers".to_string(),
        difficulty,
    }
}

/// Counts display calls and hands out a fixed display handle.
#[derive(Clone, Default)]
struct RecordingChannel {
    posts: Arc<AtomicU32>,
    updates: Arc<AtomicU32>,
    clears: Arc<AtomicU32>,
}

#[async_trait]
impl QuizChannel for RecordingChannel {
    async fn post(
        &self,
        _content: Option<String>,
        _embed: CreateEmbed,
    ) -> Result<MessageId, QuizError> {
        self.posts.fetch_add(1, Ordering::SeqCst);
        Ok(display())
    }

    async fn update(
        &self,
        _handle: MessageId,
        _content: Option<String>,
        _embed: Option<CreateEmbed>,
    ) -> Result<(), QuizError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn add_allowed_choices(
        &self,
        _handle: MessageId,
        _choices: &[Choice],
    ) -> Result<(), QuizError> {
        Ok(())
    }

    async fn clear_responses(&self, _handle: MessageId) -> Result<(), QuizError> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn portrait_url(&self, _user: UserId) -> Option<String> {
        None
    }

    fn jump_link(&self, handle: MessageId) -> String {
        format!("https://example.invalid/{handle}")
    }
}

/// Always returns exactly the requested number of questions.
struct FixedSource;

#[async_trait]
impl QuestionSource for FixedSource {
    async fn fetch(
        &self,
        difficulty: Difficulty,
        count: usize,
    ) -> Result<Vec<Question>, QuizError> {
        Ok((0..count).map(|_| sample_question(difficulty)).collect())
    }
}

struct FailingSource;

#[async_trait]
impl QuestionSource for FailingSource {
    async fn fetch(
        &self,
        _difficulty: Difficulty,
        _count: usize,
    ) -> Result<Vec<Question>, QuizError> {
        Err(QuizError::SourcePayload("service unavailable".to_string()))
    }
}

#[tokio::test]
async fn last_answer_before_lock_wins() {
    let state = SessionState::new(guild());
    let player = UserId::new(10);

    state.open_round(display()).await;
    state.record_answer(display(), player, Choice::A).await;
    state.record_answer(display(), player, Choice::D).await;

    let snapshot = state.lock_round().await;
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.get(&player), Some(&Choice::D));

    // One mutation for the round: the overwritten A never counts.
    state.tally(&snapshot, Choice::A).await;
    let records = state.records_snapshot().await;
    let record = records.get(&player).expect("record created on tally");
    assert_eq!(record.answered, 1);
    assert_eq!(record.score, -250);
}

#[tokio::test]
async fn stale_early_and_late_events_are_dropped_silently() {
    let state = SessionState::new(guild());
    let player = UserId::new(10);

    // Before any round opens.
    state.record_answer(display(), player, Choice::A).await;
    state.open_round(display()).await;
    // Wrong display message (stale round).
    state
        .record_answer(MessageId::new(9999), player, Choice::B)
        .await;

    let snapshot = state.lock_round().await;
    assert!(snapshot.is_empty());

    // After the lock.
    state.record_answer(display(), player, Choice::C).await;
    assert!(state.lock_round().await.is_empty());
    assert!(state.records_snapshot().await.is_empty());
}

#[tokio::test]
async fn one_round_session_scores_only_participants_with_answers() {
    let state = SessionState::new(guild());
    let alice = UserId::new(1);
    let bob = UserId::new(2);
    // carol never answers.

    state.open_round(display()).await;
    state.record_answer(display(), alice, Choice::B).await;
    state.record_answer(display(), bob, Choice::C).await;
    let snapshot = state.lock_round().await;
    state.tally(&snapshot, Choice::B).await;

    let records = state.records_snapshot().await;
    assert_eq!(records.len(), 2);

    let standings = rank_standings(&records);
    assert_eq!(standings.len(), 2);
    assert_eq!(standings[0].user, alice);
    assert_eq!(standings[0].rank, 1);
    assert_eq!(standings[0].record.score, 1000);
    assert_eq!(standings[1].user, bob);
    assert_eq!(standings[1].rank, 2);
    assert_eq!(standings[1].record.score, -250);
}

#[tokio::test]
async fn registry_admits_at_most_one_session_per_guild() {
    let registry = SessionRegistry::new();

    let first = match registry.try_start(guild()).await {
        Admission::Started(state) => state,
        Admission::AlreadyActive(_) => panic!("first start must be admitted"),
    };
    first.set_jump_url("https://example.invalid/live".to_string()).await;

    match registry.try_start(guild()).await {
        Admission::Started(_) => panic!("second start must be rejected"),
        Admission::AlreadyActive(existing) => {
            assert!(Arc::ptr_eq(&first, &existing));
            assert_eq!(
                existing.jump_url().await.as_deref(),
                Some("https://example.invalid/live")
            );
        }
    }

    // Another guild is unaffected.
    assert!(matches!(
        registry.try_start(GuildId::new(2)).await,
        Admission::Started(_)
    ));

    registry.end(guild()).await;
    assert!(matches!(
        registry.try_start(guild()).await,
        Admission::Started(_)
    ));
}

#[test]
fn out_of_range_round_counts_are_rejected_before_any_fetch() {
    for rounds in [0, 16, 100] {
        let state = Arc::new(SessionState::new(guild()));
        let result = RoundEngine::new(
            RecordingChannel::default(),
            FixedSource,
            state,
            rounds,
            "6th.".to_string(),
        );
        assert!(matches!(result, Err(QuizError::InvalidRoundCount(n)) if n == rounds));
    }
}

#[tokio::test]
async fn source_failure_aborts_before_anything_is_displayed() {
    let channel = RecordingChannel::default();
    let state = Arc::new(SessionState::new(guild()));
    let engine = RoundEngine::new(channel.clone(), FailingSource, state, 3, "6th.".to_string())
        .expect("round count in range");

    let result = engine.run().await;
    assert!(matches!(result, Err(QuizError::SourcePayload(_))));
    assert_eq!(channel.posts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn failed_session_frees_the_registry_slot() {
    let registry = SessionRegistry::new();
    let state = match registry.try_start(guild()).await {
        Admission::Started(state) => state,
        Admission::AlreadyActive(_) => panic!("slot was free"),
    };

    let engine = RoundEngine::new(
        RecordingChannel::default(),
        FailingSource,
        state,
        3,
        "6th.".to_string(),
    )
    .expect("round count in range");
    assert!(engine.run().await.is_err());

    registry.end(guild()).await;
    assert!(matches!(
        registry.try_start(guild()).await,
        Admission::Started(_)
    ));
}

// Full engine run under paused time. One round: the window is open from
// t=10s to t=25s, the reveal pause ends at t=30s.
#[tokio::test(start_paused = true)]
async fn full_session_locks_tallies_and_ranks() {
    let channel = RecordingChannel::default();
    let state = Arc::new(SessionState::new(guild()));
    let engine = RoundEngine::new(
        channel.clone(),
        FixedSource,
        state.clone(),
        1,
        "6th.".to_string(),
    )
    .expect("round count in range");
    let session = tokio::spawn(async move { engine.run().await });

    // Mid-window: four participants pick four different options, so exactly
    // one of them holds the correct one wherever the shuffle put it.
    tokio::time::sleep(Duration::from_secs(15)).await;
    for (id, choice) in Choice::ALL.iter().enumerate() {
        state
            .record_answer(display(), UserId::new(id as u64 + 1), *choice)
            .await;
    }

    tokio::time::sleep(Duration::from_secs(20)).await;
    session
        .await
        .expect("engine task panicked")
        .expect("session completed");

    let records = state.records_snapshot().await;
    assert_eq!(records.len(), 4);
    let mut scores: Vec<i64> = records.values().map(|r| r.score).collect();
    scores.sort_unstable();
    assert_eq!(scores, vec![-250, -250, -250, 1000]);

    let standings = rank_standings(&records);
    let ranks: Vec<usize> = standings.iter().map(|e| e.rank).collect();
    assert_eq!(ranks, vec![1, 2, 2, 2]);
    assert_eq!(standings[0].record.max_streak, 1);

    assert_eq!(channel.posts.load(Ordering::SeqCst), 1);
    assert_eq!(channel.clears.load(Ordering::SeqCst), 1);
    assert!(state.jump_url().await.is_some());
}

#[tokio::test(start_paused = true)]
async fn answers_after_the_lock_never_score() {
    let channel = RecordingChannel::default();
    let state = Arc::new(SessionState::new(guild()));
    let engine = RoundEngine::new(channel, FixedSource, state.clone(), 1, "6th.".to_string())
        .expect("round count in range");
    let session = tokio::spawn(async move { engine.run().await });

    let on_time = UserId::new(1);
    let too_late = UserId::new(2);

    tokio::time::sleep(Duration::from_secs(15)).await;
    state.record_answer(display(), on_time, Choice::A).await;

    // t=27s: the round locked at t=25s and is showing its reveal.
    tokio::time::sleep(Duration::from_secs(12)).await;
    state.record_answer(display(), too_late, Choice::A).await;

    tokio::time::sleep(Duration::from_secs(10)).await;
    session
        .await
        .expect("engine task panicked")
        .expect("session completed");

    let records = state.records_snapshot().await;
    assert!(records.contains_key(&on_time));
    assert!(!records.contains_key(&too_late));
}

#[tokio::test]
async fn runtime_prefix_updates_are_visible_to_readers() {
    let app_state = quizmaster_bot::AppState::new("6th.".to_string());
    assert_eq!(app_state.prefix.read().await.as_str(), "6th.");

    *app_state.prefix.write().await = "quiz!".to_string();
    assert_eq!(app_state.prefix.read().await.as_str(), "quiz!");
}
