//! Embed rendering details players actually see: the restart hint, the
//! standings cut, streak flair, and the reveal's result lines.

use quizmaster_bot::commands::quiz::score::ScoreRecord;
use quizmaster_bot::commands::quiz::session::Choice;
use quizmaster_bot::commands::quiz::standings::StandingsEntry;
use quizmaster_bot::commands::quiz::ui;
use serde_json::Value;
use serenity::builder::CreateEmbed;
use serenity::model::id::UserId;

fn to_json(embed: &CreateEmbed) -> Value {
    serde_json::to_value(embed).expect("embed builders serialize to JSON")
}

fn entry(id: u64, record: ScoreRecord, rank: usize) -> StandingsEntry {
    StandingsEntry {
        user: UserId::new(id),
        record,
        rank,
    }
}

fn entry_with_score(id: u64, score: i64, rank: usize) -> StandingsEntry {
    entry(
        id,
        ScoreRecord {
            score,
            ..ScoreRecord::default()
        },
        rank,
    )
}

#[test]
fn final_embed_restart_hint_uses_the_active_prefix() {
    let embed = ui::final_embed(&[], 5, None, "6th.");
    let json = to_json(&embed);
    assert_eq!(
        json["author"]["name"],
        "Quiz Complete | Type `6th.quiz` for another one!"
    );

    let embed = ui::final_embed(&[], 5, None, "!");
    let json = to_json(&embed);
    assert_eq!(
        json["author"]["name"],
        "Quiz Complete | Type `!quiz` for another one!"
    );
}

#[test]
fn final_embed_reports_accuracy_best_streak_and_duration() {
    let mut record = ScoreRecord::default();
    record.apply_correct();
    record.apply_correct();
    record.apply_incorrect();

    let standings = vec![entry(7, record, 1)];
    let json = to_json(&ui::final_embed(&standings, 3, None, "6th."));
    let description = json["description"].as_str().unwrap();
    assert!(description.contains("#1 | <@7> | 2/3"));
    assert!(description.contains("best x2"));
    assert_eq!(json["footer"]["text"], "Lasted 3 rounds.");
}

#[test]
fn final_embed_without_participants_has_no_winner_line() {
    let json = to_json(&ui::final_embed(&[], 2, None, "6th."));
    let description = json["description"].as_str().unwrap();
    assert!(description.contains("without a winner"));
    assert!(json.get("thumbnail").is_none() || json["thumbnail"].is_null());
}

#[test]
fn lobby_embed_announces_the_round_count() {
    let json = to_json(&ui::lobby_embed(7));
    let footer = json["footer"]["text"].as_str().unwrap();
    assert!(footer.contains("7 questions"));
}

#[test]
fn reveal_standings_are_cut_to_ten_after_ranking() {
    let standings: Vec<StandingsEntry> = (1..=12)
        .map(|i| entry_with_score(i, 2000 - i as i64, i as usize))
        .collect();
    let json = to_json(&ui::reveal_embed(
        Choice::B,
        "serenity",
        &[],
        &[],
        &standings,
        4,
    ));
    let field = json["fields"][0]["value"].as_str().unwrap();
    assert_eq!(field.lines().count(), 10);
    assert!(field.contains("#10 |"));
    assert!(!field.contains("#11 |"));
    assert!(!field.contains("#12 |"));
}

#[test]
fn reveal_shows_streak_flames_and_one_round_of_smoke() {
    let mut hot = ScoreRecord::default();
    hot.apply_correct();
    hot.apply_correct();
    hot.apply_correct();

    let mut smoked = ScoreRecord::default();
    smoked.apply_correct();
    smoked.apply_correct();
    smoked.apply_incorrect();

    let standings = vec![entry(1, hot, 1), entry(2, smoked, 2)];
    let json = to_json(&ui::reveal_embed(
        Choice::A,
        "serenity",
        &[UserId::new(1)],
        &[UserId::new(2)],
        &standings,
        1,
    ));
    let field = json["fields"][0]["value"].as_str().unwrap();
    assert!(field.contains("\u{1F525} x3"));
    assert!(field.contains("\u{1F4A8}"));

    let description = json["description"].as_str().unwrap();
    assert!(description.contains("<@1> | Correct!"));
    assert!(description.contains("<@2> | Incorrect..."));
}

#[test]
fn reveal_with_no_answers_uses_the_fallback_lines() {
    let json = to_json(&ui::reveal_embed(Choice::D, "serenity", &[], &[], &[], 0));
    let description = json["description"].as_str().unwrap();
    assert!(description.contains("no-one got it right"));
    assert!(description.contains("No Incorrect Answers."));
    assert_eq!(json["fields"][0]["value"], "No scores yet.");
}
