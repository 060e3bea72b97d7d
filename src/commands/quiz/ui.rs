//! Embed construction for every phase of a quiz session. The session edits
//! one display message in place from lobby to final scores.

use super::session::Choice;
use super::source::Question;
use super::standings::StandingsEntry;
use crate::constants::{
    ANSWER_WINDOW_SECS, CORRECT_POINTS, INCORRECT_PENALTY, QUIZ_COLOR, STANDINGS_LIMIT,
};
use serenity::builder::{CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter};
use serenity::model::id::UserId;

/// Lobby announcement shown during the warmup delay.
pub fn lobby_embed(rounds: usize) -> CreateEmbed {
    CreateEmbed::new()
        .title("A Quiz is about to start!")
        .color(QUIZ_COLOR)
        .description(format!(
            "- A series of multiple choice questions will be displayed here.\n\
             - Add one of the **A, B, C or D** reactions to answer within the time limit.\n\
             - Correct answers get **+{CORRECT_POINTS}** points (with a bonus for streaks), \
             but incorrect ones get **-{INCORRECT_PENALTY}**.\n\
             Good Luck!"
        ))
        .footer(CreateEmbedFooter::new(format!(
            "This Quiz will have {rounds} questions | Sourced from the OpenTDB API"
        )))
}

/// One question with its four shuffled options as lettered fields.
pub fn question_embed(
    question: &Question,
    options: &[&str; 4],
    round_index: usize,
    total_rounds: usize,
) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(question.text.clone())
        .color(QUIZ_COLOR)
        .author(CreateEmbedAuthor::new(format!(
            "{} | {}",
            question.difficulty.label(),
            question.category
        )))
        .footer(CreateEmbedFooter::new(format!(
            "Question {} of {} | {} seconds per question",
            round_index + 1,
            total_rounds,
            ANSWER_WINDOW_SECS
        )));
    for (choice, option) in Choice::ALL.iter().zip(options) {
        embed = embed.field(choice.emoji(), (*option).to_string(), false);
    }
    embed
}

pub fn countdown_content(seconds_left: u64) -> String {
    format!(":alarm_clock: You have {seconds_left} Seconds to answer this question")
}

pub fn times_up_content() -> String {
    "\n:alarm_clock: Time's up!".to_string()
}

/// Answer reveal with per-round results and the current standings.
pub fn reveal_embed(
    correct_choice: Choice,
    correct_answer: &str,
    correct_users: &[UserId],
    incorrect_users: &[UserId],
    standings: &[StandingsEntry],
    rounds_remaining: usize,
) -> CreateEmbed {
    let correct_text = if correct_users.is_empty() {
        "Looks like no-one got it right this round!".to_string()
    } else {
        format!("{}| Correct!", mention_list(correct_users))
    };
    let incorrect_text = if incorrect_users.is_empty() {
        "No Incorrect Answers.".to_string()
    } else {
        format!("{}| Incorrect...", mention_list(incorrect_users))
    };

    CreateEmbed::new()
        .title(format!(
            "Answer | **{} {}**",
            correct_choice.emoji(),
            correct_answer
        ))
        .color(QUIZ_COLOR)
        .description(format!("{correct_text}\n{incorrect_text}"))
        .field(
            "Current Standings:",
            standings_lines(standings),
            false,
        )
        .footer(CreateEmbedFooter::new(format!(
            "{rounds_remaining} questions remain | Advancing in 5 seconds"
        )))
}

/// Final scores: full ranking with accuracy and best streak per entry, and
/// the winner's portrait when one could be resolved.
pub fn final_embed(
    standings: &[StandingsEntry],
    rounds: usize,
    winner_portrait: Option<String>,
    prefix: &str,
) -> CreateEmbed {
    let description = if standings.is_empty() {
        "No-one answered a single question. The quiz ends without a winner.".to_string()
    } else {
        standings
            .iter()
            .map(|entry| {
                format!(
                    "#{} | <@{}> | {}/{} | \u{1F525} best x{} | **{}**",
                    entry.rank,
                    entry.user,
                    entry.record.correct,
                    entry.record.answered,
                    entry.record.max_streak,
                    entry.record.score
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let mut embed = CreateEmbed::new()
        .title("Final Scores")
        .color(QUIZ_COLOR)
        .description(description)
        .author(CreateEmbedAuthor::new(format!(
            "Quiz Complete | Type `{prefix}quiz` for another one!"
        )))
        .footer(CreateEmbedFooter::new(format!("Lasted {rounds} rounds.")));
    if let Some(url) = winner_portrait {
        embed = embed.thumbnail(url);
    }
    embed
}

/// Top-of-the-table lines for the per-round reveal. Ranks are assigned over
/// the full field before the cut to the display limit.
fn standings_lines(standings: &[StandingsEntry]) -> String {
    if standings.is_empty() {
        return "No scores yet.".to_string();
    }
    standings
        .iter()
        .take(STANDINGS_LIMIT)
        .map(|entry| {
            format!(
                "#{} | <@{}> | {}{}",
                entry.rank,
                entry.user,
                entry.record.score,
                streak_flair(entry)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A live streak gets a flame; a streak broken last round gets one round of
/// smoke.
fn streak_flair(entry: &StandingsEntry) -> String {
    if entry.record.current_streak > 1 {
        format!(" | \u{1F525} x{}", entry.record.current_streak)
    } else if entry.record.streak_just_reset {
        " | \u{1F4A8}".to_string()
    } else {
        String::new()
    }
}

fn mention_list(users: &[UserId]) -> String {
    users
        .iter()
        .map(|id| format!("<@{id}> "))
        .collect::<String>()
}
