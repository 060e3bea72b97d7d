//! Trivia question supply. The engine talks to a [`QuestionSource`] trait;
//! the production implementation queries the OpenTDB API.

use super::QuizError;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Title-case label for display in the question header.
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One multiple-choice question, immutable once fetched.
#[derive(Debug, Clone)]
pub struct Question {
    pub text: String,
    pub correct_answer: String,
    pub incorrect_answers: [String; 3],
    pub category: String,
    pub difficulty: Difficulty,
}

/// Supplies `count` questions of the given difficulty, or fails. The engine
/// never compensates for a short batch and never retries.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn fetch(&self, difficulty: Difficulty, count: usize) -> Result<Vec<Question>, QuizError>;
}

// There is a disproportionately large number of questions in the
// "Entertainment: Video Games" category; that skew comes with the API.
const OPENTDB_URL: &str = "https://opentdb.com/api.php";

#[derive(Deserialize)]
struct ApiResponse {
    response_code: u8,
    results: Vec<ApiQuestion>,
}

#[derive(Deserialize)]
struct ApiQuestion {
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
    category: String,
}

/// OpenTDB-backed question source. Payload fields are requested in base64
/// so no HTML entity unescaping is needed on the way out.
pub struct OpenTdbSource {
    client: reqwest::Client,
}

impl OpenTdbSource {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for OpenTdbSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuestionSource for OpenTdbSource {
    async fn fetch(&self, difficulty: Difficulty, count: usize) -> Result<Vec<Question>, QuizError> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let amount = count.to_string();
        let response: ApiResponse = self
            .client
            .get(OPENTDB_URL)
            .query(&[
                ("amount", amount.as_str()),
                ("type", "multiple"),
                ("difficulty", difficulty.as_str()),
                ("encode", "base64"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if response.response_code != 0 {
            return Err(QuizError::SourcePayload(format!(
                "OpenTDB response code {}",
                response.response_code
            )));
        }
        if response.results.len() != count {
            return Err(QuizError::SourcePayload(format!(
                "asked for {count} {difficulty} questions, got {}",
                response.results.len()
            )));
        }

        response
            .results
            .into_iter()
            .map(|raw| decode_question(raw, difficulty))
            .collect()
    }
}

fn decode_question(raw: ApiQuestion, difficulty: Difficulty) -> Result<Question, QuizError> {
    let incorrect: Vec<String> = raw
        .incorrect_answers
        .iter()
        .map(|s| decode_field(s))
        .collect::<Result<_, _>>()?;
    let incorrect_answers: [String; 3] = incorrect
        .try_into()
        .map_err(|v: Vec<String>| {
            QuizError::SourcePayload(format!("expected 3 incorrect answers, got {}", v.len()))
        })?;

    Ok(Question {
        text: decode_field(&raw.question)?,
        correct_answer: decode_field(&raw.correct_answer)?,
        incorrect_answers,
        category: decode_field(&raw.category)?,
        difficulty,
    })
}

fn decode_field(encoded: &str) -> Result<String, QuizError> {
    let bytes = BASE64
        .decode(encoded)
        .map_err(|e| QuizError::SourcePayload(format!("invalid base64 in payload: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| QuizError::SourcePayload(format!("non-utf8 text in payload: {e}")))
}
