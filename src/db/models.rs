// Database model structs and domain enums

use serde::{Deserialize, Serialize};

/// Session status. `Completed` and `Abandoned` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum PartieStatus {
    InProgress,
    Completed,
    Abandoned,
}

/// Correctness judgment on a guess. Tri-state in storage: a question with
/// no verdict yet carries `Option::<Verdict>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum Verdict {
    Correct,
    Incorrect,
}

/// Which of the two answer slots an actor writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Subject,
    Guesser,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GameType {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub difficulty: String,
    pub duration_min: i64,
    pub duration_max: i64,
    pub needs_correction: bool,
    pub min_questions: i64,
    pub max_questions: i64,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SubQuiz {
    pub id: String,
    pub game_type_id: String,
    pub difficulty: String,
    pub max_questions: i64,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    pub game_type_id: String,
    pub sub_quiz_id: Option<String>,
    pub text: String,
    pub option_a: Option<String>,
    pub option_b: Option<String>,
    pub points: i64,
    pub difficulty: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Partner {
    pub id: i64,
    pub couple_id: i64,
    pub display_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPartner {
    pub id: i64,
    pub display_name: String,
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoupleCreated {
    pub couple_id: i64,
    pub partners: Vec<NewPartner>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Partie {
    pub id: i64,
    pub couple_id: i64,
    pub game_type_id: String,
    pub sub_quiz_id: Option<String>,
    pub subject_partner_id: i64,
    pub guesser_partner_id: i64,
    pub question_count: i64,
    pub status: PartieStatus,
    pub score: Option<i64>,
    pub started_at: String,
    pub ended_at: Option<String>,
}

/// One entry of a couple's session history, joined with the game type name.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PartieSummary {
    pub id: i64,
    pub game_type_id: String,
    pub game_type_name: String,
    pub sub_quiz_id: Option<String>,
    pub question_count: i64,
    pub status: PartieStatus,
    pub score: Option<i64>,
    pub started_at: String,
    pub ended_at: Option<String>,
}

/// Per-(session, question) answer state, joined with the catalog question.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PartieQuestion {
    pub question_number: i64,
    pub question_id: i64,
    pub text: String,
    pub option_a: Option<String>,
    pub option_b: Option<String>,
    pub points: i64,
    pub subject_answer: Option<String>,
    pub guesser_answer: Option<String>,
    pub verdict: Option<Verdict>,
    pub corrected_by: Option<i64>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GameTypeBreakdown {
    pub game_type_id: String,
    pub game_type_name: String,
    pub sessions_completed: i64,
    pub total_score: i64,
    pub best_score: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoupleStatistics {
    pub sessions_completed: i64,
    pub total_score: i64,
    pub per_game_type: Vec<GameTypeBreakdown>,
}
