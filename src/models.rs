//! Catalog definition types, deserialized from the seed JSON file.

use serde::Deserialize;

use crate::names;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDef {
    pub game_types: Vec<GameTypeDef>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameTypeDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    #[serde(default = "default_duration_min")]
    pub duration_min: i64,
    #[serde(default = "default_duration_max")]
    pub duration_max: i64,
    #[serde(default)]
    pub needs_correction: bool,
    pub min_questions: i64,
    pub max_questions: i64,
    #[serde(default)]
    pub sub_quizzes: Vec<SubQuizDef>,
    #[serde(default)]
    pub questions: Vec<QuestionDef>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubQuizDef {
    pub id: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    pub max_questions: i64,
    #[serde(default)]
    pub questions: Vec<QuestionDef>,
}

/// A question is either a bare text line or a detailed entry. A text
/// containing the option separator is split into a forced-choice pair.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum QuestionDef {
    Text(String),
    Detailed {
        text: String,
        #[serde(default = "default_points")]
        points: i64,
        #[serde(default)]
        difficulty: Option<String>,
        #[serde(default)]
        category: Option<String>,
    },
}

impl QuestionDef {
    pub fn points(&self) -> i64 {
        match self {
            QuestionDef::Text(_) => default_points(),
            QuestionDef::Detailed { points, .. } => *points,
        }
    }

    pub fn difficulty(&self) -> Option<&str> {
        match self {
            QuestionDef::Text(_) => None,
            QuestionDef::Detailed { difficulty, .. } => difficulty.as_deref(),
        }
    }

    pub fn category(&self) -> Option<&str> {
        match self {
            QuestionDef::Text(_) => None,
            QuestionDef::Detailed { category, .. } => category.as_deref(),
        }
    }

    /// Returns `(text, option_a, option_b)`, splitting forced-choice texts
    /// on the option separator token.
    pub fn split_text(&self) -> (String, Option<String>, Option<String>) {
        let raw = match self {
            QuestionDef::Text(text) => text,
            QuestionDef::Detailed { text, .. } => text,
        };

        match raw.split_once(names::OPTION_SEPARATOR) {
            Some((a, b)) => (
                raw.clone(),
                Some(a.trim().to_string()),
                Some(b.trim().to_string()),
            ),
            None => (raw.clone(), None, None),
        }
    }
}

fn default_difficulty() -> String {
    "facile".to_string()
}

fn default_duration_min() -> i64 {
    5
}

fn default_duration_max() -> i64 {
    15
}

fn default_points() -> i64 {
    1
}
