pub const GAME_TYPES_URL: &str = "/game-types";
pub const COUPLES_URL: &str = "/couples";
pub const PARTIES_URL: &str = "/parties";
pub const STATISTICS_URL: &str = "/statistics";

pub fn partie_url(partie_id: i64) -> String {
    format!("/parties/{partie_id}")
}

pub fn answer_url(partie_id: i64, question_number: i64) -> String {
    format!("/parties/{partie_id}/questions/{question_number}/answer")
}

pub fn correction_url(partie_id: i64, question_number: i64) -> String {
    format!("/parties/{partie_id}/questions/{question_number}/correction")
}

pub fn complete_url(partie_id: i64) -> String {
    format!("/parties/{partie_id}/complete")
}

pub fn abandon_url(partie_id: i64) -> String {
    format!("/parties/{partie_id}/abandon")
}

/// Token splitting a seed question text into a forced-choice pair.
pub const OPTION_SEPARATOR: &str = " || ";
