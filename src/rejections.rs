use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::error::EngineError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(&'static str),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Engine(engine) => match engine {
                EngineError::NotFound => (StatusCode::NOT_FOUND, "not_found"),
                EngineError::InvalidGameType => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "invalid_game_type")
                }
                EngineError::InsufficientQuestions { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "insufficient_questions")
                }
                EngineError::SessionNotActive => (StatusCode::CONFLICT, "session_not_active"),
                EngineError::AlreadyAnswered => (StatusCode::CONFLICT, "already_answered"),
                EngineError::AlreadyCorrected => (StatusCode::CONFLICT, "already_corrected"),
                EngineError::NotYetAnswerable => (StatusCode::CONFLICT, "not_yet_answerable"),
                EngineError::Forbidden => (StatusCode::FORBIDDEN, "forbidden"),
                EngineError::Storage(e) => {
                    tracing::error!("storage failure: {e}");
                    (StatusCode::SERVICE_UNAVAILABLE, "storage_unavailable")
                }
            },
        };

        let body = Json(json!({
            "error": code,
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}
