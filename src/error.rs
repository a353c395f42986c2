use thiserror::Error;

/// Engine-level failures surfaced to the presentation layer.
///
/// Every variant except [`EngineError::Storage`] is a validation failure:
/// retrying the same call will fail again. `Storage` wraps a database-layer
/// fault and is the only retry-safe kind.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("not found")]
    NotFound,

    #[error("game type is unknown or inactive")]
    InvalidGameType,

    #[error("question pool has {available} questions, {required} required")]
    InsufficientQuestions { available: i64, required: i64 },

    #[error("session is no longer active")]
    SessionNotActive,

    #[error("answer is locked by an existing verdict")]
    AlreadyAnswered,

    #[error("a verdict has already been recorded for this question")]
    AlreadyCorrected,

    #[error("both partners must answer before a verdict can be recorded")]
    NotYetAnswerable,

    #[error("operation not permitted for this actor")]
    Forbidden,

    #[error("storage unavailable: {0}")]
    Storage(#[from] sqlx::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;
