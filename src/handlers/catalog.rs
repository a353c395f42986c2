use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::{
    db::models::{GameType, SubQuiz},
    extractors::AuthGuard,
    names,
    rejections::AppError,
    AppState,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameTypeEntry {
    #[serde(flatten)]
    pub game_type: GameType,
    pub sub_quizzes: Vec<SubQuiz>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route(names::GAME_TYPES_URL, get(list_game_types))
}

async fn list_game_types(
    AuthGuard(_actor): AuthGuard,
    State(state): State<AppState>,
) -> Result<Json<Vec<GameTypeEntry>>, AppError> {
    let game_types = state.db.list_game_types().await?;

    let mut entries = Vec::with_capacity(game_types.len());
    for game_type in game_types {
        let sub_quizzes = state.db.sub_quizzes(&game_type.id).await?;
        entries.push(GameTypeEntry {
            game_type,
            sub_quizzes,
        });
    }

    Ok(Json(entries))
}
