use axum::{extract::State, routing::get, Json, Router};

use crate::{
    db::models::CoupleStatistics, extractors::AuthGuard, names, rejections::AppError, AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route(names::STATISTICS_URL, get(statistics))
}

async fn statistics(
    AuthGuard(actor): AuthGuard,
    State(state): State<AppState>,
) -> Result<Json<CoupleStatistics>, AppError> {
    let stats = state.db.compute_statistics(actor.couple_id).await?;
    Ok(Json(stats))
}
