use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::Deserialize;

use crate::{db::models::CoupleCreated, names, rejections::AppError, AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LinkCoupleBody {
    partner_a: String,
    partner_b: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route(names::COUPLES_URL, post(link_couple))
}

/// Link two partners and hand back an access token for each. The tokens are
/// shown once; there is no recovery surface.
async fn link_couple(
    State(state): State<AppState>,
    Json(body): Json<LinkCoupleBody>,
) -> Result<(StatusCode, Json<CoupleCreated>), AppError> {
    let partner_a = body.partner_a.trim();
    let partner_b = body.partner_b.trim();
    if partner_a.is_empty() || partner_b.is_empty() {
        return Err(AppError::BadRequest("both partner names are required"));
    }

    let created = state.db.create_couple(partner_a, partner_b).await?;

    Ok((StatusCode::CREATED, Json(created)))
}
