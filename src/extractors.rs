use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::{db::models::Partner, rejections::AppError, AppState};

/// Guard extractor that resolves the bearer token to a partner identity.
/// Carries the authenticated partner (and their couple) for use in handlers.
pub struct AuthGuard(pub Partner);

impl FromRequestParts<AppState> for AuthGuard {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(AppError::Unauthorized)?;

        match state.db.partner_by_token(token).await? {
            Some(partner) => Ok(AuthGuard(partner)),
            None => Err(AppError::Unauthorized),
        }
    }
}
