pub mod db;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod names;
pub mod rejections;
pub mod seed;

use axum::Router;

#[derive(Clone)]
pub struct AppState {
    pub db: db::Db,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::catalog::routes())
        .merge(handlers::couple::routes())
        .merge(handlers::partie::routes())
        .merge(handlers::stats::routes())
        .with_state(state)
}
