use crate::AppState;
use axum::Router;

pub mod health;
pub mod workflow;

/// Merge all routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(workflow::routes())
}
