use axum::routing::get;
use axum::Router;

use crate::handlers::status;
use crate::state::AppState;

/// Mount health check routes (intended for root-level, NOT under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(status::health))
}
