//! Process and backend health.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use heritage_db::storage::{BackendKind, StorageBackend};
use serde::Serialize;

use crate::state::AppState;

const SERVER_NAME: &str = "Living Heritage Content API";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatus {
    pub enabled: bool,
    pub entries: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub server: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    /// Backend currently serving requests.
    pub mode: BackendKind,
    /// Relational mode was configured but abandoned.
    pub degraded: bool,
    /// Omitted when no database is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_connected: Option<bool>,
    pub cache: CacheStatus,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub mode: BackendKind,
}

/// Ping the database if one is configured.
///
/// A degraded store never goes back to its pool, so it is reported as
/// disconnected without waiting on an acquire timeout.
async fn database_connected(state: &AppState) -> Option<bool> {
    let primary = state.store.primary()?;
    if state.store.is_degraded() {
        return Some(false);
    }
    Some(heritage_db::health_check(primary.pool()).await.is_ok())
}

/// GET /api/status
pub async fn status(State(state): State<AppState>) -> impl IntoResponse {
    Json(StatusResponse {
        server: SERVER_NAME,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now().to_rfc3339(),
        mode: state.store.kind(),
        degraded: state.store.is_degraded(),
        database_connected: database_connected(&state).await,
        cache: CacheStatus {
            enabled: state.cache.is_enabled(),
            entries: state.cache.len().await,
        },
    })
}

/// GET /api/health and GET /health
///
/// Unhealthy (503) only when the relational backend is active and fails a
/// ping. Flat-file mode, including after a degrade, reports healthy.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let mode = state.store.kind();
    let healthy = match mode {
        BackendKind::Relational => database_connected(&state).await.unwrap_or(false),
        BackendKind::FlatFile => true,
    };

    if healthy {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy",
                mode,
            }),
        )
    } else {
        tracing::warn!("Health check failed: database unreachable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unhealthy",
                mode,
            }),
        )
    }
}
