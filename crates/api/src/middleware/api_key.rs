//! Admin gate for write and unfiltered-read endpoints.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use heritage_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the admin secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Proof that the request carried the configured admin API key.
///
/// Extracted from request parts, so it is checked before the body is read
/// and before any handler code touches storage.
///
/// ```ignore
/// async fn handler(_admin: RequireApiKey, State(state): State<AppState>) { ... }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequireApiKey;

impl FromRequestParts<AppState> for RequireApiKey {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let provided = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Missing X-API-Key header".into()))
            })?;

        if provided != state.config.admin_api_key {
            tracing::warn!("Rejected admin request with invalid API key");
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid API key".into(),
            )));
        }

        Ok(RequireApiKey)
    }
}
