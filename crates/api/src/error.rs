use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use heritage_core::error::CoreError;
use heritage_db::error::StorageError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StorageError`] for backend
/// failures. Implements [`IntoResponse`] to produce consistent
/// `{ "error", "code" }` JSON bodies; storage driver messages are logged
/// and never returned.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let core = match self {
            AppError::Core(core) => core,
            AppError::Storage(storage) => {
                if !matches!(storage, StorageError::DuplicateSlug { .. }) {
                    tracing::error!(error = %storage, "Storage error");
                }
                CoreError::from(storage)
            }
            AppError::BadRequest(msg) => {
                return error_response(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg);
            }
        };

        let (status, code, message) = match core {
            CoreError::NotFound { entity, id } => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} with id {id} not found"),
            ),
            CoreError::SlugNotFound { entity, slug } => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} with slug '{slug}' not found"),
            ),
            CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg),
            CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg),
            CoreError::BackendUnavailable(msg) => {
                tracing::error!(error = %msg, "Backend unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SERVICE_UNAVAILABLE",
                    "Content storage is temporarily unavailable".to_string(),
                )
            }
            CoreError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        error_response(status, code, message)
    }
}

fn error_response(status: StatusCode, code: &'static str, message: String) -> Response {
    let body = json!({
        "error": message,
        "code": code,
    });
    (status, axum::Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use heritage_core::collection::Collection;
    use heritage_core::language::Language;
    use http_body_util::BodyExt;

    use super::*;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_maps_to_404() {
        let (status, body) = render(AppError::Core(CoreError::NotFound {
            entity: "Wellness tip",
            id: 9,
        }))
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["error"], "Wellness tip with id 9 not found");
    }

    #[tokio::test]
    async fn duplicate_slug_is_a_validation_error() {
        let (status, body) = render(AppError::Storage(StorageError::DuplicateSlug {
            collection: Collection::Tips,
            language: Language::Vi,
            slug: "test-tip".into(),
        }))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn io_errors_are_sanitized() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "/secret/path");
        let (status, body) = render(AppError::Storage(StorageError::Io(io))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "An internal error occurred");
    }

    #[tokio::test]
    async fn unreachable_database_is_503_without_driver_details() {
        let (status, body) =
            render(AppError::Storage(StorageError::Database(sqlx_timeout()))).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["code"], "SERVICE_UNAVAILABLE");
        assert!(!body["error"].as_str().unwrap().contains("pool"));
    }

    fn sqlx_timeout() -> sqlx::Error {
        sqlx::Error::PoolTimedOut
    }
}
