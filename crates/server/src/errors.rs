use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use metagen_github::ReleaseError;
use serde_json::json;
use tracing::error;

/// A custom error type for the server application.
///
/// Only handlers that report failures through the HTTP status use it;
/// `/metadata` reports extraction failures in a 200 body instead.
pub enum AppError {
    /// Errors originating from the releases lookup.
    Release(ReleaseError),
}

/// Conversion from `ReleaseError` to `AppError`.
impl From<ReleaseError> for AppError {
    fn from(err: ReleaseError) -> Self {
        AppError::Release(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::Release(err) => {
                // Log the original error for debugging purposes
                error!("ReleaseError: {:?}", err);
                match err {
                    ReleaseError::InvalidRepositoryUrl(url) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Configured project repository is not a repository URL: {url}"),
                    ),
                    ReleaseError::ClientBuild(_)
                    | ReleaseError::Request(_)
                    | ReleaseError::Deserialization(_) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "An internal server error occurred.".to_string(),
                    ),
                }
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
