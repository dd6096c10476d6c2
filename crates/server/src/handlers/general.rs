//! # General Route Handlers
//!
//! The root banner, the health check and the extraction tool version.

use super::AppState;
use crate::types::VersionResponse;
use axum::{extract::State, Json};

/// The handler for the root (`/`) endpoint.
pub async fn root() -> &'static str {
    "metagen server is running."
}

/// The handler for the health check (`/health`) endpoint.
pub async fn health_check() -> &'static str {
    "OK"
}

/// The handler for the `/version` endpoint.
pub async fn version_handler(State(app_state): State<AppState>) -> Json<VersionResponse> {
    Json(VersionResponse {
        somef_version: app_state.extractor_version.to_string(),
    })
}
