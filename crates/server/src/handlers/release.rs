use super::{AppError, AppState};
use axum::{extract::State, Json};
use metagen_github::RepositorySlug;
use tracing::info;

/// The handler for the `/latest_release` endpoint.
///
/// Responds with a JSON string: the tag name, `"No releases"`, or
/// `"Error {status}: {message}"` when the releases API refuses. Only a failed
/// request (or an unusable configured URL) becomes an HTTP error.
pub async fn latest_release_handler(
    State(app_state): State<AppState>,
) -> Result<Json<String>, AppError> {
    let slug = RepositorySlug::from_url(&app_state.config.project_repository)?;
    info!(repository = %slug, "Looking up latest release.");

    let release = app_state.releases.latest_release(&slug).await?;
    Ok(Json(release.to_string()))
}
