use super::AppState;
use crate::types::MetadataParams;
use axum::{
    extract::{Query, State},
    Json,
};
use metagen::{generate_metadata, ExtractionRequest};
use serde_json::{json, Value};
use std::path::Path;
use tracing::{info, warn};

/// The handler for the `/metadata` endpoint.
///
/// Runs the extractor and returns the generated document. Failures are
/// reported as `{"error": "..."}` with a 200 status, so callers must inspect
/// the body.
pub async fn metadata_handler(
    State(app_state): State<AppState>,
    Query(params): Query<MetadataParams>,
) -> Json<Value> {
    info!(
        url = %params.url,
        threshold = params.threshold,
        ignore_classifiers = params.ignore_classifiers,
        format = %params.format,
        "Received metadata request."
    );

    let request = ExtractionRequest::from(params);
    let output_dir = Path::new(&app_state.config.output_dir);
    match generate_metadata(app_state.extractor.as_ref(), output_dir, &request).await {
        Ok(document) => Json(document),
        Err(e) => {
            warn!(url = %request.repo_url, error = %e, "Metadata extraction failed.");
            Json(json!({ "error": e.to_string() }))
        }
    }
}
