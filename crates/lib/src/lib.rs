//! # Repository Metadata Extraction
//!
//! This crate wraps an external metadata-extraction tool behind the
//! `MetadataExtractor` trait and provides the pipeline that turns its
//! file-based output into a JSON document: prepare a private workspace, run
//! the extractor, read the requested document back.

pub mod constants;
pub mod errors;
pub mod extractor;
pub mod types;
pub mod workspace;

pub use errors::ExtractionError;
pub use extractor::{MetadataExtractor, SomefCli};
pub use types::{ExtractionRequest, OutputFormat, OutputPaths};
pub use workspace::ExtractionWorkspace;

use serde_json::Value;
use std::path::Path;
use tracing::{info, instrument};
use url::Url;

/// Runs `extractor` for `request` and returns the requested document.
///
/// The outputs are written to a fresh directory under `output_dir`, which is
/// created if missing. The directory is removed before this function returns,
/// whether the extraction succeeded or not.
#[instrument(skip(extractor, output_dir), fields(url = %request.repo_url, format = %request.format))]
pub async fn generate_metadata(
    extractor: &dyn MetadataExtractor,
    output_dir: &Path,
    request: &ExtractionRequest,
) -> Result<Value, ExtractionError> {
    validate_repo_url(&request.repo_url)?;

    let workspace = ExtractionWorkspace::create(output_dir).await?;
    extractor.extract(request, workspace.paths()).await?;
    let document = workspace.read_document(request.format).await?;

    info!("Metadata extraction finished.");
    Ok(document)
}

/// Accepts only absolute `http`/`https` URLs with a host.
pub fn validate_repo_url(repo_url: &str) -> Result<Url, ExtractionError> {
    let invalid = || ExtractionError::InvalidUrl(repo_url.to_string());
    let url = Url::parse(repo_url).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(invalid());
    }
    Ok(url)
}
