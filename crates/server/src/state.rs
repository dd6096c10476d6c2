//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup. Everything in it is immutable once built; the
//! extractor version is resolved here so that `/version` never has to fail.

use crate::config::AppConfig;
use metagen::{MetadataExtractor, SomefCli};
use metagen_github::ReleasesClient;
use std::sync::Arc;
use tracing::info;

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Arc<AppConfig>,
    /// The tool that produces repository metadata.
    pub extractor: Box<dyn MetadataExtractor>,
    /// The version reported by the extractor at startup.
    pub extractor_version: Arc<str>,
    /// The client for the GitHub releases API.
    pub releases: ReleasesClient,
}

/// Builds the shared application state, backed by the `somef` command.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let extractor = SomefCli::new(config.extractor.command.clone())
        .with_args(config.extractor.args.clone());
    build_app_state_with_extractor(config, Box::new(extractor)).await
}

/// Builds the shared application state around an existing extractor.
///
/// A configured `extractor.version` takes precedence; otherwise the extractor
/// is asked, and a failure to answer aborts startup.
pub async fn build_app_state_with_extractor(
    config: AppConfig,
    extractor: Box<dyn MetadataExtractor>,
) -> anyhow::Result<AppState> {
    let extractor_version = match &config.extractor.version {
        Some(version) => version.clone(),
        None => extractor.version().await.map_err(|e| {
            anyhow::anyhow!("Could not determine the extraction tool version: {e}")
        })?,
    };
    info!(version = %extractor_version, "Extraction tool is available.");

    let releases = ReleasesClient::new(config.releases_api_url.clone())?;
    info!(
        repository = %config.project_repository,
        api = %config.releases_api_url,
        "Initialized releases client."
    );

    Ok(AppState {
        config: Arc::new(config),
        extractor,
        extractor_version: Arc::from(extractor_version),
        releases,
    })
}
