//! # API Types
//!
//! Request and response payloads shared by the handlers.

use metagen::{constants::DEFAULT_THRESHOLD, ExtractionRequest, OutputFormat};
use serde::{Deserialize, Serialize};

/// The response body for the `/version` endpoint.
#[derive(Serialize, Deserialize, Debug)]
pub struct VersionResponse {
    pub somef_version: String,
}

/// Query parameters for the `/metadata` endpoint.
#[derive(Deserialize, Debug)]
pub struct MetadataParams {
    /// The repository to analyze.
    pub url: String,
    #[serde(default = "default_threshold")]
    pub threshold: f32,
    /// The web client sends this in camelCase.
    #[serde(default, alias = "ignoreClassifiers")]
    pub ignore_classifiers: bool,
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_threshold() -> f32 {
    DEFAULT_THRESHOLD
}

impl From<MetadataParams> for ExtractionRequest {
    fn from(params: MetadataParams) -> Self {
        ExtractionRequest::new(params.url)
            .threshold(params.threshold)
            .ignore_classifiers(params.ignore_classifiers)
            .format(params.format)
    }
}
