//! # Releases Client
//!
//! Looks up `/repos/{owner}/{repo}/releases/latest`. A single attempt is made
//! with the HTTP client's default timeout; non-200 answers are turned into a
//! `LatestRelease::UpstreamError` while transport failures are returned as
//! errors.

use crate::types::{LatestRelease, ReleaseError, RepositorySlug};
use reqwest::{header::ACCEPT, Client as ReqwestClient, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// The public GitHub REST API.
pub const GITHUB_API_URL: &str = "https://api.github.com";

// GitHub rejects API requests that do not carry a User-Agent.
const USER_AGENT: &str = concat!("metagen/", env!("CARGO_PKG_VERSION"));
const GITHUB_JSON: &str = "application/vnd.github+json";

#[derive(Clone, Debug)]
pub struct ReleasesClient {
    client: ReqwestClient,
    api_url: String,
}

impl ReleasesClient {
    /// Creates a client for the API rooted at `api_url`.
    pub fn new(api_url: impl Into<String>) -> Result<Self, ReleaseError> {
        let client = ReqwestClient::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(ReleaseError::ClientBuild)?;
        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// The endpoint queried for `slug`.
    pub fn latest_release_url(&self, slug: &RepositorySlug) -> String {
        format!(
            "{}/repos/{}/{}/releases/latest",
            self.api_url, slug.owner, slug.repo
        )
    }

    /// Fetches the latest release of `slug`.
    #[instrument(skip(self), fields(repository = %slug))]
    pub async fn latest_release(
        &self,
        slug: &RepositorySlug,
    ) -> Result<LatestRelease, ReleaseError> {
        let response = self
            .client
            .get(self.latest_release_url(slug))
            .header(ACCEPT, GITHUB_JSON)
            .send()
            .await
            .map_err(ReleaseError::Request)?;

        let status = response.status();
        let body = response.text().await.map_err(ReleaseError::Request)?;

        if status == StatusCode::OK {
            let json: Value = serde_json::from_str(&body)?;
            debug!(status = status.as_u16(), body = %json, "Received latest release.");
            return Ok(json
                .get("tag_name")
                .and_then(Value::as_str)
                .map(|tag| LatestRelease::Tag(tag.to_string()))
                .unwrap_or(LatestRelease::NoReleases));
        }

        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|json| json.get("message")?.as_str().map(str::to_string))
            .unwrap_or_else(|| "Unknown error".to_string());
        warn!(status = status.as_u16(), %message, "Releases API returned an error.");

        Ok(LatestRelease::UpstreamError {
            status: status.as_u16(),
            message,
        })
    }
}
