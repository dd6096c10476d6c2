use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Custom error types for the releases lookup.
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Cannot derive owner and repository from '{0}'")]
    InvalidRepositoryUrl(String),
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),
    #[error("Request to the releases API failed: {0}")]
    Request(reqwest::Error),
    #[error("Failed to deserialize releases API response: {0}")]
    Deserialization(#[from] serde_json::Error),
}

/// The `owner/repo` pair identifying a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySlug {
    pub owner: String,
    pub repo: String,
}

impl RepositorySlug {
    /// Takes the last two `/`-separated segments of `url` as owner and repo,
    /// after stripping trailing slashes.
    pub fn from_url(url: &str) -> Result<Self, ReleaseError> {
        let mut segments = url.trim_end_matches('/').rsplit('/');
        match (segments.next(), segments.next()) {
            (Some(repo), Some(owner)) if !repo.is_empty() && !owner.is_empty() => Ok(Self {
                owner: owner.to_string(),
                repo: repo.to_string(),
            }),
            _ => Err(ReleaseError::InvalidRepositoryUrl(url.to_string())),
        }
    }
}

impl FromStr for RepositorySlug {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_url(s)
    }
}

impl fmt::Display for RepositorySlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// The outcome of a latest-release lookup.
///
/// Upstream HTTP errors are an outcome rather than an `Err`: they are reported
/// to the caller as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LatestRelease {
    Tag(String),
    NoReleases,
    UpstreamError { status: u16, message: String },
}

impl fmt::Display for LatestRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LatestRelease::Tag(tag) => write!(f, "{tag}"),
            LatestRelease::NoReleases => write!(f, "No releases"),
            LatestRelease::UpstreamError { status, message } => {
                write!(f, "Error {status}: {message}")
            }
        }
    }
}
