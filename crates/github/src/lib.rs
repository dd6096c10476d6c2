//! # metagen-github: GitHub Releases Lookup
//!
//! This crate resolves the latest published release of a GitHub repository
//! through the public REST API and renders the outcome as the short status
//! string the server returns to its clients.

pub mod releases;
pub mod types;

// Re-export the main types for easy access from other crates.
pub use releases::{ReleasesClient, GITHUB_API_URL};
pub use types::{LatestRelease, ReleaseError, RepositorySlug};
