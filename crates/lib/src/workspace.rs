//! # Extraction Workspace
//!
//! Every extraction run gets its own directory under the configured output
//! directory. Concurrent runs therefore never write to, or read back, each
//! other's files. The directory is removed when the workspace is dropped.

use crate::{
    constants::WORKSPACE_PREFIX,
    errors::ExtractionError,
    types::{OutputFormat, OutputPaths},
};
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;
use tracing::debug;

/// A request-scoped directory holding one pair of output files.
#[derive(Debug)]
pub struct ExtractionWorkspace {
    // Removed on drop.
    _dir: TempDir,
    paths: OutputPaths,
}

impl ExtractionWorkspace {
    /// Creates `output_dir` if needed and a fresh workspace inside it.
    pub async fn create(output_dir: &Path) -> Result<Self, ExtractionError> {
        tokio::fs::create_dir_all(output_dir).await?;
        let parent = output_dir.to_path_buf();
        let dir = tokio::task::spawn_blocking(move || {
            tempfile::Builder::new()
                .prefix(WORKSPACE_PREFIX)
                .tempdir_in(parent)
        })
        .await
        .map_err(std::io::Error::other)??;
        let paths = OutputPaths::in_dir(dir.path());
        debug!(path = ?dir.path(), "Created extraction workspace.");
        Ok(Self { _dir: dir, paths })
    }

    pub fn paths(&self) -> &OutputPaths {
        &self.paths
    }

    /// Reads and parses the document written for `format`.
    pub async fn read_document(&self, format: OutputFormat) -> Result<Value, ExtractionError> {
        let bytes = tokio::fs::read(self.paths.for_format(format)).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
