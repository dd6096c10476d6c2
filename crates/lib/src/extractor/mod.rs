pub mod somef;

use crate::{
    errors::ExtractionError,
    types::{ExtractionRequest, OutputPaths},
};
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

pub use somef::{parse_version_output, SomefCli};

/// A trait for tools that inspect a source repository and describe it.
///
/// Implementations communicate their results through files: `extract` is
/// expected to write both documents named by `OutputPaths` before returning.
#[async_trait]
pub trait MetadataExtractor: Send + Sync + Debug + DynClone {
    /// Reports the version identifier of the underlying tool.
    async fn version(&self) -> Result<String, ExtractionError>;

    /// Runs an extraction for `request`, writing the outputs to `paths`.
    async fn extract(
        &self,
        request: &ExtractionRequest,
        paths: &OutputPaths,
    ) -> Result<(), ExtractionError>;
}

dyn_clone::clone_trait_object!(MetadataExtractor);
