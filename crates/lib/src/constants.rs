//! # Shared Constants
//!
//! Constants shared by the extraction pipeline and the server. Keeping the
//! file names here avoids drift between the code that writes the outputs and
//! the code that reads them back.

/// The directory that holds extraction outputs when none is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "generated-files";

/// The file name of the native metadata document.
pub const METADATA_FILE_NAME: &str = "metadata.json";

/// The file name of the codemeta document.
pub const CODEMETA_FILE_NAME: &str = "codemeta.json";

/// The confidence threshold used when a request does not provide one.
pub const DEFAULT_THRESHOLD: f32 = 0.8;

/// The command used to invoke the extraction tool.
pub const DEFAULT_EXTRACTOR_COMMAND: &str = "somef";

/// Prefix of the per-request directories created under the output directory.
pub const WORKSPACE_PREFIX: &str = "request-";
