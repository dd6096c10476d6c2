use thiserror::Error;

/// Errors raised while running an extraction and reading its output back.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Invalid repository URL '{0}'")]
    InvalidUrl(String),
    #[error("Failed to launch the extraction tool '{command}': {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },
    /// The extraction tool reported a failure. The message is surfaced verbatim.
    #[error("{0}")]
    Extractor(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed extraction output: {0}")]
    Json(#[from] serde_json::Error),
}
