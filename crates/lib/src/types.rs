use crate::constants::{CODEMETA_FILE_NAME, DEFAULT_THRESHOLD, METADATA_FILE_NAME};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// The document an extraction request should return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The codemeta JSON-LD document.
    #[default]
    Codemeta,
    /// The extraction tool's native metadata document.
    Json,
}

impl OutputFormat {
    /// The file name the extraction tool writes this format to.
    pub fn file_name(&self) -> &'static str {
        match self {
            OutputFormat::Codemeta => CODEMETA_FILE_NAME,
            OutputFormat::Json => METADATA_FILE_NAME,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Codemeta => write!(f, "codemeta"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// The parameters of a single extraction run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionRequest {
    pub repo_url: String,
    pub threshold: f32,
    pub ignore_classifiers: bool,
    pub format: OutputFormat,
}

impl ExtractionRequest {
    /// Creates a request for `repo_url` with the default options.
    pub fn new(repo_url: impl Into<String>) -> Self {
        Self {
            repo_url: repo_url.into(),
            threshold: DEFAULT_THRESHOLD,
            ignore_classifiers: false,
            format: OutputFormat::default(),
        }
    }

    pub fn threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn ignore_classifiers(mut self, ignore_classifiers: bool) -> Self {
        self.ignore_classifiers = ignore_classifiers;
        self
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}

/// The pair of files an extraction run writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub metadata: PathBuf,
    pub codemeta: PathBuf,
}

impl OutputPaths {
    /// The standard output file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            metadata: dir.join(METADATA_FILE_NAME),
            codemeta: dir.join(CODEMETA_FILE_NAME),
        }
    }

    /// The path of the file holding `format`.
    pub fn for_format(&self, format: OutputFormat) -> &Path {
        match format {
            OutputFormat::Codemeta => &self.codemeta,
            OutputFormat::Json => &self.metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = ExtractionRequest::new("https://github.com/owner/repo");
        assert_eq!(request.threshold, 0.8);
        assert!(!request.ignore_classifiers);
        assert_eq!(request.format, OutputFormat::Codemeta);
    }

    #[test]
    fn test_output_paths_select_file_by_format() {
        let paths = OutputPaths::in_dir(Path::new("/tmp/out"));
        assert_eq!(
            paths.for_format(OutputFormat::Codemeta),
            Path::new("/tmp/out/codemeta.json")
        );
        assert_eq!(
            paths.for_format(OutputFormat::Json),
            Path::new("/tmp/out/metadata.json")
        );
    }

    #[test]
    fn test_output_format_deserializes_lowercase() {
        let format: OutputFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(format, OutputFormat::Json);
        assert!(serde_json::from_str::<OutputFormat>("\"xml\"").is_err());
    }
}
