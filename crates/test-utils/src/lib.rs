use async_trait::async_trait;
use metagen::{ExtractionError, ExtractionRequest, MetadataExtractor, OutputPaths};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};
use std::time::Duration;

// --- Mock Extractor ---

/// What the mock does when asked to extract a repository.
#[derive(Clone, Debug, Default)]
pub enum MockOutcome {
    /// Writes documents naming the requested repository.
    #[default]
    Echo,
    /// Writes the given documents verbatim.
    Documents { metadata: Value, codemeta: Value },
    /// Writes the given text to both output files.
    Raw(String),
    /// Succeeds without writing any output.
    NoOutput,
    /// Writes nothing and fails with the given message.
    Fail(String),
}

/// A recorded call to `MockExtractor::extract`.
#[derive(Clone, Debug)]
pub struct ExtractionCall {
    pub request: ExtractionRequest,
    pub paths: OutputPaths,
}

#[derive(Clone, Debug)]
pub struct MockExtractor {
    version: String,
    version_error: Option<String>,
    default_outcome: Arc<Mutex<MockOutcome>>,
    outcomes: Arc<Mutex<HashMap<String, MockOutcome>>>,
    calls: Arc<Mutex<Vec<ExtractionCall>>>,
    delay: Option<Duration>,
}

impl MockExtractor {
    pub fn new(version: &str) -> Self {
        Self {
            version: version.to_string(),
            version_error: None,
            default_outcome: Arc::new(Mutex::new(MockOutcome::Echo)),
            outcomes: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            delay: None,
        }
    }

    /// Sleeps between writing the outputs and returning, to widen the window
    /// in which concurrent extractions overlap.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Makes `version` fail with `message`, as a missing tool would.
    pub fn with_version_error(mut self, message: &str) -> Self {
        self.version_error = Some(message.to_string());
        self
    }

    /// Sets the outcome for repositories without a specific one.
    pub fn set_default_outcome(&self, outcome: MockOutcome) {
        *self.default_outcome.lock().unwrap() = outcome;
    }

    /// Pre-programs the outcome for a specific repository URL.
    pub fn add_outcome(&self, repo_url: &str, outcome: MockOutcome) {
        self.outcomes
            .lock()
            .unwrap()
            .insert(repo_url.to_string(), outcome);
    }

    /// Retrieves the recorded calls for assertion.
    pub fn get_calls(&self) -> Vec<ExtractionCall> {
        self.calls.lock().unwrap().clone()
    }

    /// The codemeta document `MockOutcome::Echo` writes for `repo_url`.
    pub fn echo_codemeta(repo_url: &str) -> Value {
        json!({
            "@context": "https://w3id.org/codemeta/3.0",
            "@type": "SoftwareSourceCode",
            "codeRepository": repo_url,
        })
    }

    /// The native document `MockOutcome::Echo` writes for `repo_url`.
    pub fn echo_metadata(repo_url: &str) -> Value {
        json!({
            "code_repository": [{ "result": { "value": repo_url } }],
        })
    }
}

impl Default for MockExtractor {
    fn default() -> Self {
        Self::new("0.0.0-mock")
    }
}

#[async_trait]
impl MetadataExtractor for MockExtractor {
    async fn version(&self) -> Result<String, ExtractionError> {
        match &self.version_error {
            Some(message) => Err(ExtractionError::Extractor(message.clone())),
            None => Ok(self.version.clone()),
        }
    }

    async fn extract(
        &self,
        request: &ExtractionRequest,
        paths: &OutputPaths,
    ) -> Result<(), ExtractionError> {
        self.calls.lock().unwrap().push(ExtractionCall {
            request: request.clone(),
            paths: paths.clone(),
        });

        let outcome = self
            .outcomes
            .lock()
            .unwrap()
            .get(&request.repo_url)
            .cloned()
            .unwrap_or_else(|| self.default_outcome.lock().unwrap().clone());

        let (metadata, codemeta) = match outcome {
            MockOutcome::Echo => (
                Self::echo_metadata(&request.repo_url),
                Self::echo_codemeta(&request.repo_url),
            ),
            MockOutcome::Documents { metadata, codemeta } => (metadata, codemeta),
            MockOutcome::Raw(text) => {
                tokio::fs::write(&paths.metadata, &text).await?;
                tokio::fs::write(&paths.codemeta, &text).await?;
                return Ok(());
            }
            MockOutcome::NoOutput => return Ok(()),
            MockOutcome::Fail(message) => return Err(ExtractionError::Extractor(message)),
        };

        tokio::fs::write(&paths.metadata, serde_json::to_vec(&metadata)?).await?;
        tokio::fs::write(&paths.codemeta, serde_json::to_vec(&codemeta)?).await?;

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(())
    }
}
