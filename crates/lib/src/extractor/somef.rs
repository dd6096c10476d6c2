//! # SOMEF Command-Line Extractor
//!
//! Runs the SOMEF command-line tool as a child process. The tool writes its
//! results to the files passed on the command line and reports failures on
//! stderr, so the exit status and the last line of stderr are all this
//! adapter needs to interpret.

use super::MetadataExtractor;
use crate::{
    constants::DEFAULT_EXTRACTOR_COMMAND,
    errors::ExtractionError,
    types::{ExtractionRequest, OutputPaths},
};
use async_trait::async_trait;
use std::ffi::OsString;
use std::process::Output;
use tokio::process::Command;
use tracing::{debug, info};

/// An extractor backed by the `somef` executable.
#[derive(Clone, Debug)]
pub struct SomefCli {
    command: String,
    args: Vec<String>,
}

impl SomefCli {
    /// Creates an extractor that runs `command`.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
        }
    }

    /// Arguments placed before the subcommand, e.g. a script path when the
    /// command is an interpreter.
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// Builds the argument list for a `describe` run.
    pub fn describe_args(&self, request: &ExtractionRequest, paths: &OutputPaths) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.args.iter().map(OsString::from).collect();
        args.extend([
            OsString::from("describe"),
            OsString::from("-r"),
            OsString::from(&request.repo_url),
            OsString::from("-o"),
            paths.metadata.clone().into_os_string(),
            OsString::from("-c"),
            paths.codemeta.clone().into_os_string(),
            OsString::from("-t"),
            OsString::from(request.threshold.to_string()),
        ]);
        if request.ignore_classifiers {
            args.push(OsString::from("--ignore_classifiers"));
        }
        args
    }

    async fn run(&self, args: Vec<OsString>) -> Result<Output, ExtractionError> {
        debug!(command = %self.command, ?args, "Spawning extraction tool.");
        Command::new(&self.command)
            .args(&args)
            .output()
            .await
            .map_err(|source| ExtractionError::Launch {
                command: self.command.clone(),
                source,
            })
    }
}

impl Default for SomefCli {
    fn default() -> Self {
        Self::new(DEFAULT_EXTRACTOR_COMMAND)
    }
}

#[async_trait]
impl MetadataExtractor for SomefCli {
    async fn version(&self) -> Result<String, ExtractionError> {
        let mut args: Vec<OsString> = self.args.iter().map(OsString::from).collect();
        args.push(OsString::from("--version"));
        let output = self.run(args).await?;
        if !output.status.success() {
            return Err(ExtractionError::Extractor(failure_message(&output)));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_version_output(&stdout).ok_or_else(|| {
            ExtractionError::Extractor(format!(
                "Could not read a version from '{}'",
                stdout.trim()
            ))
        })
    }

    async fn extract(
        &self,
        request: &ExtractionRequest,
        paths: &OutputPaths,
    ) -> Result<(), ExtractionError> {
        info!(url = %request.repo_url, threshold = request.threshold, "Running somef describe.");
        let output = self.run(self.describe_args(request, paths)).await?;
        if !output.status.success() {
            return Err(ExtractionError::Extractor(failure_message(&output)));
        }
        Ok(())
    }
}

/// Extracts the version from `--version` output such as `somef, version 0.9.5`.
pub fn parse_version_output(output: &str) -> Option<String> {
    output.split_whitespace().last().map(str::to_string)
}

// The tool logs progress to stderr, so only the final line carries the error.
fn failure_message(output: &Output) -> String {
    let last_line = |bytes: &[u8]| {
        String::from_utf8_lossy(bytes)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .last()
            .map(str::to_string)
    };
    last_line(&output.stderr)
        .or_else(|| last_line(&output.stdout))
        .unwrap_or_else(|| format!("Extraction tool exited with {}", output.status))
}
