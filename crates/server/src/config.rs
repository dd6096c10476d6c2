//! # Application Configuration
//!
//! This module defines the configuration structure for the `metagen-server`
//! and the logic for loading it from a JSON or YAML file and environment
//! variables. The configuration is loaded once at startup and handed to
//! `build_app_state`; nothing reads it from a global.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use metagen::constants::{DEFAULT_EXTRACTOR_COMMAND, DEFAULT_OUTPUT_DIR};
use metagen_github::GITHUB_API_URL;
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// The file read when neither an explicit path nor `METAGEN_CONFIG` is given.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// The environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "METAGEN_CONFIG";

/// A custom error type for configuration issues.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    #[error("Configuration error: {0}")]
    General(String),
    /// Indicates a required configuration file was not found.
    #[error("{0}")]
    NotFound(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure.
///
/// The file is shared with the web front-end, so keys this server does not
/// know (such as `fastapi_url`) are ignored.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The repository whose latest release `/latest_release` reports.
    pub project_repository: String,
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// The directory under which extraction workspaces are created.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// The base URL of the GitHub REST API.
    #[serde(default = "default_releases_api_url")]
    pub releases_api_url: String,
    #[serde(default)]
    pub extractor: ExtractorConfig,
}

/// How to invoke the extraction tool.
#[derive(Debug, Deserialize, Clone)]
pub struct ExtractorConfig {
    #[serde(default = "default_extractor_command")]
    pub command: String,
    /// Arguments placed before the subcommand.
    #[serde(default)]
    pub args: Vec<String>,
    /// Reported by `/version` instead of asking the tool.
    #[serde(default)]
    pub version: Option<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            command: default_extractor_command(),
            args: Vec::new(),
            version: None,
        }
    }
}

fn default_port() -> u16 {
    7979
}

fn default_output_dir() -> String {
    DEFAULT_OUTPUT_DIR.to_string()
}

fn default_releases_api_url() -> String {
    GITHUB_API_URL.to_string()
}

fn default_extractor_command() -> String {
    DEFAULT_EXTRACTOR_COMMAND.to_string()
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(e.to_string()))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        env::var(&caps["var"]).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

fn file_format(path: &str) -> FileFormat {
    match Path::new(path).extension().and_then(|ext| ext.to_str()) {
        Some("yml") | Some("yaml") => FileFormat::Yaml,
        _ => FileFormat::Json,
    }
}

/// Loads the application configuration from a file and environment variables.
///
/// The file path is `config_path_override`, else `METAGEN_CONFIG`, else
/// `config.json`. Environment variables are layered on top:
/// - Top-level keys like `port` and `project_repository` are overridden by
///   `PORT` and `PROJECT_REPOSITORY`.
/// - Nested keys are overridden by `METAGEN_...` variables (e.g.,
///   `METAGEN_EXTRACTOR__COMMAND`).
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let config_path = match config_path_override {
        Some(path) => path.to_string(),
        None => env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string()),
    };

    let content = read_and_substitute(&config_path)?.ok_or_else(|| {
        ConfigError::NotFound(format!(
            "Config file not found at '{config_path}'. Create it or point {CONFIG_PATH_ENV} at an existing file."
        ))
    })?;
    info!("Loading configuration from '{config_path}'.");

    let settings = ConfigBuilder::builder()
        // Layer 1: The configuration file.
        .add_source(File::from_str(&content, file_format(&config_path)))
        // Layer 2: Environment variables for top-level keys like PORT.
        .add_source(Environment::default())
        // Layer 3: Prefixed environment variables for nested keys.
        .add_source(
            Environment::with_prefix("METAGEN")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
