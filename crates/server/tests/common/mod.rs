//! # Common Test Utilities
//!
//! This module centralizes the test harness used across the `metagen-server`
//! integration tests. `TestApp` spawns the real router on a random port,
//! configured from a temporary config file, with the GitHub API replaced by an
//! `httpmock::MockServer` and the extraction tool by a `MockExtractor`.

// Allow unused code because this is a test utility module, and not all
// functions might be used by every test file that includes it.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use httpmock::MockServer;
use metagen_server::{
    config, router,
    state::{build_app_state_with_extractor, AppState},
};
use metagen_test_utils::MockExtractor;
use reqwest::Client;
use serde_json::json;
use std::{net::SocketAddr, path::PathBuf};
use tempfile::{tempdir, TempDir};
use tokio::{net::TcpListener, task::JoinHandle};

/// The version the mock extractor reports.
pub const MOCK_SOMEF_VERSION: &str = "0.9.5";

/// The repository configured for `TestApp::spawn`.
pub const PROJECT_REPOSITORY: &str = "https://github.com/owner/repo/";

/// The releases endpoint derived from `PROJECT_REPOSITORY`.
pub const RELEASE_PATH: &str = "/repos/owner/repo/releases/latest";

// --- Full Application Test Harness ---

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub extractor: MockExtractor,
    pub output_dir: PathBuf,
    pub app_state: AppState,
    _work_dir: TempDir,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the application server and returns a `TestApp` instance.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with_repository(PROJECT_REPOSITORY, MockExtractor::new(MOCK_SOMEF_VERSION))
            .await
    }

    /// Spawns the server with a specific extractor.
    pub async fn spawn_with_extractor(extractor: MockExtractor) -> Result<Self> {
        Self::spawn_with_repository(PROJECT_REPOSITORY, extractor).await
    }

    /// Spawns the server configured for `project_repository`.
    pub async fn spawn_with_repository(
        project_repository: &str,
        extractor: MockExtractor,
    ) -> Result<Self> {
        Self::spawn_inner(project_repository, extractor, None).await
    }

    /// Spawns the server with the releases API pointed at `releases_api_url`
    /// instead of the mock server.
    pub async fn spawn_with_releases_api(releases_api_url: &str) -> Result<Self> {
        Self::spawn_inner(
            PROJECT_REPOSITORY,
            MockExtractor::new(MOCK_SOMEF_VERSION),
            Some(releases_api_url.to_string()),
        )
        .await
    }

    async fn spawn_inner(
        project_repository: &str,
        extractor: MockExtractor,
        releases_api_url: Option<String>,
    ) -> Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let mock_server = MockServer::start_async().await;
        let work_dir = tempdir()?;
        let output_dir = work_dir.path().join("generated-files");

        // The same shape as the web front-end's config.json, plus overrides.
        let config_path = work_dir.path().join("config.json");
        let config_content = json!({
            "fastapi_url": "http://127.0.0.1:7979/",
            "project_repository": project_repository,
            "output_dir": output_dir,
            "releases_api_url": releases_api_url.unwrap_or_else(|| mock_server.base_url()),
        });
        std::fs::write(&config_path, serde_json::to_vec_pretty(&config_content)?)?;

        let config = config::get_config(Some(config_path.to_str().unwrap()))?;
        let app_state = build_app_state_with_extractor(config, Box::new(extractor.clone())).await?;
        let app_state_for_harness = app_state.clone();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            extractor,
            output_dir,
            app_state: app_state_for_harness,
            _work_dir: work_dir,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// The absolute URL of `path` on the spawned server.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Number of entries left in the output directory.
    pub fn output_entries(&self) -> usize {
        std::fs::read_dir(&self.output_dir)
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
