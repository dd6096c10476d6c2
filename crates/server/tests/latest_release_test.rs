//! # Latest Release Endpoint Tests
//!
//! Verifies `/latest_release` against a mocked GitHub releases API.

mod common;

use anyhow::Result;
use common::{TestApp, MOCK_SOMEF_VERSION, RELEASE_PATH};
use httpmock::Method::GET;
use metagen_test_utils::MockExtractor;
use serde_json::{json, Value};

#[tokio::test]
async fn test_latest_release_returns_tag_name() -> Result<()> {
    // Arrange
    let app = TestApp::spawn().await?;
    let github_mock = app
        .mock_server
        .mock_async(|when, then| {
            when.method(GET)
                .path(RELEASE_PATH)
                .header_exists("user-agent");
            then.status(200)
                .json_body(json!({ "tag_name": "v1.2.3", "name": "Release 1.2.3" }));
        })
        .await;

    // Act
    let response = app.client.get(app.url("/latest_release")).send().await?;

    // Assert
    assert_eq!(response.status(), 200);
    assert!(response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json")));
    assert_eq!(response.text().await?, "\"v1.2.3\"");
    github_mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_latest_release_without_tag_name() -> Result<()> {
    let app = TestApp::spawn().await?;
    app.mock_server
        .mock_async(|when, then| {
            when.method(GET).path(RELEASE_PATH);
            then.status(200).json_body(json!({ "name": "untagged" }));
        })
        .await;

    let response = app.client.get(app.url("/latest_release")).send().await?;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await?;
    assert_eq!(body, json!("No releases"));
    Ok(())
}

#[tokio::test]
async fn test_latest_release_reports_upstream_error() -> Result<()> {
    // Arrange
    let app = TestApp::spawn().await?;
    app.mock_server
        .mock_async(|when, then| {
            when.method(GET).path(RELEASE_PATH);
            then.status(404).json_body(json!({
                "message": "Not Found",
                "documentation_url": "https://docs.github.com/rest"
            }));
        })
        .await;

    // Act
    let response = app.client.get(app.url("/latest_release")).send().await?;

    // Assert: the upstream failure is text in a successful response.
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await?;
    assert_eq!(body, json!("Error 404: Not Found"));
    Ok(())
}

#[tokio::test]
async fn test_latest_release_upstream_error_without_message() -> Result<()> {
    let app = TestApp::spawn().await?;
    app.mock_server
        .mock_async(|when, then| {
            when.method(GET).path(RELEASE_PATH);
            then.status(502).body("Bad Gateway");
        })
        .await;

    let response = app.client.get(app.url("/latest_release")).send().await?;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await?;
    assert_eq!(body, json!("Error 502: Unknown error"));
    Ok(())
}

#[tokio::test]
async fn test_latest_release_invalid_configured_repository() -> Result<()> {
    // Arrange: a single path segment cannot name an owner and a repository.
    let app = TestApp::spawn_with_repository("repo", MockExtractor::new(MOCK_SOMEF_VERSION))
        .await?;
    let github_mock = app
        .mock_server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200).json_body(json!({ "tag_name": "v0.0.1" }));
        })
        .await;

    // Act
    let response = app.client.get(app.url("/latest_release")).send().await?;

    // Assert
    assert_eq!(response.status(), 500);
    let body: Value = response.json().await?;
    assert!(body["error"]
        .as_str()
        .is_some_and(|msg| msg.contains("repo")));
    github_mock.assert_hits_async(0).await;
    Ok(())
}

#[tokio::test]
async fn test_latest_release_unreachable_api() -> Result<()> {
    // Arrange: bind and release a port so nothing is listening on it.
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let closed_url = format!("http://{}", listener.local_addr()?);
    drop(listener);
    let app = TestApp::spawn_with_releases_api(&closed_url).await?;

    // Act
    let response = app.client.get(app.url("/latest_release")).send().await?;

    // Assert
    assert_eq!(response.status(), 500);
    let body: Value = response.json().await?;
    assert_eq!(body, json!({ "error": "An internal server error occurred." }));
    Ok(())
}

#[tokio::test]
async fn test_latest_release_does_not_run_extractor() -> Result<()> {
    let app = TestApp::spawn().await?;
    app.mock_server
        .mock_async(|when, then| {
            when.method(GET).path(RELEASE_PATH);
            then.status(200).json_body(json!({ "tag_name": "v2.0.0" }));
        })
        .await;

    let response = app.client.get(app.url("/latest_release")).send().await?;

    assert_eq!(response.status(), 200);
    assert!(app.extractor.get_calls().is_empty());
    Ok(())
}
