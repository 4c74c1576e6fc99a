use llamacodeanalysis::analysis::GitHubClient;
use llamacodeanalysis::api;
use llamacodeanalysis::error::AnalysisError;
use pretty_assertions::assert_eq;
use std::time::Duration;

mod common;
use common::test_helpers::*;

#[tokio::test]
async fn compose_analysis_builds_the_composite_payload() {
    setup_test_logger();
    let mut server = mockito::Server::new_async().await;
    let _metadata = server
        .mock("GET", "/repos/octo/repo")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(repo_json("octo/repo"))
        .create_async()
        .await;
    let _readme = server
        .mock("GET", "/repos/octo/repo/readme")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(readme_json())
        .create_async()
        .await;
    let _issues = server
        .mock("GET", "/repos/octo/repo/issues?state=open")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(issues_json())
        .create_async()
        .await;

    let client = GitHubClient::new(server.url(), Duration::from_secs(5)).unwrap();
    let response = api::compose_analysis(&client, "https://github.com/octo/repo")
        .await
        .unwrap();

    // The formatted blocks keep their markdown markers; stripping them is the
    // client's preprocessing step.
    assert_eq!(response.analysis_results.len(), 2);
    assert!(response.analysis_results[0].contains("**octo/repo**: A test repository"));
    assert!(response.analysis_results[1].contains("**Stars:** 42"));
    assert_eq!(response.readme_content, "# Hello\n");
    assert_eq!(response.open_issues.len(), 2);
}

#[tokio::test]
async fn compose_analysis_rejects_invalid_urls_before_any_request() {
    setup_test_logger();
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = GitHubClient::new(server.url(), Duration::from_secs(5)).unwrap();
    let result = api::compose_analysis(&client, "not a url").await;

    mock.assert_async().await;
    assert!(matches!(result, Err(AnalysisError::Validation(_))));
}

#[tokio::test]
async fn compose_analysis_propagates_github_failures() {
    setup_test_logger();
    let mut server = mockito::Server::new_async().await;
    let _metadata = server
        .mock("GET", "/repos/octo/repo")
        .with_status(500)
        .create_async()
        .await;

    let client = GitHubClient::new(server.url(), Duration::from_secs(5)).unwrap();
    let result = api::compose_analysis(&client, "https://github.com/octo/repo").await;

    assert!(matches!(result, Err(AnalysisError::GitHubApi(_))));
}

#[tokio::test]
async fn forward_completion_returns_the_upstream_body_unchanged() {
    setup_test_logger();
    let mut server = mockito::Server::new_async().await;
    let upstream = r#"{"id":"cmpl-1","choices":[{"message":{"content":"hi"}}]}"#;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(upstream)
        .create_async()
        .await;

    let mut config = test_config(&server.url());
    config.openai.api_key = Some("sk-test".to_string());

    let http = reqwest::Client::new();
    let body = api::forward_completion(&config, &http, "hello")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(body["choices"][0]["message"]["content"], "hi");
    assert_eq!(body["id"], "cmpl-1");
}

#[tokio::test]
async fn forward_completion_requires_an_api_key() {
    setup_test_logger();
    let config = test_config("http://127.0.0.1:1");

    let http = reqwest::Client::new();
    let result = api::forward_completion(&config, &http, "hello").await;

    assert!(matches!(result, Err(AnalysisError::Config(_))));
}
