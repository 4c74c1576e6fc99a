use llamacodeanalysis::analysis::{
    self, AnalysisEntry, AnalysisState, BackendClient, INVALID_URL_ERROR, REMOTE_FETCH_ERROR,
};
use pretty_assertions::assert_eq;
use std::time::Duration;

mod common;
use common::test_helpers::*;

fn client_for(server: &mockito::ServerGuard) -> BackendClient {
    BackendClient::new(
        format!("{}/api/analyze", server.url()),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn delegated_success_fills_all_slots_at_once() {
    setup_test_logger();
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/analyze")
        .match_body(mockito::Matcher::Json(serde_json::json!({
            "repoUrl": "https://github.com/octo/repo"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r####"{
                "analysisResults": ["### Repository Overview\n**octo/repo**: A test repository"],
                "readmeContent": "# Hello\n",
                "openIssues": [{"title": "Bug", "body": "details", "user": {"login": "alice"}}]
            }"####,
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let mut state = AnalysisState::new();

    analysis::analyze_remote(&mut state, &client, "https://github.com/octo/repo")
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(state.error.is_none());
    assert!(!state.loading);

    // Markdown emphasis and heading markers are stripped before display.
    match &state.analysis_results[0] {
        AnalysisEntry::Text(block) => {
            assert_eq!(block, "Repository Overview\nocto/repo: A test repository");
        }
        AnalysisEntry::Summary(_) => panic!("delegated variant must store text blocks"),
    }
    assert_eq!(state.readme_content, "# Hello\n");
    assert_eq!(state.open_issues.len(), 1);
    assert_eq!(state.open_issues[0].user.login, "alice");
}

#[tokio::test]
async fn delegated_failure_sets_one_generic_error() {
    setup_test_logger();
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/analyze")
        .with_status(502)
        .create_async()
        .await;

    let client = client_for(&server);
    let mut state = AnalysisState::new();

    analysis::analyze_remote(&mut state, &client, "https://github.com/octo/repo")
        .await
        .unwrap();

    assert_eq!(state.error.as_deref(), Some(REMOTE_FETCH_ERROR));
    assert!(!state.loading);
    // Exactly one network call means no partial population on failure.
    assert!(state.analysis_results.is_empty());
    assert!(state.readme_content.is_empty());
    assert!(state.open_issues.is_empty());
}

#[tokio::test]
async fn delegated_invalid_url_issues_no_request() {
    setup_test_logger();
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);
    let mut state = AnalysisState::new();

    analysis::analyze_remote(&mut state, &client, "not a url")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(state.error.as_deref(), Some(INVALID_URL_ERROR));
    assert!(!state.loading);
}

#[tokio::test]
async fn delegated_request_carries_the_sanitized_url() {
    setup_test_logger();
    let mut server = mockito::Server::new_async().await;
    // The ampersand in the query string is HTML-escaped before the URL is
    // embedded in the request body.
    let mock = server
        .mock("POST", "/api/analyze")
        .match_body(mockito::Matcher::Json(serde_json::json!({
            "repoUrl": "https://github.com/octo/repo?a=1&amp;b=2"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"analysisResults": [], "readmeContent": "", "openIssues": []}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let mut state = AnalysisState::new();

    analysis::analyze_remote(&mut state, &client, "https://github.com/octo/repo?a=1&b=2")
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(state.error.is_none());
}

#[tokio::test]
async fn delegated_malformed_payload_propagates_as_err() {
    setup_test_logger();
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/analyze")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"unexpected": true}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let mut state = AnalysisState::new();

    let result =
        analysis::analyze_remote(&mut state, &client, "https://github.com/octo/repo").await;

    assert!(result.is_err());
    // The loading flag is still cleared on the error path.
    assert!(!state.loading);
    assert!(state.error.is_none());
}
