//! Repository analysis flow: validate a URL, fetch metadata, README, and open
//! issues, and reconcile the results into per-invocation view state.
//!
//! Two variants share the same state shape. The direct variant talks to the
//! GitHub REST API with a three-step sequential chain that short-circuits on
//! the first failure; the delegated variant posts to a backend endpoint that
//! returns all three artifacts in one payload.

mod github;
mod preprocess;
mod remote;

pub use github::{Account, GitHubClient, Issue, RepoSummary};
pub use preprocess::preprocess;
pub use remote::{AnalyzeRequest, AnalyzeResponse, BackendClient};

use tracing::warn;

use crate::error::Result;
use crate::sanitize;

/// Error message for input that does not parse as a URL
pub const INVALID_URL_ERROR: &str = "Invalid URL";
/// Error message when the metadata fetch fails
pub const METADATA_FETCH_ERROR: &str = "Network response was not ok";
/// Error message when the README fetch fails
pub const README_FETCH_ERROR: &str = "Failed to fetch README";
/// Error message when the issues fetch fails
pub const ISSUES_FETCH_ERROR: &str = "Failed to fetch issues";
/// Error message when the delegated backend call fails
pub const REMOTE_FETCH_ERROR: &str = "Failed to fetch analysis results";

/// One populated entry in the analysis results slot
///
/// The two variants are mutually exclusive per invocation: the direct flow
/// stores the repository metadata record, the delegated flow stores the
/// backend's pre-formatted text blocks. They are never mixed.
#[derive(Debug, Clone)]
pub enum AnalysisEntry {
    /// Repository metadata fetched directly from the GitHub API
    Summary(RepoSummary),
    /// A pre-formatted text block returned by the backend service
    Text(String),
}

/// View state for one analysis invocation
///
/// Each result slot is written independently as its step completes, so
/// earlier steps' results stay visible when a later step fails.
#[derive(Debug, Default)]
pub struct AnalysisState {
    /// Analysis results: metadata record or backend text blocks
    pub analysis_results: Vec<AnalysisEntry>,
    /// Decoded README content, empty until fetched
    pub readme_content: String,
    /// Open issues of the repository
    pub open_issues: Vec<Issue>,
    /// Active error message, if any
    pub error: Option<String>,
    /// True only between dispatch and first resolution of the delegated call
    pub loading: bool,
}

impl AnalysisState {
    /// Creates an empty analysis state
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the error and all three result slots
    ///
    /// Runs at the start of every invocation so stale results from a previous
    /// repository never linger into a new attempt.
    pub fn reset(&mut self) {
        self.analysis_results.clear();
        self.readme_content.clear();
        self.open_issues.clear();
        self.error = None;
    }
}

/// Analyzes a repository by calling the GitHub API directly
///
/// Validates and sanitizes the raw URL, then runs the three-step fetch chain
/// (metadata, README, open issues). Each step short-circuits the chain on
/// failure and sets its own error message, while the slots populated by
/// earlier steps remain visible.
///
/// Network failures land in `state.error`; a malformed success payload
/// propagates as `Err` instead.
pub async fn analyze(
    state: &mut AnalysisState,
    client: &GitHubClient,
    raw_url: &str,
) -> Result<()> {
    state.reset();

    if !sanitize::is_valid_url(raw_url) {
        state.error = Some(INVALID_URL_ERROR.to_string());
        return Ok(());
    }

    let sanitized = sanitize::sanitize_input(raw_url);
    let repo_path = sanitize::repo_path_from(&sanitized);

    let summary = match client.get_repository(&repo_path).await {
        Ok(summary) => summary,
        Err(err) if err.is_network() => {
            warn!("metadata fetch failed for {}: {}", repo_path, err);
            state.error = Some(METADATA_FETCH_ERROR.to_string());
            return Ok(());
        }
        Err(err) => return Err(err),
    };
    state.analysis_results.push(AnalysisEntry::Summary(summary));

    let readme = match client.get_readme(&repo_path).await {
        Ok(readme) => readme,
        Err(err) if err.is_network() => {
            warn!("README fetch failed for {}: {}", repo_path, err);
            state.error = Some(README_FETCH_ERROR.to_string());
            return Ok(());
        }
        Err(err) => return Err(err),
    };
    state.readme_content = readme;

    match client.get_open_issues(&repo_path).await {
        Ok(issues) => state.open_issues = issues,
        Err(err) if err.is_network() => {
            warn!("issues fetch failed for {}: {}", repo_path, err);
            state.error = Some(ISSUES_FETCH_ERROR.to_string());
        }
        Err(err) => return Err(err),
    }

    Ok(())
}

/// Analyzes a repository by delegating to the backend analysis endpoint
///
/// Same validation and sanitization as [`analyze`], then a single POST whose
/// composite payload fills all three slots at once. The loading flag covers
/// exactly the window of that call and is cleared on every exit path. Any
/// network failure sets one generic error message with no partial population.
pub async fn analyze_remote(
    state: &mut AnalysisState,
    client: &BackendClient,
    raw_url: &str,
) -> Result<()> {
    state.reset();

    if !sanitize::is_valid_url(raw_url) {
        state.error = Some(INVALID_URL_ERROR.to_string());
        return Ok(());
    }

    let sanitized = sanitize::sanitize_input(raw_url);

    state.loading = true;
    let outcome = client.analyze(&sanitized).await;
    state.loading = false;

    match outcome {
        Ok(payload) => {
            state.analysis_results = payload
                .analysis_results
                .iter()
                .map(|block| AnalysisEntry::Text(preprocess(block)))
                .collect();
            state.readme_content = payload.readme_content;
            state.open_issues = payload.open_issues;
            Ok(())
        }
        Err(err) if err.is_network() => {
            warn!("backend analysis failed: {}", err);
            state.error = Some(REMOTE_FETCH_ERROR.to_string());
            Ok(())
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_clears_slots_and_error() {
        let mut state = AnalysisState::new();
        state.analysis_results.push(AnalysisEntry::Text("x".into()));
        state.readme_content = "stale".into();
        state.error = Some("old error".into());

        state.reset();

        assert!(state.analysis_results.is_empty());
        assert!(state.readme_content.is_empty());
        assert!(state.open_issues.is_empty());
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_invalid_url_short_circuits_before_network() {
        // The client points at a closed port; a network attempt would error
        // with the metadata message rather than the validation one.
        let client = GitHubClient::new(
            "http://127.0.0.1:1",
            std::time::Duration::from_millis(50),
        )
        .unwrap();
        let mut state = AnalysisState::new();

        analyze(&mut state, &client, "not a url").await.unwrap();

        assert_eq!(state.error.as_deref(), Some(INVALID_URL_ERROR));
        assert!(state.analysis_results.is_empty());
    }
}
