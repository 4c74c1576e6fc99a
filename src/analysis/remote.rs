use crate::analysis::github::Issue;
use crate::config::Config;
use crate::error::{AnalysisError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Request payload for the backend analysis endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// The sanitized repository URL to analyze
    #[serde(rename = "repoUrl")]
    pub repo_url: String,
}

/// Composite payload returned by the backend analysis endpoint
///
/// The backend performs the metadata/README/issues fetches server-side and
/// returns all three artifacts in one response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    /// Pre-formatted analysis text blocks
    pub analysis_results: Vec<String>,
    /// Decoded README content, empty when the repository has none
    pub readme_content: String,
    /// Open issues of the repository
    pub open_issues: Vec<Issue>,
}

/// HTTP client for the backend analysis endpoint
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    endpoint: String,
}

impl BackendClient {
    /// Creates a client posting to the given analyze endpoint
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnalysisError::Backend(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Creates a client from the application configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.backend.endpoint.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Posts a repository URL and returns the composite analysis payload
    ///
    /// Transport failures and non-success statuses come back as
    /// [`AnalysisError::Backend`]; a malformed success body surfaces as a
    /// JSON error instead.
    pub async fn analyze(&self, repo_url: &str) -> Result<AnalyzeResponse> {
        debug!("posting {} to {}", repo_url, self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&AnalyzeRequest {
                repo_url: repo_url.to_string(),
            })
            .send()
            .await
            .map_err(|e| AnalysisError::Backend(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AnalysisError::Backend(format!(
                "analyze endpoint returned {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AnalysisError::Backend(e.to_string()))?;
        Ok(serde_json::from_str(&body)?)
    }
}
