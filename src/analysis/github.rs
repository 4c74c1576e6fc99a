use crate::config::Config;
use crate::error::{AnalysisError, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("llamacodeanalysis/", env!("CARGO_PKG_VERSION"));

/// Repository metadata returned by `GET /repos/{owner}/{repo}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoSummary {
    /// Repository name
    pub name: String,
    /// `owner/name` form
    pub full_name: String,
    /// Repository description
    pub description: Option<String>,
    /// Star count
    pub stargazers_count: u64,
    /// Fork count
    pub forks_count: u64,
    /// Open issue count
    pub open_issues_count: u64,
    /// Primary language
    pub language: Option<String>,
    /// Repository owner
    pub owner: Account,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// A GitHub account reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Account login name
    pub login: String,
}

/// An open issue as returned by `GET /repos/{owner}/{repo}/issues`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Issue title
    pub title: String,
    /// Issue body, absent when the issue was filed without one
    pub body: Option<String>,
    /// The account that filed the issue
    pub user: Account,
}

#[derive(Debug, Deserialize)]
struct ReadmePayload {
    content: String,
}

/// Anonymous GitHub REST API client
///
/// Requests carry the v3 Accept header and no authentication token, so the
/// anonymous rate limits apply. The base URL is configurable for tests and
/// GitHub Enterprise deployments.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: String,
}

impl GitHubClient {
    /// Creates a client against the given API base URL
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AnalysisError::GitHubApi(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Creates a client from the application configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.github.api_base.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Fetches repository metadata for an `owner/repo` path
    pub async fn get_repository(&self, repo_path: &str) -> Result<RepoSummary> {
        let url = format!("{}/repos/{}", self.base_url, repo_path);
        let body = self.get(&url).await?;
        let summary: RepoSummary = serde_json::from_str(&body)?;
        info!("fetched metadata for {}", summary.full_name);
        Ok(summary)
    }

    /// Fetches the repository README and decodes it from base64 to text
    pub async fn get_readme(&self, repo_path: &str) -> Result<String> {
        let url = format!("{}/repos/{}/readme", self.base_url, repo_path);
        let body = self.get(&url).await?;
        let payload: ReadmePayload = serde_json::from_str(&body)?;
        decode_readme(&payload.content)
    }

    /// Fetches the repository's open issues
    pub async fn get_open_issues(&self, repo_path: &str) -> Result<Vec<Issue>> {
        let url = format!("{}/repos/{}/issues?state=open", self.base_url, repo_path);
        let body = self.get(&url).await?;
        let issues: Vec<Issue> = serde_json::from_str(&body)?;
        Ok(issues)
    }

    async fn get(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, GITHUB_ACCEPT)
            .send()
            .await
            .map_err(|e| AnalysisError::GitHubApi(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::GitHubApi(format!(
                "GET {} returned {}",
                url, status
            )));
        }

        response
            .text()
            .await
            .map_err(|e| AnalysisError::GitHubApi(e.to_string()))
    }
}

/// Decodes GitHub's base64 README content, tolerating the line breaks the API
/// inserts into the encoded payload
fn decode_readme(encoded: &str) -> Result<String> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = BASE64
        .decode(compact.as_bytes())
        .map_err(|e| AnalysisError::Decode(format!("invalid base64 README content: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| AnalysisError::Decode(format!("README is not valid UTF-8: {}", e)))
}
