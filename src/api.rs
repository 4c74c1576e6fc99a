//! Server-side request handling for the backend service binary.
//!
//! The service exposes the two endpoints the client flows consume: a
//! completion proxy that forwards prompts to an upstream OpenAI-compatible
//! API, and an analysis endpoint that performs the GitHub fetches server-side
//! and returns the composite payload.
//!
//! Author: Nik Jois <nikjois@llamasearch.ai>

use crate::analysis::{AnalyzeResponse, GitHubClient, RepoSummary};
use crate::config::Config;
use crate::error::{AnalysisError, Result};
use crate::sanitize;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service name
    pub service: String,
    /// Service version
    pub version: String,
    /// Current status
    pub status: String,
    /// Current timestamp
    pub timestamp: DateTime<Utc>,
}

/// Builds the service health payload
pub fn health() -> HealthResponse {
    HealthResponse {
        service: "LlamaCodeAnalysis".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "healthy".to_string(),
        timestamp: Utc::now(),
    }
}

/// Forwards a prompt to the upstream chat-completions API and returns the
/// upstream JSON unchanged
///
/// The client flow only reads `choices[0].message.content`, so the upstream
/// body already has the shape it expects.
pub async fn forward_completion(
    config: &Config,
    http: &reqwest::Client,
    prompt: &str,
) -> Result<Value> {
    let api_key = config.openai_api_key()?;
    let url = format!(
        "{}/chat/completions",
        config.openai.api_base.trim_end_matches('/')
    );

    info!("forwarding prompt to {}", url);

    let response = http
        .post(&url)
        .bearer_auth(api_key)
        .json(&json!({
            "model": config.openai.model,
            "messages": [{"role": "user", "content": prompt}]
        }))
        .send()
        .await
        .map_err(|e| AnalysisError::Completion(e.to_string()))?;

    if !response.status().is_success() {
        return Err(AnalysisError::Completion(format!(
            "upstream returned {}",
            response.status()
        )));
    }

    let body = response
        .text()
        .await
        .map_err(|e| AnalysisError::Completion(e.to_string()))?;
    Ok(serde_json::from_str(&body)?)
}

/// Performs the three GitHub fetches server-side and composes the payload the
/// delegated client variant consumes
///
/// Returns a validation error (mapped to 400 by the handler) before any
/// network call when the URL does not parse.
pub async fn compose_analysis(client: &GitHubClient, repo_url: &str) -> Result<AnalyzeResponse> {
    if !sanitize::is_valid_url(repo_url) {
        return Err(AnalysisError::Validation("Invalid URL".into()));
    }

    let sanitized = sanitize::sanitize_input(repo_url);
    let repo_path = sanitize::repo_path_from(&sanitized);

    let summary = client.get_repository(&repo_path).await?;
    let readme_content = client.get_readme(&repo_path).await?;
    let open_issues = client.get_open_issues(&repo_path).await?;

    Ok(AnalyzeResponse {
        analysis_results: format_summary(&summary),
        readme_content,
        open_issues,
    })
}

/// Renders repository metadata into the markdown-flavored text blocks the
/// analysis endpoint returns (the client strips the markers before display)
fn format_summary(summary: &RepoSummary) -> Vec<String> {
    let overview = format!(
        "### Repository Overview\n**{}**: {}",
        summary.full_name,
        summary
            .description
            .as_deref()
            .unwrap_or("No description provided")
    );

    let activity = format!(
        "### Activity\n\
         **Stars:** {}\n\
         **Forks:** {}\n\
         **Open Issues:** {}\n\
         **Primary Language:** {}\n\
         **Owner:** {}\n\
         **Created At:** {}\n\
         **Last Updated:** {}",
        summary.stargazers_count,
        summary.forks_count,
        summary.open_issues_count,
        summary.language.as_deref().unwrap_or("Unknown"),
        summary.owner.login,
        summary.created_at.format("%Y-%m-%d"),
        summary.updated_at.format("%Y-%m-%d"),
    );

    vec![overview, activity]
}
