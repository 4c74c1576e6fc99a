use crate::config::Config;
use crate::error::{AnalysisError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Request payload sent to the completion endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// The user's prompt text
    pub prompt: String,
}

/// Response payload returned by the completion endpoint
#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    /// Completion choices; the first one carries the reply
    pub choices: Vec<CompletionChoice>,
}

/// A single completion choice
#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    /// The assistant message for this choice
    pub message: ChoiceMessage,
}

/// Message body of a completion choice
#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    /// The assistant's reply text
    pub content: String,
}

/// HTTP client for the completion endpoint the chat flow talks to
#[derive(Debug, Clone)]
pub struct CompletionClient {
    client: Client,
    endpoint: String,
}

impl CompletionClient {
    /// Creates a client posting to the given endpoint
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnalysisError::Completion(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Creates a client from the application configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.completion.endpoint.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Sends a prompt and returns the first completion choice's content
    ///
    /// Transport failures and non-success statuses come back as
    /// [`AnalysisError::Completion`]. A success response with an unexpected
    /// body shape surfaces as a JSON/message error instead, so callers can
    /// tell the two apart.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        debug!("posting prompt to {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&CompletionRequest {
                prompt: prompt.to_string(),
            })
            .send()
            .await
            .map_err(|e| AnalysisError::Completion(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AnalysisError::Completion(format!(
                "completion endpoint returned {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AnalysisError::Completion(e.to_string()))?;
        let completion: CompletionResponse = serde_json::from_str(&body)?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AnalysisError::new("completion response contained no choices"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_response_shape() {
        let body = r#"{"choices":[{"message":{"content":"hello"}}]}"#;
        let parsed: CompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content, "hello");
    }

    #[test]
    fn test_completion_request_wire_shape() {
        let request = CompletionRequest {
            prompt: "hi".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"prompt":"hi"}"#
        );
    }
}
