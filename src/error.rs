use std::io;
use thiserror::Error;

/// Custom result type alias for the application
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors that can occur while driving the chat and analysis flows
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// I/O errors
    #[error("IO error: {0}")]
    IO(#[from] io::Error),

    /// HTTP request/response errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing/serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// GitHub API specific errors
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Completion endpoint errors
    #[error("Completion service error: {0}")]
    Completion(String),

    /// Backend analysis endpoint errors
    #[error("Backend error: {0}")]
    Backend(String),

    /// Payload decoding errors (base64, UTF-8)
    #[error("Decode error: {0}")]
    Decode(String),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// General message errors
    #[error("{0}")]
    Message(String),
}

impl AnalysisError {
    /// Creates a new error with the specified message
    pub fn new(message: &str) -> Self {
        Self::Message(message.to_string())
    }

    /// Checks if this error was raised before any network activity
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::UrlParse(_))
    }

    /// Checks if this error came from a network call (transport failure or
    /// non-success status). These collapse into a flow's coarse view-state
    /// message; everything else propagates to the caller.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::GitHubApi(_) | Self::Completion(_) | Self::Backend(_)
        )
    }
}
