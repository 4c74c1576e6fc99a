use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default request timeout applied to every outbound HTTP client
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Main configuration struct for the application
///
/// Holds the endpoints the two flows talk to. Every base URL is configurable
/// so deployments (and tests) can substitute their own services.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GitHub REST API settings for the direct analysis variant
    pub github: GitHubSettings,
    /// Completion endpoint settings for the chat flow
    pub completion: CompletionSettings,
    /// Backend analysis endpoint settings for the delegated variant
    pub backend: BackendSettings,
    /// Upstream OpenAI-compatible API settings used by the server binary
    pub openai: OpenAISettings,
    /// Bind settings for the server binary
    pub server: ServerSettings,
    /// Timeout in seconds applied to every outbound request
    pub request_timeout_secs: u64,
}

/// GitHub REST API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubSettings {
    /// Base URL of the GitHub REST API
    pub api_base: String,
}

/// Completion endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionSettings {
    /// Full URL of the completion endpoint the chat flow posts prompts to
    pub endpoint: String,
}

/// Backend analysis endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    /// Full URL of the analysis endpoint the delegated variant posts to
    pub endpoint: String,
}

/// Upstream OpenAI-compatible API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAISettings {
    /// API key for the upstream completion provider
    pub api_key: Option<String>,
    /// Model requested from the upstream provider
    pub model: String,
    /// Base URL of the upstream provider
    pub api_base: String,
}

/// Server binary settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Address the backend service listens on
    pub bind_addr: String,
}

impl Config {
    /// Loads configuration from the default config file location
    ///
    /// If the config file doesn't exist, returns the default configuration.
    /// The config file is expected to be in TOML format. Environment
    /// variables override file values either way.
    pub fn load() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AnalysisError::Config("Could not find config directory".into()))?;
        let config_path = config_dir.join("llama-code-analysis").join("config.toml");

        let mut config = if config_path.exists() {
            Self::from_file(&config_path)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Loads configuration from a specific TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| AnalysisError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| AnalysisError::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Applies environment variable overrides on top of the loaded values
    ///
    /// Recognized variables: `GITHUB_API_BASE_URL`, `COMPLETION_ENDPOINT`,
    /// `ANALYZE_ENDPOINT`, `OPENAI_API_KEY`, `OPENAI_MODEL`, `OPENAI_API_BASE`.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(base) = std::env::var("GITHUB_API_BASE_URL") {
            self.github.api_base = base;
        }
        if let Ok(endpoint) = std::env::var("COMPLETION_ENDPOINT") {
            self.completion.endpoint = endpoint;
        }
        if let Ok(endpoint) = std::env::var("ANALYZE_ENDPOINT") {
            self.backend.endpoint = endpoint;
        }
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            self.openai.api_key = Some(key);
        }
        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            self.openai.model = model;
        }
        if let Ok(base) = std::env::var("OPENAI_API_BASE") {
            self.openai.api_base = base;
        }
    }

    /// Validates that every configured endpoint parses as a URL
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("github.api_base", &self.github.api_base),
            ("completion.endpoint", &self.completion.endpoint),
            ("backend.endpoint", &self.backend.endpoint),
            ("openai.api_base", &self.openai.api_base),
        ] {
            url::Url::parse(value)
                .map_err(|e| AnalysisError::Config(format!("{} is not a valid URL: {}", name, e)))?;
        }
        Ok(())
    }

    /// Retrieves the upstream API key, erroring when it is not configured
    pub fn openai_api_key(&self) -> Result<&str> {
        self.openai
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AnalysisError::Config("OpenAI API key not configured".into()))
    }
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_string(),
        }
    }
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8000/api/openai".to_string(),
        }
    }
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8000/api/analyze".to_string(),
        }
    }
}

impl Default for OpenAISettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gpt-4".to_string(),
            api_base: "https://api.openai.com/v1".to_string(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github: GitHubSettings::default(),
            completion: CompletionSettings::default(),
            backend: BackendSettings::default(),
            openai: OpenAISettings::default(),
            server: ServerSettings::default(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
