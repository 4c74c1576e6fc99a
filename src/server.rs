//! Axum wiring for the backend service.
//!
//! Exposes the completion proxy and the server-side analysis endpoint behind
//! permissive CORS, shared by the `server` binary and the CLI's `serve`
//! subcommand.

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::Json as ResponseJson,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::analysis::{AnalyzeRequest, GitHubClient};
use crate::api;
use crate::chat::CompletionRequest;
use crate::config::Config;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    github: GitHubClient,
    http: reqwest::Client,
}

impl AppState {
    /// Builds the shared state from the application configuration
    pub fn from_config(config: Config) -> crate::error::Result<Self> {
        let github = GitHubClient::from_config(&config)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            config: Arc::new(config),
            github,
            http,
        })
    }
}

/// Create the main application with all routes
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/api/openai", post(openai_proxy))
        .route("/api/analyze", post(analyze_repository))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds the configured address and serves until shutdown
pub async fn run(config: Config) -> crate::error::Result<()> {
    config.validate()?;
    let bind_addr = config.server.bind_addr.clone();
    let state = AppState::from_config(config)?;

    info!("LlamaCodeAnalysis backend starting...");
    info!("Health check: http://{}/health", bind_addr);

    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Server listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Root endpoint - returns basic service information
async fn index() -> ResponseJson<Value> {
    ResponseJson(json!({
        "service": "LlamaCodeAnalysis",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Completion proxy and GitHub repository analysis backend",
        "endpoints": {
            "health": "/health",
            "openai": "/api/openai",
            "analyze": "/api/analyze"
        }
    }))
}

/// Health check endpoint
async fn health_check() -> ResponseJson<Value> {
    ResponseJson(json!(api::health()))
}

/// Completion proxy endpoint
async fn openai_proxy(
    State(state): State<AppState>,
    Json(request): Json<CompletionRequest>,
) -> Result<ResponseJson<Value>, StatusCode> {
    match api::forward_completion(&state.config, &state.http, &request.prompt).await {
        Ok(body) => Ok(ResponseJson(body)),
        Err(e) => {
            error!("Completion proxy failed: {}", e);
            Err(StatusCode::BAD_GATEWAY)
        }
    }
}

/// Server-side repository analysis endpoint
async fn analyze_repository(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<ResponseJson<Value>, StatusCode> {
    info!("Analysis requested for repository: {}", request.repo_url);

    match api::compose_analysis(&state.github, &request.repo_url).await {
        Ok(response) => Ok(ResponseJson(json!(response))),
        Err(e) if e.is_validation() => {
            error!("Rejected analysis request: {}", e);
            Err(StatusCode::BAD_REQUEST)
        }
        Err(e) => {
            error!("Analysis failed: {}", e);
            Err(StatusCode::BAD_GATEWAY)
        }
    }
}
