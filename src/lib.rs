#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(clippy::all)]

//! LlamaCodeAnalysis - chat with an AI assistant and analyze GitHub repositories
//!
//! This library provides two self-contained, user-triggered flows, each with
//! its own view state:
//!
//! - A **chat flow** that keeps a running transcript against a language-model
//!   completion endpoint.
//! - A **repository analysis flow** that validates a GitHub URL and fetches
//!   metadata, README content, and open issues — either directly from the
//!   GitHub REST API or by delegating to a backend analysis endpoint.
//!
//! ## Usage
//! ```rust,ignore
//! use llamacodeanalysis::analysis::{self, AnalysisState, GitHubClient};
//! use llamacodeanalysis::Config;
//!
//! async fn example() -> llamacodeanalysis::Result<()> {
//!     let config = Config::load()?;
//!     let client = GitHubClient::from_config(&config)?;
//!     let mut state = AnalysisState::new();
//!
//!     analysis::analyze(&mut state, &client, "https://github.com/rust-lang/rust").await?;
//!     Ok(())
//! }
//! ```

/// Repository analysis flow: state, orchestrators, and HTTP clients
pub mod analysis;
/// Server-side request handling shared by the service endpoints
pub mod api;
/// Chat flow: transcript state, orchestrator, and completion client
pub mod chat;
/// Terminal rendering and prompts for the CLI binary
pub mod cli;
/// Configuration loading and endpoint settings
pub mod config;
/// Error handling types and utilities
pub mod error;
/// Logging configuration and utilities
pub mod logging;
/// Input validation and sanitization helpers
pub mod sanitize;
/// Axum application wiring for the backend service
pub mod server;

// Re-export common types
pub use config::Config;
pub use error::{AnalysisError, Result};
