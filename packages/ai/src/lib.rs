#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! LLM-backed enrichment agents with provider abstraction.
//!
//! Five analyst agents (planner, movement analyst, vision analyst, risk
//! scorer, report generator) turn the pipeline's structured outputs into
//! narrative analysis. The live path talks to Groq's OpenAI-compatible
//! chat-completions API; when no credential is configured the suite degrades
//! to canned simulated responses selected once at startup. Enrichment is
//! best-effort throughout: a failed call becomes a labeled error string,
//! never a failed request.

pub mod agents;
pub mod providers;

use thiserror::Error;

/// Errors that can occur during enrichment operations.
#[derive(Debug, Error)]
pub enum AiError {
    /// HTTP request to the LLM provider failed (including timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Provider-specific error.
    #[error("Provider error: {message}")]
    Provider {
        /// Description of what went wrong.
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config {
        /// Description.
        message: String,
    },
}
