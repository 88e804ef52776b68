//! LLM provider abstraction and implementations.
//!
//! The live implementation targets Groq's OpenAI-compatible chat-completions
//! API; any server speaking the same protocol works via `AI_BASE_URL`.

pub mod groq;

use crate::AiError;

/// Default model on Groq.
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";

/// Default OpenAI-compatible endpoint root.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Sampling parameters for a single chat call. Each agent uses its own
/// token budget and temperature.
#[derive(Debug, Clone, Copy)]
pub struct ChatParams {
    /// Maximum completion tokens.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
}

/// Trait for LLM providers.
#[async_trait::async_trait]
pub trait LlmProvider: Send + Sync {
    /// Sends a single-turn chat completion request and returns the
    /// assistant's text.
    ///
    /// # Errors
    ///
    /// Returns [`AiError`] if the request fails, times out, or the provider
    /// returns an error payload.
    async fn chat(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        params: ChatParams,
    ) -> Result<String, AiError>;

    /// The model identifier this provider sends requests to.
    fn model(&self) -> &str;
}

/// Creates the live LLM provider from environment variables.
///
/// Reads `GROQ_API_KEY` (required), `AI_MODEL` (default
/// [`DEFAULT_MODEL`]), and `AI_BASE_URL` (default [`DEFAULT_BASE_URL`],
/// any OpenAI-compatible server).
///
/// # Errors
///
/// Returns [`AiError::Config`] if `GROQ_API_KEY` is not set or the HTTP
/// client cannot be constructed.
pub fn create_provider_from_env() -> Result<Box<dyn LlmProvider>, AiError> {
    let api_key = std::env::var("GROQ_API_KEY").map_err(|_| AiError::Config {
        message: "GROQ_API_KEY environment variable not set".to_string(),
    })?;
    let model = std::env::var("AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
    let base_url = std::env::var("AI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

    log::info!("Using Groq provider with model {model} at {base_url}");
    Ok(Box::new(groq::GroqProvider::new(api_key, model, base_url)?))
}
