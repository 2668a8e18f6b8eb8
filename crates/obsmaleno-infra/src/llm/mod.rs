//! LLM provider implementations.
//!
//! Contains the concrete [`LlmProvider`](obsmaleno_core::llm::provider::LlmProvider)
//! backend for Google Gemini and a factory that boxes it for the session layer.

pub mod gemini;

use std::time::Duration;

use secrecy::SecretString;

use obsmaleno_core::llm::box_provider::BoxLlmProvider;
use obsmaleno_types::llm::LlmError;

use self::gemini::GeminiProvider;

/// Build the boxed Gemini provider used by every session.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed.
pub fn create_provider(
    api_key: SecretString,
    model: &str,
    base_url: Option<&str>,
    timeout: Duration,
) -> Result<BoxLlmProvider, LlmError> {
    let mut provider = GeminiProvider::new(api_key, model.to_string(), timeout)?;
    if let Some(base_url) = base_url {
        provider = provider.with_base_url(base_url.to_string());
    }
    Ok(BoxLlmProvider::new(provider))
}
