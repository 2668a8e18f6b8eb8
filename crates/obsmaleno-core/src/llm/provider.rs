//! LlmProvider trait definition.

use obsmaleno_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for chat completion backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). Wrap an
/// implementation in `BoxLlmProvider` when dynamic dispatch is needed.
///
/// Implementations live in obsmaleno-infra (e.g., `GeminiProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "gemini").
    fn name(&self) -> &str;

    /// The model used when a request leaves `model` empty.
    fn model(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
