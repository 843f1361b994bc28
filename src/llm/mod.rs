//! Chat completion backend abstraction.
//!
//! The [`ChatApi`] trait hides the concrete HTTP backend from the analysis
//! pipeline. Production uses [`OpenAiClient`]; tests substitute in-process
//! stubs.

use async_trait::async_trait;

pub mod error;
pub mod openai;
pub mod types;

pub use error::LlmError;
pub use openai::OpenAiClient;
pub use types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Choice, Usage};

/// Unified interface for chat completion backends.
///
/// Object-safe and designed to be used as `Arc<dyn ChatApi>`. Dropping the
/// future aborts any in-flight HTTP request.
#[async_trait]
pub trait ChatApi: Send + Sync + 'static {
    /// Execute a non-streaming chat completion request.
    async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, LlmError>;
}
