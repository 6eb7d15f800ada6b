use crate::error::AppResult;

pub mod gemini;
pub mod parse;
pub mod prompt;

/// Trait for hosted language-model clients
///
/// The model is a black box: callers send one prompt and get back
/// free-form text with no guaranteed structure. Anything smarter than
/// that (chunking, display) lives on the caller's side of the seam.
#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    /// Send one prompt and return the raw text reply
    async fn generate(&self, prompt: &str) -> AppResult<String>;

    /// Model identifier for logging and response metadata
    fn model(&self) -> &str;
}
