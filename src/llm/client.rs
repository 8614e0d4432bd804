use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while requesting a completion
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Trait for text-generation backends that turn a prompt into a completion
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send one prompt with the given sampling temperature and return the
    /// generated text, trimmed of surrounding whitespace
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String, CompletionError>;
}
