pub mod client;
pub mod gemini;
pub mod prompt;

pub use client::{CompletionClient, CompletionError};
pub use gemini::GeminiClient;
