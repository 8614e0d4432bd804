pub mod config;
pub mod error;
pub mod generate;
pub mod git;
pub mod host;
pub mod llm;

// Re-export commonly used types for convenience
pub use error::{AppError, AppResult, GitError, GitResult};
pub use generate::{GenerateError, GenerateOptions, Generator};
pub use git::{ChangeSource, Repository};
