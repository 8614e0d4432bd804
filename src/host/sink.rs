use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while delivering the generated message
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Source control integration unavailable: {0}")]
    IntegrationUnavailable(String),

    #[error("No open repository to receive the commit message")]
    NoRepositoryView,

    #[error("Failed to write commit message: {0}")]
    WriteError(#[from] io::Error),
}

/// Destination for the generated commit message
pub trait CommitMessageSink: Send + Sync {
    /// Replace the pending commit message with `message`
    fn set_message(&self, message: &str) -> Result<(), SinkError>;
}

/// Writes the message into the repository's COMMIT_EDITMSG buffer, the file
/// `git commit` presents for editing.
///
/// The repository is resolved from the working directory at write time, so the
/// sink can be constructed before anything is known about the repository.
pub struct EditMsgSink {
    workdir: PathBuf,
}

impl EditMsgSink {
    pub fn new<P: AsRef<Path>>(workdir: P) -> Self {
        Self {
            workdir: workdir.as_ref().to_path_buf(),
        }
    }

    /// Walk up from the working directory to the nearest `.git` entry
    fn find_git_dir(&self) -> Result<PathBuf, SinkError> {
        let mut current = self.workdir.clone();

        loop {
            let git_dir = current.join(".git");
            if git_dir.exists() {
                if git_dir.is_dir() {
                    return Ok(git_dir);
                }
                // A `.git` file (worktree or submodule pointer) has no
                // message buffer of its own
                return Err(SinkError::IntegrationUnavailable(format!(
                    "{} is not a directory",
                    git_dir.display()
                )));
            }

            if !current.pop() {
                return Err(SinkError::NoRepositoryView);
            }
        }
    }
}

impl CommitMessageSink for EditMsgSink {
    fn set_message(&self, message: &str) -> Result<(), SinkError> {
        let git_dir = self.find_git_dir()?;
        fs::write(git_dir.join("COMMIT_EDITMSG"), message)?;
        Ok(())
    }
}
