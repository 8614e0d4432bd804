use crate::error::{GitError, GitResult};
use crate::git::ChangeSource;
use crate::git::executor::GitExecutor;
use crate::git::parser;
use std::env;
use std::path::{Path, PathBuf};

/// Represents a git repository and provides read-only queries against it
#[derive(Debug)]
pub struct Repository {
    path: PathBuf,
    executor: GitExecutor,
}

impl Repository {
    /// Detect git repository from current working directory
    pub fn discover() -> GitResult<Self> {
        let current_dir = env::current_dir().map_err(GitError::IoError)?;

        Self::discover_from(&current_dir)
    }

    /// Detect git repository starting from a specific directory
    pub fn discover_from<P: AsRef<Path>>(start_path: P) -> GitResult<Self> {
        let mut current = start_path.as_ref().to_path_buf();

        loop {
            let git_dir = current.join(".git");
            if git_dir.exists() {
                return Ok(Self::new(current));
            }

            // Move up to parent directory
            if !current.pop() {
                return Err(GitError::NotARepository);
            }
        }
    }

    /// Create a Repository for a known git directory
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let executor = GitExecutor::new(&path);

        Self { path, executor }
    }

    /// Get the repository path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Textual diff of the index against the current head commit.
    ///
    /// The diff is returned as opaque text; empty string when nothing is
    /// staged.
    pub fn staged_diff(&self) -> GitResult<String> {
        match self.executor.execute(&["diff", "--cached", "HEAD"]) {
            Ok(output) => Ok(output.stdout),
            // HEAD does not exist before the first commit; diff the index alone
            Err(_) => Ok(self.executor.execute(&["diff", "--cached"])?.stdout),
        }
    }

    /// The last `count` commit messages, most recent first.
    ///
    /// Each entry contributes its subject and body, newline-joined into one
    /// string. An empty repository yields an empty string.
    pub fn recent_log(&self, count: usize) -> GitResult<String> {
        let count_arg = count.to_string();
        let args = ["log", "-n", count_arg.as_str(), "--format=%s%x1f%b%x1e"];

        match self.executor.execute(&args) {
            Ok(output) => {
                let entries = parser::parse_log(&output.stdout)?;
                Ok(entries
                    .iter()
                    .map(|entry| format!("{}\n{}", entry.subject, entry.body))
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
            Err(_) => Ok(String::new()), // Empty repo has no commits
        }
    }

    /// Get the git executor for this repository
    pub fn executor(&self) -> &GitExecutor {
        &self.executor
    }
}

impl ChangeSource for Repository {
    fn staged_diff(&self) -> GitResult<String> {
        Repository::staged_diff(self)
    }

    fn recent_log(&self, count: usize) -> GitResult<String> {
        Repository::recent_log(self, count)
    }
}
