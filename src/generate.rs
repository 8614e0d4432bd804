use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

use crate::error::GitError;
use crate::git::ChangeSource;
use crate::host::report::Notifier;
use crate::host::sink::{CommitMessageSink, SinkError};
use crate::llm::client::{CompletionClient, CompletionError};
use crate::llm::prompt;

/// Errors that can end a generation run
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("No staged changes detected")]
    NoStagedChanges,

    #[error("Missing API key")]
    MissingCredential,

    #[error("A generation is already in progress")]
    Busy,

    #[error("Git error: {0}")]
    Git(#[from] GitError),

    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    #[error("Commit message sink error: {0}")]
    Sink(#[from] SinkError),
}

/// Settings for one generator, resolved from configuration at wiring time
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub api_key: String,
    pub temperature: f32,
    pub max_diff_length: usize,
    pub max_log_length: usize,
    pub log_items: usize,
}

/// Drives the pipeline: read repository state, compose the prompt, request a
/// completion, deliver the message.
///
/// One run at a time: a second `run` while another is in flight fails with
/// `GenerateError::Busy` instead of racing on the message buffer.
pub struct Generator {
    client: Box<dyn CompletionClient>,
    sink: Box<dyn CommitMessageSink>,
    notifier: Box<dyn Notifier>,
    options: GenerateOptions,
    busy: AtomicBool,
}

impl Generator {
    pub fn new(
        client: Box<dyn CompletionClient>,
        sink: Box<dyn CommitMessageSink>,
        notifier: Box<dyn Notifier>,
        options: GenerateOptions,
    ) -> Self {
        Self {
            client,
            sink,
            notifier,
            options,
            busy: AtomicBool::new(false),
        }
    }

    /// Run the pipeline once.
    ///
    /// The outcome is reported as a single success or error notification; the
    /// returned result carries the generated message for the caller.
    pub async fn run(&self, source: Option<&dyn ChangeSource>) -> Result<String, GenerateError> {
        if self.busy.swap(true, Ordering::SeqCst) {
            self.notifier.error("A generation is already in progress");
            return Err(GenerateError::Busy);
        }

        let result = self.execute(source).await;
        self.busy.store(false, Ordering::SeqCst);

        match &result {
            Ok(_) => self.notifier.success("Commit message generated"),
            Err(e) => self.notifier.error(&e.to_string()),
        }

        result
    }

    async fn execute(&self, source: Option<&dyn ChangeSource>) -> Result<String, GenerateError> {
        let source = source.ok_or(GitError::NotARepository)?;

        self.notifier.progress("Reading staged changes");
        let diff = source.staged_diff()?;
        let diff = diff.trim();
        if diff.is_empty() {
            return Err(GenerateError::NoStagedChanges);
        }

        if self.options.api_key.is_empty() {
            return Err(GenerateError::MissingCredential);
        }

        let log = source.recent_log(self.options.log_items)?;
        let prompt = prompt::compose(
            diff,
            &log,
            self.options.max_diff_length,
            self.options.max_log_length,
        );

        self.notifier.progress("Requesting completion");
        let completion = self
            .client
            .complete(&prompt, self.options.temperature)
            .await?;
        let message = completion.trim();

        self.sink.set_message(message)?;

        Ok(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GitResult;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StaticSource {
        diff: String,
        log: String,
    }

    impl ChangeSource for StaticSource {
        fn staged_diff(&self) -> GitResult<String> {
            Ok(self.diff.clone())
        }

        fn recent_log(&self, _count: usize) -> GitResult<String> {
            Ok(self.log.clone())
        }
    }

    struct MockClient {
        response: String,
    }

    #[async_trait]
    impl CompletionClient for MockClient {
        async fn complete(
            &self,
            _prompt: &str,
            _temperature: f32,
        ) -> Result<String, CompletionError> {
            Ok(self.response.clone())
        }
    }

    #[derive(Default)]
    struct MemorySink {
        message: Mutex<Option<String>>,
    }

    impl CommitMessageSink for MemorySink {
        fn set_message(&self, message: &str) -> Result<(), SinkError> {
            *self.message.lock().unwrap() = Some(message.to_string());
            Ok(())
        }
    }

    struct SilentNotifier;

    impl Notifier for SilentNotifier {
        fn progress(&self, _stage: &str) {}
        fn success(&self, _message: &str) {}
        fn error(&self, _detail: &str) {}
    }

    fn options() -> GenerateOptions {
        GenerateOptions {
            api_key: "test-key".to_string(),
            temperature: 0.3,
            max_diff_length: 3000,
            max_log_length: 3000,
            log_items: 5,
        }
    }

    #[tokio::test]
    async fn test_run_happy_path() {
        let generator = Generator::new(
            Box::new(MockClient {
                response: "feat(x): add line".to_string(),
            }),
            Box::new(MemorySink::default()),
            Box::new(SilentNotifier),
            options(),
        );

        let source = StaticSource {
            diff: "diff --git a/x b/x\n+line\n".to_string(),
            log: "feat: add x\n".to_string(),
        };

        let message = generator.run(Some(&source)).await.unwrap();
        assert_eq!(message, "feat(x): add line");
    }

    #[tokio::test]
    async fn test_run_no_repository() {
        let generator = Generator::new(
            Box::new(MockClient {
                response: "unused".to_string(),
            }),
            Box::new(MemorySink::default()),
            Box::new(SilentNotifier),
            options(),
        );

        let result = generator.run(None).await;
        assert!(matches!(
            result.unwrap_err(),
            GenerateError::Git(GitError::NotARepository)
        ));
    }

    #[tokio::test]
    async fn test_run_trims_completion() {
        let generator = Generator::new(
            Box::new(MockClient {
                response: "  fix: typo \n".to_string(),
            }),
            Box::new(MemorySink::default()),
            Box::new(SilentNotifier),
            options(),
        );

        let source = StaticSource {
            diff: "+x\n".to_string(),
            log: String::new(),
        };

        let message = generator.run(Some(&source)).await.unwrap();
        assert_eq!(message, "fix: typo");
    }
}
