use chrono::Local;

/// Progress and outcome notifications for one pipeline run.
///
/// Every run ends in exactly one `success` or `error` notification; `progress`
/// marks the start of a stage.
pub trait Notifier: Send + Sync {
    fn progress(&self, stage: &str);

    fn success(&self, message: &str);

    fn error(&self, detail: &str);
}

/// Writes notifications to stderr.
///
/// Progress lines carry a timestamp and double as the diagnostic trace;
/// nothing is persisted.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn progress(&self, stage: &str) {
        eprintln!("[{}] {}", Local::now().format("%H:%M:%S"), stage);
    }

    fn success(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn error(&self, detail: &str) {
        eprintln!("error: {}", detail);
    }
}
