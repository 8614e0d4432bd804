pub mod report;
pub mod sink;

pub use report::{ConsoleNotifier, Notifier};
pub use sink::{CommitMessageSink, EditMsgSink, SinkError};
