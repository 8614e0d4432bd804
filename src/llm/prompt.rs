/// Commit types the model is told to choose from
pub const COMMIT_TYPES: [&str; 7] = ["feat", "fix", "docs", "style", "refactor", "test", "chore"];

/// Compose the instruction sent to the model.
///
/// Pure: identical inputs always yield the identical prompt. The diff and log
/// are embedded as opaque text, prefix-truncated to the configured caps.
pub fn compose(diff: &str, log: &str, max_diff_length: usize, max_log_length: usize) -> String {
    format!(
        "Generate a conventional commit message based on:\n\
         Staged changes:\n\
         {}\n\
         Recent commits:\n\
         {}\n\
         \n\
         Commit message format (NO CODEBLOCKS): \"type(scope): description\"\n\
         Common types: {}\n\
         Write summary and details",
        truncate_chars(diff, max_diff_length),
        truncate_chars(log, max_log_length),
        COMMIT_TYPES.join(", "),
    )
}

/// Keep the first `max_chars` characters of `text`.
///
/// Truncation counts characters, not bytes, and may cut mid-line.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
