use crate::error::GitResult;

/// Field and record separators used in the `git log` format string
/// (%x1f between subject and body, %x1e after each commit).
pub const FIELD_SEP: char = '\x1f';
pub const RECORD_SEP: char = '\x1e';

/// A single commit message: one-line subject plus optional body
#[derive(Debug, Clone, PartialEq)]
pub struct CommitEntry {
    pub subject: String,
    pub body: String,
}

/// Parse git log output with format %s%x1f%b%x1e
pub fn parse_log(output: &str) -> GitResult<Vec<CommitEntry>> {
    let mut commits = Vec::new();

    for record in output.split(RECORD_SEP) {
        // git inserts a newline between records
        let record = record.trim_start_matches('\n');
        if record.is_empty() {
            continue;
        }

        match record.split_once(FIELD_SEP) {
            Some((subject, body)) => commits.push(CommitEntry {
                subject: subject.to_string(),
                body: body.trim_end().to_string(),
            }),
            None => commits.push(CommitEntry {
                subject: record.trim_end().to_string(),
                body: String::new(),
            }),
        }
    }

    Ok(commits)
}
