// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Commit log parsing
//!
//! This module turns the structured export of `git log` into ordered
//! [`CommitRecord`]s. The export uses NUL record separators (`git log
//! -z`) and ASCII unit separators between fields, so multi-line commit
//! bodies survive the round trip.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use redate_git::{GitShell, parser};
//!
//! let shell = GitShell::discover(Path::new(".")).expect("discover repo");
//! let commits = parser::fetch_window(&shell, 10).expect("fetch window");
//!
//! for c in &commits {
//!     println!("{} - {}", c.short_hash, c.subject);
//! }
//! ```

use chrono::DateTime;
use tracing::debug;

use crate::commit::{CommitRecord, Signature};
use crate::error::GitError;
use crate::shell::GitShell;

/// Field separator within one exported record (ASCII unit separator)
pub const FIELD_DELIMITER: char = '\u{1f}';

/// Record separator of the export (`git log -z`)
pub const RECORD_DELIMITER: char = '\0';

/// `--format` string matching the field order [`parse`] expects: full
/// hash, short hash, parent hashes, author name/email/date, committer
/// name/email/date, subject, body
pub const LOG_FORMAT: &str =
    "%H%x1f%h%x1f%P%x1f%an%x1f%ae%x1f%aI%x1f%cn%x1f%ce%x1f%cI%x1f%s%x1f%b";

/// Number of fields in one exported record
const FIELD_COUNT: usize = 11;

/// Fetch the most recent `limit` commits, plus one extra
///
/// The extra commit sits just beyond the operator's view so that an
/// anchor exists even when the oldest visible commit is selected. If the
/// repository holds fewer commits, the window is whatever is available.
///
/// # Errors
///
/// Returns `GitError::CommandFailed` if the log export fails, or any
/// [`parse`] error.
pub fn fetch_window(shell: &GitShell, limit: usize) -> Result<Vec<CommitRecord>, GitError> {
    let count = limit.saturating_add(1).to_string();
    let format = format!("--format={LOG_FORMAT}");
    let raw = shell.run(&["log", "-z", "-n", count.as_str(), format.as_str()])?;
    let commits = parse(&raw, FIELD_DELIMITER, RECORD_DELIMITER)?;
    debug!(limit, fetched = commits.len(), "fetched history window");
    Ok(commits)
}

/// Parse a structured log export into ordered commit records
///
/// The export is split on `record_delimiter` first, then each record on
/// `field_delimiter` into exactly eleven fields; the final body field
/// absorbs any remaining delimiter bytes. A trailing empty record left
/// by the export's terminal delimiter is dropped. `sequence_index`
/// follows export order, 0 being the most recent commit.
///
/// # Errors
///
/// Returns `GitError::UnparseableRecord` if a record does not have the
/// expected shape, or `GitError::UnparseableDate` if a date field is not
/// strict ISO 8601. Both are fatal: partial history is not acceptable to
/// operate on.
pub fn parse(
    raw: &str,
    field_delimiter: char,
    record_delimiter: char,
) -> Result<Vec<CommitRecord>, GitError> {
    let mut records: Vec<&str> = raw.split(record_delimiter).collect();
    while matches!(records.last(), Some(last) if last.trim().is_empty()) {
        records.pop();
    }

    let mut commits = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        // Leading newline between a record and the previous NUL.
        let record = record.strip_prefix('\n').unwrap_or(record);
        let fields: Vec<&str> = record.splitn(FIELD_COUNT, field_delimiter).collect();
        if fields.len() != FIELD_COUNT {
            return Err(GitError::UnparseableRecord {
                detail: format!(
                    "record {index} has {} of {FIELD_COUNT} fields",
                    fields.len()
                ),
            });
        }

        commits.push(CommitRecord {
            full_hash: fields[0].to_string(),
            short_hash: fields[1].to_string(),
            parent_hashes: fields[2].split_whitespace().map(String::from).collect(),
            author: Signature {
                name: fields[3].to_string(),
                email: fields[4].to_string(),
                date: parse_date(fields[5])?,
            },
            committer: Signature {
                name: fields[6].to_string(),
                email: fields[7].to_string(),
                date: parse_date(fields[8])?,
            },
            subject: fields[9].to_string(),
            body: fields[10].trim_end_matches('\n').to_string(),
            sequence_index: index,
            selected: false,
        });
    }

    Ok(commits)
}

fn parse_date(value: &str) -> Result<chrono::DateTime<chrono::FixedOffset>, GitError> {
    DateTime::parse_from_rfc3339(value).map_err(|source| GitError::UnparseableDate {
        value: value.to_string(),
        source,
    })
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn hash_strategy() -> impl Strategy<Value = String> {
        proptest::string::string_regex("[0-9a-f]{40}").expect("valid regex")
    }

    /// Text free of the two delimiters and of newlines (single-line fields)
    fn field_strategy() -> impl Strategy<Value = String> {
        proptest::string::string_regex("[ -~]{1,30}").expect("valid regex")
    }

    /// Body text free of the delimiters but allowed to span lines
    fn body_strategy() -> impl Strategy<Value = String> {
        proptest::string::string_regex("[ -~\n]{0,60}")
            .expect("valid regex")
            .prop_map(|s| s.trim_end_matches('\n').to_string())
    }

    fn render(commit: &CommitRecord) -> String {
        let fd = FIELD_DELIMITER.to_string();
        [
            commit.full_hash.clone(),
            commit.short_hash.clone(),
            commit.parent_hashes.join(" "),
            commit.author.name.clone(),
            commit.author.email.clone(),
            commit.author.date.to_rfc3339(),
            commit.committer.name.clone(),
            commit.committer.email.clone(),
            commit.committer.date.to_rfc3339(),
            commit.subject.clone(),
            commit.body.clone(),
        ]
        .join(&fd)
    }

    fn commit_strategy() -> impl Strategy<Value = CommitRecord> {
        (
            hash_strategy(),
            proptest::collection::vec(hash_strategy(), 0..3),
            field_strategy(),
            field_strategy(),
            body_strategy(),
        )
            .prop_map(|(full_hash, parent_hashes, name, subject, body)| {
                let short_hash = full_hash[..7].to_string();
                let date = chrono::DateTime::parse_from_rfc3339("2024-03-01T10:00:00+02:00")
                    .expect("fixed date");
                let signature = crate::commit::Signature {
                    name,
                    email: "who@example.com".to_string(),
                    date,
                };
                CommitRecord {
                    full_hash,
                    short_hash,
                    parent_hashes,
                    author: signature.clone(),
                    committer: signature,
                    subject,
                    body,
                    sequence_index: 0,
                    selected: false,
                }
            })
    }

    proptest! {
        /// Property: rendering a window and parsing it back preserves
        /// every record
        #[test]
        fn prop_render_parse_roundtrip(
            commits in proptest::collection::vec(commit_strategy(), 1..6)
        ) {
            let raw = commits
                .iter()
                .map(render)
                .collect::<Vec<_>>()
                .join(&RECORD_DELIMITER.to_string());
            let parsed = parse(&raw, FIELD_DELIMITER, RECORD_DELIMITER).expect("parse");

            prop_assert_eq!(parsed.len(), commits.len());
            for (index, (parsed, original)) in parsed.iter().zip(&commits).enumerate() {
                prop_assert_eq!(&parsed.full_hash, &original.full_hash);
                prop_assert_eq!(&parsed.parent_hashes, &original.parent_hashes);
                prop_assert_eq!(&parsed.subject, &original.subject);
                prop_assert_eq!(&parsed.body, &original.body);
                prop_assert_eq!(parsed.sequence_index, index);
            }
        }

        /// Property: arbitrary text never panics the parser
        #[test]
        fn prop_parse_never_panics(raw in ".{0,200}") {
            let _ = parse(&raw, FIELD_DELIMITER, RECORD_DELIMITER);
        }
    }
}
