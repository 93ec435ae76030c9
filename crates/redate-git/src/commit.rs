//! Commit record types

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Format for dates shown in prompts and progress lines
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Format a commit date the way it appears in prompts and progress lines
#[must_use]
pub fn display_date(date: DateTime<FixedOffset>) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// An author or committer identity on one commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Person name
    pub name: String,
    /// Email address
    pub email: String,
    /// Point in time, carrying the timezone offset the commit recorded
    pub date: DateTime<FixedOffset>,
}

/// One entry of the fetched history window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// The full commit hash (40 hex characters)
    pub full_hash: String,
    /// Abbreviated commit hash
    pub short_hash: String,
    /// Ordered parent hashes; empty only for the repository's root commit
    pub parent_hashes: Vec<String>,
    /// Author identity and date
    pub author: Signature,
    /// Committer identity and date
    pub committer: Signature,
    /// First line of the commit message
    pub subject: String,
    /// Remainder of the commit message (may be empty)
    pub body: String,
    /// Position in the fetched window (0 = most recent)
    pub sequence_index: usize,
    /// Whether the operator chose this commit for rewriting; mutated
    /// only during selection, never after
    pub selected: bool,
}

impl CommitRecord {
    /// Validate that a hash is a full 40-character hex string
    #[must_use]
    pub fn is_valid_hash(hash: &str) -> bool {
        hash.len() == 40 && hash.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// Check if this is a merge commit (more than one parent)
    #[must_use]
    pub fn is_merge(&self) -> bool {
        self.parent_hashes.len() > 1
    }

    /// Check if this is the repository's root commit (no parents)
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent_hashes.is_empty()
    }

    /// The author date formatted for display
    #[must_use]
    pub fn display_date(&self) -> String {
        display_date(self.author.date)
    }
}
