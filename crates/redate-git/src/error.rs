// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for redate-git

use thiserror::Error;

/// Errors that can occur while orchestrating a history rewrite
#[derive(Debug, Error)]
pub enum GitError {
    /// A git invocation could not be spawned at all
    #[error("failed to launch `{command}`: {source}")]
    Launch {
        /// The command line that failed to start
        command: String,
        /// The underlying spawn error
        #[source]
        source: std::io::Error,
    },

    /// A git invocation exited non-zero
    #[error("`{command}` failed: {stderr}")]
    CommandFailed {
        /// The command line that was run
        command: String,
        /// Captured standard error output
        stderr: String,
    },

    /// Repository not found at the specified path
    #[error("not a git repository (searched from '{path}')")]
    RepositoryNotFound {
        /// The path that was searched for a repository
        path: String,
    },

    /// Tracked files have uncommitted changes
    #[error("the working tree has uncommitted changes")]
    DirtyWorkingTree,

    /// A record in the log export did not have the expected shape
    #[error("unparseable log record: {detail}")]
    UnparseableRecord {
        /// What was wrong with the record
        detail: String,
    },

    /// A date field in the log export could not be parsed
    #[error("unparseable date '{value}': {source}")]
    UnparseableDate {
        /// The date text as exported
        value: String,
        /// The underlying parse error
        #[source]
        source: chrono::ParseError,
    },

    /// The earliest selected commit has no preceding commit in the window
    #[error("the earliest selected commit has no usable ancestor in the fetched window")]
    NoUsableAncestor,

    /// The deferred action queue does not line up with the visit list
    #[error("expected {expected} deferred actions for the visit list, got {actual}")]
    ActionCountMismatch {
        /// Number of commits the session will visit
        expected: usize,
        /// Number of queued actions
        actual: usize,
    },
}
