// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Deferred per-commit rewrite actions
//!
//! A [`DeferredAction`] is plain data: the values one amend will apply,
//! tagged by the strategy that produced it. The queue is built in full
//! while the operator answers prompts, then consumed exactly once by the
//! session driver, in visit order. [`amend_invocation`] is the single
//! interpreter lowering an action to the argv, environment, and stdin of
//! its amend, so the whole queue can be exercised without running git.

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Deserialize, Serialize};

use crate::commit::{CommitRecord, Signature};

/// A replacement commit message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessage {
    /// New first line
    pub subject: String,
    /// New remainder (may be empty)
    pub body: String,
}

impl NewMessage {
    /// Render subject and body the way `git commit -F` expects them
    #[must_use]
    pub fn render(&self) -> String {
        if self.body.is_empty() {
            format!("{}\n", self.subject)
        } else {
            format!("{}\n\n{}\n", self.subject, self.body)
        }
    }
}

/// The original commit values every amend needs to reproduce
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRef {
    /// Abbreviated hash, for display
    pub short_hash: String,
    /// Original subject, for display
    pub subject: String,
    /// Original author
    pub author: Signature,
    /// Original committer
    pub committer: Signature,
}

impl From<&CommitRecord> for CommitRef {
    fn from(commit: &CommitRecord) -> Self {
        Self {
            short_hash: commit.short_hash.clone(),
            subject: commit.subject.clone(),
            author: commit.author.clone(),
            committer: commit.committer.clone(),
        }
    }
}

/// One queued unit of rewrite work, tagged by the mode that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeferredAction {
    /// Replace the author and committer dates (Set, Adjust, and Stretch
    /// all lower to this)
    Retime {
        /// Original commit values
        commit: CommitRef,
        /// The date both author and committer will carry
        date: DateTime<FixedOffset>,
    },
    /// Replace the identity and/or message facets, preserving the dates
    /// (Info mode)
    Reword {
        /// Original commit values
        commit: CommitRef,
        /// Author name after the amend
        author_name: String,
        /// Author email after the amend
        author_email: String,
        /// Whether the identity facet actually changed
        set_author: bool,
        /// Replacement message, present only when that facet changed
        message: Option<NewMessage>,
    },
    /// Replay unchanged, pinning identity and both dates to their
    /// original values so the amend is observably a no-op
    PassThrough {
        /// Original commit values
        commit: CommitRef,
    },
}

impl DeferredAction {
    /// The commit this action applies to
    #[must_use]
    pub fn commit(&self) -> &CommitRef {
        match self {
            Self::Retime { commit, .. }
            | Self::Reword { commit, .. }
            | Self::PassThrough { commit } => commit,
        }
    }

    /// The author date the commit will carry after this action
    #[must_use]
    pub fn new_date(&self) -> DateTime<FixedOffset> {
        match self {
            Self::Retime { date, .. } => *date,
            Self::Reword { commit, .. } | Self::PassThrough { commit } => commit.author.date,
        }
    }
}

/// A fully rendered amend: argv tokens, per-invocation environment, and
/// optional stdin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmendInvocation {
    /// git argument tokens
    pub args: Vec<String>,
    /// Identity and date environment for this single invocation
    pub envs: Vec<(String, String)>,
    /// Message text fed through stdin (`-F -`), when the message changes
    pub stdin: Option<String>,
}

/// Lower a deferred action into the amend it performs
#[must_use]
pub fn amend_invocation(action: &DeferredAction) -> AmendInvocation {
    match action {
        DeferredAction::Retime { commit, date } => {
            let author = Signature {
                date: *date,
                ..commit.author.clone()
            };
            let committer = Signature {
                date: *date,
                ..commit.committer.clone()
            };
            AmendInvocation {
                args: vec![
                    "commit".to_string(),
                    "--amend".to_string(),
                    "--no-edit".to_string(),
                    format!("--date={}", render_date(*date)),
                ],
                envs: identity_env(&author, &committer),
                stdin: None,
            }
        }
        DeferredAction::Reword {
            commit,
            author_name,
            author_email,
            set_author,
            message,
        } => {
            let author = Signature {
                name: author_name.clone(),
                email: author_email.clone(),
                date: commit.author.date,
            };
            let mut args = vec!["commit".to_string(), "--amend".to_string()];
            if *set_author {
                args.push(format!("--author={author_name} <{author_email}>"));
            }
            let stdin = match message {
                Some(message) => {
                    args.push("-F".to_string());
                    args.push("-".to_string());
                    Some(message.render())
                }
                None => {
                    args.push("--no-edit".to_string());
                    None
                }
            };
            AmendInvocation {
                args,
                envs: identity_env(&author, &commit.committer),
                stdin,
            }
        }
        DeferredAction::PassThrough { commit } => AmendInvocation {
            args: vec![
                "commit".to_string(),
                "--amend".to_string(),
                "--no-edit".to_string(),
                format!("--date={}", render_date(commit.author.date)),
            ],
            envs: identity_env(&commit.author, &commit.committer),
            stdin: None,
        },
    }
}

/// The six identity variables git's amend reads, for one invocation
fn identity_env(author: &Signature, committer: &Signature) -> Vec<(String, String)> {
    vec![
        ("GIT_AUTHOR_NAME".to_string(), author.name.clone()),
        ("GIT_AUTHOR_EMAIL".to_string(), author.email.clone()),
        ("GIT_AUTHOR_DATE".to_string(), render_date(author.date)),
        ("GIT_COMMITTER_NAME".to_string(), committer.name.clone()),
        ("GIT_COMMITTER_EMAIL".to_string(), committer.email.clone()),
        ("GIT_COMMITTER_DATE".to_string(), render_date(committer.date)),
    ]
}

fn render_date(date: DateTime<FixedOffset>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, false)
}
