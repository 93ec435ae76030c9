// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Sequence-editor synthesis and the rewrite session driver
//!
//! The driver starts one `git rebase -i` anchored at the plan's base,
//! with the instruction sheet overwritten by a synthesized editor
//! command so that the session stops at every visited commit. Each stop
//! is amended according to its deferred action and advanced with
//! `git rebase --continue`. Any failure during the replay aborts the
//! session (best effort) before the error propagates, so the repository
//! returns to its pre-rewrite state instead of being left half rewritten.

use tracing::{debug, info, warn};

use crate::action::{DeferredAction, amend_invocation};
use crate::error::GitError;
use crate::plan::RewritePlan;
use crate::shell::GitShell;

/// Lifecycle of one rewrite session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session has been started
    NotStarted,
    /// The rebase is running and stops are being replayed
    InProgress,
    /// Every visited commit has been replayed
    Completed,
    /// The session was torn down after a failure
    Aborted,
}

/// Progress notifications emitted while replaying the visit list
#[derive(Debug)]
pub enum ReplayEvent<'a> {
    /// The rebase session has been started
    Started {
        /// Short hash of the anchor commit
        anchor: &'a str,
        /// Number of commits the session will visit
        total: usize,
    },
    /// One visited commit has been amended and advanced
    Amended {
        /// The action that was just executed
        action: &'a DeferredAction,
        /// Zero-based position in the visit order
        position: usize,
        /// Number of commits the session visits
        total: usize,
    },
    /// All visited commits have been replayed
    Completed,
}

/// Render the instruction sheet: one `edit` line per visited commit,
/// oldest first
///
/// Commits the operator did not select still get an `edit` line; they
/// are replayed as pass-through stops so that every visited commit
/// advances the session exactly once.
#[must_use]
pub fn instruction_sheet(plan: &RewritePlan) -> Vec<String> {
    plan.visit_list
        .iter()
        .map(|c| format!("edit {}", c.short_hash))
        .collect()
}

/// Drives one non-interactive rebase session
pub struct RewriteSession<'a> {
    shell: &'a GitShell,
    state: SessionState,
}

impl<'a> RewriteSession<'a> {
    /// Create a driver for the given repository
    #[must_use]
    pub fn new(shell: &'a GitShell) -> Self {
        Self {
            shell,
            state: SessionState::NotStarted,
        }
    }

    /// Current lifecycle state
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Refuse to operate on a dirty working tree
    ///
    /// Untracked files do not count; only tracked files with uncommitted
    /// changes block a rewrite.
    ///
    /// # Errors
    ///
    /// Returns `GitError::DirtyWorkingTree` when the tree is dirty, or a
    /// command error if the status query itself fails.
    pub fn preflight(&self) -> Result<(), GitError> {
        let status = self
            .shell
            .run(&["status", "--porcelain", "--untracked-files=no"])?;
        if status.trim().is_empty() {
            Ok(())
        } else {
            Err(GitError::DirtyWorkingTree)
        }
    }

    /// Best-effort abort of a leftover in-progress rebase
    ///
    /// Failing because no rebase was in progress is the normal case and
    /// is tolerated.
    pub fn abort_stale(&self) {
        if let Err(err) = self.shell.run(&["rebase", "--abort"]) {
            debug!(%err, "no stale rebase to abort");
        }
    }

    /// Replay the plan, executing one deferred action per visited commit
    ///
    /// An empty visit list is a no-op: no session is started at all.
    /// Otherwise the rebase is anchored at the plan's base with the
    /// synthesized sequence editor installed, and each stop is amended
    /// and advanced in visit order. `observer` is called once per
    /// lifecycle event so the caller can report progress.
    ///
    /// # Errors
    ///
    /// Returns `GitError::ActionCountMismatch` (before anything starts)
    /// when the queue does not line up with the visit list, or the first
    /// command error encountered during the replay, after the session
    /// has been aborted best-effort.
    pub fn run<F>(
        &mut self,
        plan: &RewritePlan,
        actions: &[DeferredAction],
        mut observer: F,
    ) -> Result<(), GitError>
    where
        F: FnMut(&ReplayEvent<'_>),
    {
        if plan.visit_list.is_empty() {
            info!("empty visit list; no rewrite session started");
            self.state = SessionState::Completed;
            return Ok(());
        }
        if actions.len() != plan.visit_list.len() {
            return Err(GitError::ActionCountMismatch {
                expected: plan.visit_list.len(),
                actual: actions.len(),
            });
        }

        let editor = self
            .shell
            .dialect()
            .sequence_editor_command(&instruction_sheet(plan));
        debug!(anchor = %plan.anchor.short_hash, editor = %editor, "starting rebase session");
        self.shell.run_with_env(
            &["rebase", "-i", &plan.anchor.full_hash],
            &[("GIT_SEQUENCE_EDITOR".to_string(), editor)],
        )?;
        self.state = SessionState::InProgress;

        let total = actions.len();
        observer(&ReplayEvent::Started {
            anchor: &plan.anchor.short_hash,
            total,
        });

        for (position, action) in actions.iter().enumerate() {
            if let Err(err) = self.replay_step(action) {
                warn!(
                    %err,
                    commit = %action.commit().short_hash,
                    "replay failed; aborting session"
                );
                self.abort_after_failure();
                return Err(err);
            }
            observer(&ReplayEvent::Amended {
                action,
                position,
                total,
            });
        }

        self.state = SessionState::Completed;
        info!(total, "rewrite session completed");
        observer(&ReplayEvent::Completed);
        Ok(())
    }

    /// Amend the current stop and advance the session one step
    fn replay_step(&self, action: &DeferredAction) -> Result<(), GitError> {
        let invocation = amend_invocation(action);
        let args: Vec<&str> = invocation.args.iter().map(String::as_str).collect();
        match &invocation.stdin {
            Some(input) => self.shell.run_with_stdin(&args, &invocation.envs, input)?,
            None => self.shell.run_with_env(&args, &invocation.envs)?,
        };
        self.shell.run(&["rebase", "--continue"])?;
        Ok(())
    }

    fn abort_after_failure(&mut self) {
        if let Err(err) = self.shell.run(&["rebase", "--abort"]) {
            warn!(%err, "session abort failed; the repository may still be mid-rebase");
        }
        self.state = SessionState::Aborted;
    }
}
