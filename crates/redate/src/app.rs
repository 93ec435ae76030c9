// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Top-level interactive flow
//!
//! Everything the operator is asked happens before the rewrite session
//! starts; once the queue is built, the mutations replay as a single
//! uninterrupted burst.

use std::path::Path;

use anyhow::Result;
use tracing::{debug, info};

use redate_git::{
    CommitRecord, GitError, GitShell, ReplayEvent, RewriteSession, display_date, parser, plan,
};

use crate::config::Config;
use crate::prompt::{Prompter, TermPrompter};
use crate::strategy::{self, Mode};
use crate::style;

/// Run the whole interactive flow against the repository containing the
/// current directory
///
/// # Errors
///
/// Propagates any failure after the driver's own best-effort session
/// abort; a dirty working tree is reported and returns cleanly.
pub fn run(config: &Config) -> Result<()> {
    let shell = GitShell::discover(Path::new("."))?;
    rewrite(&shell, &TermPrompter, config.count)
}

/// The interactive flow, with the prompter injected
///
/// # Errors
///
/// Same as [`run`].
pub fn rewrite(shell: &GitShell, prompter: &dyn Prompter, count: usize) -> Result<()> {
    let mut session = RewriteSession::new(shell);
    match session.preflight() {
        Err(GitError::DirtyWorkingTree) => {
            println!("{}", style::warning("You have uncommitted changes"));
            return Ok(());
        }
        other => other?,
    }
    session.abort_stale();

    let commits = parser::fetch_window(shell, count)?;
    if commits.is_empty() {
        println!("{}", style::warning("No commits to change"));
        return Ok(());
    }

    // The extra oldest commit is anchor material, never offered; merges
    // cannot be replayed, so they are not offered either.
    let selectable: Vec<&CommitRecord> = commits
        .iter()
        .take(count)
        .filter(|c| !c.is_merge())
        .collect();
    if selectable.is_empty() {
        println!("{}", style::warning("No commits to change"));
        return Ok(());
    }
    let items: Vec<String> = selectable.iter().map(|c| style::commit_line(c)).collect();
    let picked = prompter.select_many("Select commits to change", &items)?;
    let selected_hashes: Vec<String> = picked
        .iter()
        .map(|&index| selectable[index].full_hash.clone())
        .collect();
    debug!(selected = selected_hashes.len(), "selection collected");

    let rewrite_plan = plan::resolve(&commits, &selected_hashes)?;

    let labels: Vec<String> = Mode::ALL.iter().map(|m| m.label().to_string()).collect();
    let mode = Mode::ALL[prompter.select_one("Select manipulation method", &labels)?];
    let actions = strategy::collect_actions(prompter, mode, &rewrite_plan)?;

    session.run(&rewrite_plan, &actions, |event| match event {
        ReplayEvent::Started { anchor, total } => {
            info!(anchor = *anchor, total = *total, "rebase session started");
        }
        ReplayEvent::Amended { action, .. } => {
            let commit = action.commit();
            println!(
                "{}",
                style::replay_line(
                    &commit.short_hash,
                    &commit.subject,
                    &display_date(commit.author.date),
                    &display_date(action.new_date()),
                )
            );
        }
        ReplayEvent::Completed => {}
    })?;

    println!("{}", style::done());
    Ok(())
}
