// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Terminal styling
//!
//! Pure string-formatting functions only; nothing here reads state or
//! touches the terminal.

use colored::Colorize;
use redate_git::CommitRecord;

/// One selectable commit line: `(hash) date author subject`
#[must_use]
pub fn commit_line(commit: &CommitRecord) -> String {
    format!(
        "{}{} {} {}",
        format!("({})", commit.short_hash).yellow(),
        commit.display_date().bold(),
        commit.author.name.green().bold(),
        commit.subject
    )
}

/// A per-commit prompt label carrying `(position/total)` progress
#[must_use]
pub fn sequence_label(commit: &CommitRecord, position: usize, total: usize) -> String {
    format!("{} ({position}/{total})", commit_line(commit))
}

/// One replay progress line: `(hash) subject old-date -> new-date`
#[must_use]
pub fn replay_line(short_hash: &str, subject: &str, from: &str, to: &str) -> String {
    format!(
        "{}{} {} -> {}",
        format!("({short_hash})").yellow(),
        subject.bold(),
        from.cyan().bold(),
        to.green().bold()
    )
}

/// An operator-facing warning
#[must_use]
pub fn warning(message: &str) -> String {
    message.red().bold().to_string()
}

/// A dimmed hint below a prompt
#[must_use]
pub fn hint(message: &str) -> String {
    message.dimmed().to_string()
}

/// The closing line of a successful run
#[must_use]
pub fn done() -> String {
    "Done!".yellow().bold().to_string()
}
