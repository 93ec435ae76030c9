// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! redate-git: history rewrite orchestration for redate
//!
//! This library crate turns a structured `git log` export into commit
//! records, resolves an operator selection into a rewrite plan, and
//! drives a non-interactive `git rebase -i` session that replays each
//! visited commit through a queue of deferred amend actions.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use redate_git::{GitShell, RewriteSession, parser, plan};
//!
//! let shell = GitShell::discover(Path::new(".")).expect("discover repo");
//! let commits = parser::fetch_window(&shell, 10).expect("fetch window");
//! let selected = vec![commits[1].full_hash.clone()];
//! let rewrite = plan::resolve(&commits, &selected).expect("resolve plan");
//!
//! let session = RewriteSession::new(&shell);
//! session.preflight().expect("clean working tree");
//! assert_eq!(rewrite.selected_count(), 1);
//! ```

pub mod action;
pub mod commit;
pub mod error;
pub mod parser;
pub mod plan;
pub mod session;
pub mod shell;

pub use action::{AmendInvocation, CommitRef, DeferredAction, NewMessage, amend_invocation};
pub use commit::{CommitRecord, Signature, display_date};
pub use error::GitError;
pub use parser::{FIELD_DELIMITER, LOG_FORMAT, RECORD_DELIMITER, fetch_window, parse};
pub use plan::{RewritePlan, resolve};
pub use session::{ReplayEvent, RewriteSession, SessionState, instruction_sheet};
pub use shell::{Dialect, GitShell};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::action::{CommitRef, DeferredAction, NewMessage};
    pub use crate::commit::{CommitRecord, Signature};
    pub use crate::error::GitError;
    pub use crate::plan::RewritePlan;
    pub use crate::session::{ReplayEvent, RewriteSession, SessionState};
    pub use crate::shell::{Dialect, GitShell};
}
