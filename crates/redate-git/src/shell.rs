// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Shell dialect escaping and git command execution
//!
//! Commands are built as argument token lists and executed directly,
//! never through a shell. The one exception is the substitute sequence
//! editor: git hands `GIT_SEQUENCE_EDITOR` to a shell, so its value is
//! rendered with dialect-specific quoting by [`Dialect::sequence_editor_command`].

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tracing::debug;

use crate::error::GitError;

/// Host shell dialect, which controls the quoting rules for the one raw
/// script this tool produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Bourne-style shells (`sh`, `bash`, ...)
    Posix,
    /// `cmd.exe`
    Windows,
}

impl Dialect {
    /// The dialect of the platform this process runs on
    #[must_use]
    pub fn host() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Posix
        }
    }

    /// Escape one value for embedding in a command line of this dialect
    ///
    /// On POSIX shells, double quotes, backslashes, and semicolons are
    /// backslash-escaped, and a value containing a newline is wrapped in
    /// literal double quotes. On Windows, `%`, parentheses, and `^` are
    /// caret-escaped.
    #[must_use]
    pub fn escape(self, value: &str) -> String {
        match self {
            Self::Posix => {
                let mut escaped = String::with_capacity(value.len());
                for c in value.chars() {
                    if matches!(c, '"' | '\\' | ';') {
                        escaped.push('\\');
                    }
                    escaped.push(c);
                }
                if escaped.contains('\n') {
                    format!("\"{escaped}\"")
                } else {
                    escaped
                }
            }
            Self::Windows => {
                let mut escaped = String::with_capacity(value.len());
                for c in value.chars() {
                    if matches!(c, '%' | '(' | ')' | '^') {
                        escaped.push('^');
                    }
                    escaped.push(c);
                }
                escaped
            }
        }
    }

    /// Separator between statements of this dialect
    #[must_use]
    pub fn statement_separator(self) -> &'static str {
        match self {
            Self::Posix => ";",
            Self::Windows => "\n",
        }
    }

    /// Render instruction lines as a substitute sequence editor command
    ///
    /// Git invokes `$GIT_SEQUENCE_EDITOR <todo-path>` through a shell.
    /// The rendered command is a parenthesized group of `echo`
    /// statements with a trailing `>`, so the appended todo path becomes
    /// the target of a redirection that overwrites the instruction sheet
    /// with exactly the given lines.
    #[must_use]
    pub fn sequence_editor_command(self, lines: &[String]) -> String {
        let body = lines
            .iter()
            .map(|line| format!("echo {}", self.escape(line)))
            .collect::<Vec<_>>()
            .join(self.statement_separator());
        format!("({body})>")
    }
}

/// A repository-rooted runner for the external git binary
#[derive(Debug, Clone)]
pub struct GitShell {
    root: PathBuf,
    dialect: Dialect,
}

impl GitShell {
    /// Create a runner rooted at a known repository path
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            dialect: Dialect::host(),
        }
    }

    /// Find the repository root starting from the given path
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if the path is not inside
    /// a git repository.
    pub fn discover(start: &Path) -> Result<Self, GitError> {
        let output = Command::new("git")
            .args(["rev-parse", "--show-toplevel"])
            .current_dir(start)
            .output()
            .map_err(|source| GitError::Launch {
                command: "git rev-parse --show-toplevel".to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(GitError::RepositoryNotFound {
                path: start.display().to_string(),
            });
        }

        let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(Self::new(root))
    }

    /// The repository root this runner operates in
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The quoting dialect of the host platform
    #[must_use]
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Run a git command and capture its stdout
    ///
    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` (carrying captured stderr) on a
    /// non-zero exit, or `GitError::Launch` if git could not be spawned.
    pub fn run(&self, args: &[&str]) -> Result<String, GitError> {
        self.run_with_env(args, &[])
    }

    /// Run a git command with extra environment variables for this
    /// single invocation
    ///
    /// # Errors
    ///
    /// Same as [`GitShell::run`].
    pub fn run_with_env(
        &self,
        args: &[&str],
        envs: &[(String, String)],
    ) -> Result<String, GitError> {
        debug!(command = %render(args), "running git");
        let output = Command::new("git")
            .args(args)
            .envs(envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .current_dir(&self.root)
            .output()
            .map_err(|source| GitError::Launch {
                command: render(args),
                source,
            })?;
        finish(args, output)
    }

    /// Run a git command, feeding `input` to its stdin
    ///
    /// # Errors
    ///
    /// Same as [`GitShell::run`].
    pub fn run_with_stdin(
        &self,
        args: &[&str],
        envs: &[(String, String)],
        input: &str,
    ) -> Result<String, GitError> {
        debug!(command = %render(args), "running git with stdin");
        let mut child = Command::new("git")
            .args(args)
            .envs(envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .current_dir(&self.root)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| GitError::Launch {
                command: render(args),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(input.as_bytes())
                .map_err(|source| GitError::Launch {
                    command: render(args),
                    source,
                })?;
        }

        let output = child.wait_with_output().map_err(|source| GitError::Launch {
            command: render(args),
            source,
        })?;
        finish(args, output)
    }
}

fn render(args: &[&str]) -> String {
    format!("git {}", args.join(" "))
}

fn finish(args: &[&str], output: Output) -> Result<String, GitError> {
    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    } else {
        Err(GitError::CommandFailed {
            command: render(args),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}
