// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! redate: interactively rewrite the dates, authors, and messages of
//! recent commits
//!
//! The binary collects every choice through interactive prompts, then
//! replays the rewrite through a scripted `git rebase -i` session. On
//! any failure the session is aborted so the repository returns to its
//! pre-rewrite state.

use clap::Parser;

use redate::app;
use redate::config::Config;
use redate::style;

fn main() {
    let config = Config::parse();

    // Logs go to stderr; stdout belongs to the prompts.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    if let Err(err) = app::run(&config) {
        eprintln!("{}", style::warning(&format!("{err:#}")));
        std::process::exit(1);
    }
}
