// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tixrs - Issue tree and chart renderer for a ticket tracker backend.
//!
//! This crate provides the I/O layer of the `tix` CLI tool: configuration,
//! the HTTP client and the commands that turn one backend response into an
//! HTML fragment. Parsing and rendering live in `tix-core`.
//!
//! # Main Components
//!
//! - [`Config`] - Backend url, default project and render settings
//! - [`Client`] - Async HTTP access to the backend endpoints
//! - [`panel`] - Output containers with loading, ready and error states
//! - [`Error`] - Error types for all operations
//!
//! # Running a command
//!
//! ```rust,ignore
//! use clap::Parser;
//! use tixrs::Cli;
//!
//! let cli = Cli::parse_from(["tix", "tree", "project=AAH", "--input", "tree.json"]);
//! tixrs::run(cli).await?;
//! ```

mod cli;
pub mod client;
mod commands;
mod env;
pub mod panel;
pub mod timings;

pub mod config;
pub mod error;

pub use cli::{Cli, Command, GlobalArgs, InputArgs, QueryArgs, QueryTarget};
pub use client::{Client, Source};
pub use commands::Output;
pub use config::Config;
pub use error::{Error, Result};

use std::path::PathBuf;

/// Picks the saved response when one is given, the backend otherwise.
fn source(config: &Config, global: &GlobalArgs, input: Option<PathBuf>) -> Result<Source> {
    match input {
        Some(path) => Ok(Source::File(path)),
        None => {
            let base = config.server_url(global.server.as_deref())?;
            tracing::debug!(server = %base, timeout = ?config.timeout(), "using backend");
            Ok(Source::Remote(Client::new(base, config.timeout())?))
        }
    }
}

/// Execute a CLI command. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub async fn run(cli: Cli) -> Result<()> {
    let Cli { global, command } = cli;
    let config = crate::time_phase!("config::resolve", Config::resolve(global.config.as_deref()))?;
    let output = Output::new(global.output.clone());

    match command {
        Command::Tree { query, input } => {
            let source = source(&config, &global, input.input)?;
            commands::tree::run(&config, &source, &query.query, &output).await
        }
        Command::Subtree {
            key,
            hide_closed,
            input,
        } => {
            let source = source(&config, &global, input.input)?;
            commands::subtree::run(&config, &source, &key, hide_closed, &output).await
        }
        Command::Burndown { input } => {
            let source = source(&config, &global, input.input)?;
            commands::chart::burndown(&source, &output).await
        }
        Command::FixBurndown { query, input } => {
            let source = source(&config, &global, input.input)?;
            commands::chart::fix_burndown(&config, &source, &query.query, &output).await
        }
        Command::Churn { query, input } => {
            let source = source(&config, &global, input.input)?;
            commands::chart::churn(&config, &source, &query.query, &output).await
        }
        Command::Query { query, endpoint } => commands::query::run(
            &config,
            global.server.as_deref(),
            &query.query,
            endpoint,
            &output,
        ),
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
