// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod args;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tix_core::{Endpoint, ParamSet};

pub use args::{InputArgs, QueryArgs};

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

const COMMANDS_HELP: &str = "\
Issue Trees:
  tree          Render the issue forest for a page query
  subtree       Render everything below one issue

Charts:
  burndown      Render the backlog burndown chart
  fix-burndown  Render the burndown per fix version
  churn         Render the churn bar chart

Diagnostics:
  query         Show the normalized page query and backend urls";

const QUICKSTART_HELP: &str = "\
Get started:
  tix tree project=AAH               Issue forest for project AAH
  tix subtree AAH-12 --hide-closed   Open work below AAH-12
  tix churn 'project=AAH&field=status' -o churn.html
  tix tree --input tree.json         Render a saved response offline";

#[derive(Parser)]
#[command(name = "tix")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render issue trees and burndown/churn charts from a ticket tracker backend")]
#[command(
    long_about = "Render issue trees and burndown/churn charts from a ticket tracker backend.\n\n\
    Each command fetches one JSON response and writes an HTML fragment to stdout or --output."
)]
#[command(before_help = COMMANDS_HELP)]
#[command(after_help = QUICKSTART_HELP)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags accepted by every command.
#[derive(Args, Clone, Debug, Default)]
pub struct GlobalArgs {
    /// Backend base url (overrides TIX_SERVER and the config file)
    #[arg(long, global = true, value_name = "URL", value_parser = non_empty_string)]
    pub server: Option<String>,

    /// Config file (default: nearest .tix/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write the fragment to a file instead of stdout
    #[arg(short, long, global = true, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render the issue forest for a page query
    #[command(after_help = "Examples:\n  \
        tix tree                            Default project, closed issues shown\n  \
        tix tree 'project=AAH&showclosed=0' Hide closed root issues\n  \
        tix tree 'key=AAH-12'               Tree the backend builds around AAH-12")]
    Tree {
        #[command(flatten)]
        query: QueryArgs,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Render everything below one issue
    #[command(after_help = "Examples:\n  \
        tix subtree AAH-12                  Full subtree of AAH-12\n  \
        tix subtree AAH-12 --hide-closed    Skip the root when it is closed")]
    Subtree {
        /// Key of the subtree root (e.g. AAH-12)
        #[arg(value_parser = non_empty_string)]
        key: String,

        /// Hide the root issue when its status is closed
        #[arg(long)]
        hide_closed: bool,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Render the backlog burndown chart
    Burndown {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Render the burndown per fix version
    #[command(after_help = "Examples:\n  \
        tix fix-burndown 'project=AAH&version=2.4&version=2.5'")]
    FixBurndown {
        #[command(flatten)]
        query: QueryArgs,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Render the churn bar chart
    #[command(after_help = "Examples:\n  \
        tix churn 'project=AAH&field=status&start=2024-01-01'")]
    Churn {
        #[command(flatten)]
        query: QueryArgs,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Show the normalized page query and backend url without fetching
    Query {
        #[command(flatten)]
        query: QueryArgs,

        /// Backend endpoint the query is prepared for
        #[arg(long, value_enum, default_value = "tree")]
        endpoint: QueryTarget,
    },
}

/// Endpoints that take a page query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum QueryTarget {
    #[default]
    Tree,
    Churn,
    FixBurndown,
}

impl QueryTarget {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            QueryTarget::Tree => Endpoint::TicketsTree,
            QueryTarget::Churn => Endpoint::TicketsChurn,
            QueryTarget::FixBurndown => Endpoint::FixVersionBurndown,
        }
    }

    pub fn params(&self) -> ParamSet {
        self.endpoint().params()
    }
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
