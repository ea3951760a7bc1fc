// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared argument structs for CLI commands.
//!
//! These structs are used with `#[command(flatten)]` across the render
//! commands that take the same page query or saved-response input.

use clap::Args;
use std::path::PathBuf;

/// Page query, as it would appear after `?` in the address bar.
#[derive(Args, Clone, Debug, Default)]
pub struct QueryArgs {
    /// Page query, e.g. "project=AAH&showclosed=0" (leading '?' allowed)
    #[arg(value_name = "QUERY", default_value = "")]
    pub query: String,
}

/// Offline input instead of a backend fetch.
#[derive(Args, Clone, Debug, Default)]
pub struct InputArgs {
    /// Render a saved JSON response instead of fetching from the server
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,
}
