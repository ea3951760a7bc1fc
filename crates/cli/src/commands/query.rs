// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use tix_core::{build_query, AppliedDefault, Param};

use crate::cli::QueryTarget;
use crate::config::Config;
use crate::error::Result;

use super::Output;

/// Prints the normalized page query, the backend url and the defaults that
/// fired. Nothing is fetched.
pub fn run(
    config: &Config,
    server: Option<&str>,
    raw_query: &str,
    target: QueryTarget,
    output: &Output,
) -> Result<()> {
    let built = build_query(raw_query, &config.query_defaults());
    let endpoint = target.endpoint();
    let api_query = built.api_query(endpoint.params());
    let url = endpoint.url(&config.server_url(server)?, &api_query)?;

    let mut lines = vec![
        format!("page: ?{}", built.page_query),
        format!("api: {}", url),
    ];
    for default in &built.applied {
        let param = match default {
            AppliedDefault::Project => Param::Project,
            AppliedDefault::ShowClosed => Param::ShowClosed,
        };
        let value = built.state.values(param).first().copied().unwrap_or_default();
        lines.push(format!("default: {}={}", param, value));
    }
    output.write(&lines.join("\n"))
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
