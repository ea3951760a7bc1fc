// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use tix_core::{build_query, render_subtree, Endpoint, IssueMap, QueryDefaults, RenderOptions};

use crate::client::Source;
use crate::config::Config;
use crate::error::Result;
use crate::panel::Container;

use super::{announce, begin, finish, Output};

pub async fn run(
    config: &Config,
    source: &Source,
    key: &str,
    hide_closed: bool,
    output: &Output,
) -> Result<()> {
    // The subtree page is not project scoped; only showclosed applies.
    let raw_query = if hide_closed { "showclosed=0" } else { "" };
    let built = build_query(raw_query, &QueryDefaults::default());
    announce(&built.page_query);

    let mut options = config.render.to_options()?;
    options.show_closed = built.state.show_closed();

    let endpoint = Endpoint::ChildTree(key.to_string());

    begin(Container::Tree, source, output)?;
    let rendered = fetch_and_render(source, &endpoint, key, &options).await;
    finish(Container::Tree, rendered, output)
}

async fn fetch_and_render(
    source: &Source,
    endpoint: &Endpoint,
    key: &str,
    options: &RenderOptions,
) -> Result<String> {
    let body = crate::time_phase!("fetch::subtree", source.body(endpoint, "").await)?;
    let map = crate::time_phase!("parse::issues", IssueMap::from_json(&body))?;
    tracing::debug!(root = key, issues = map.len(), "issue map loaded");
    Ok(crate::time_phase!(
        "render::subtree",
        render_subtree(&map, key, options)
    )?)
}

#[cfg(test)]
#[path = "subtree_tests.rs"]
mod tests;
