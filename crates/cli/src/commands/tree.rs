// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use tix_core::{build_query, render_forest, Endpoint, IssueMap, RenderOptions};

use crate::client::Source;
use crate::config::Config;
use crate::error::Result;
use crate::panel::Container;

use super::{announce, begin, finish, Output};

pub async fn run(config: &Config, source: &Source, raw_query: &str, output: &Output) -> Result<()> {
    let built = build_query(raw_query, &config.query_defaults());
    for default in &built.applied {
        tracing::debug!(?default, "applied query default");
    }
    announce(&built.page_query);

    let mut options = config.render.to_options()?;
    options.show_closed = built.state.show_closed();

    let endpoint = Endpoint::TicketsTree;
    let api_query = built.api_query(endpoint.params());

    begin(Container::Tree, source, output)?;
    let rendered = fetch_and_render(source, &endpoint, &api_query, &options).await;
    finish(Container::Tree, rendered, output)
}

async fn fetch_and_render(
    source: &Source,
    endpoint: &Endpoint,
    api_query: &str,
    options: &RenderOptions,
) -> Result<String> {
    let body = crate::time_phase!("fetch::tree", source.body(endpoint, api_query).await)?;
    let map = crate::time_phase!("parse::issues", IssueMap::from_json(&body))?;
    tracing::debug!(
        issues = map.len(),
        quarantined = map.quarantined().len(),
        "issue map loaded"
    );
    Ok(crate::time_phase!("render::forest", render_forest(&map, options)))
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
