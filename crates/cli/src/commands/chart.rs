// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Burndown, fix-version burndown and churn charts.

use tix_core::chart::{self, chart_fragment, chart_title, ChartConfig};
use tix_core::{build_query, BuiltQuery, Endpoint};

use crate::client::Source;
use crate::config::Config;
use crate::error::Result;
use crate::panel::Container;

use super::{announce, begin, finish, Output};

const LINE_CANVAS: &str = "lineChart";
const BAR_CANVAS: &str = "barChart";

/// One chart page: where it fetches from and how it draws the response.
struct ChartPage {
    container: Container,
    canvas_id: &'static str,
    endpoint: Endpoint,
    title: String,
    reshape: fn(&str) -> tix_core::Result<ChartConfig>,
}

pub async fn burndown(source: &Source, output: &Output) -> Result<()> {
    let page = ChartPage {
        container: Container::Burndown,
        canvas_id: LINE_CANVAS,
        endpoint: Endpoint::TicketsBurndown,
        title: chart_title(&[], "BURNDOWN"),
        reshape: |body| Ok(chart::burndown_chart(&chart::parse_burndown(body)?)),
    };
    page.render(source, "", output).await
}

pub async fn fix_burndown(
    config: &Config,
    source: &Source,
    raw_query: &str,
    output: &Output,
) -> Result<()> {
    let built = prepare(config, raw_query);
    let page = ChartPage {
        container: Container::Burndown,
        canvas_id: LINE_CANVAS,
        endpoint: Endpoint::FixVersionBurndown,
        title: chart_title(&built.state.project, "BURNDOWN"),
        reshape: |body| Ok(chart::fix_version_burndown(&chart::parse_partitioned(body)?)),
    };
    let api_query = built.api_query(page.endpoint.params());
    page.render(source, &api_query, output).await
}

pub async fn churn(config: &Config, source: &Source, raw_query: &str, output: &Output) -> Result<()> {
    let built = prepare(config, raw_query);
    let page = ChartPage {
        container: Container::Churn,
        canvas_id: BAR_CANVAS,
        endpoint: Endpoint::TicketsChurn,
        title: chart_title(&built.state.project, "CHURN"),
        reshape: |body| Ok(chart::churn(&chart::parse_partitioned(body)?)),
    };
    let api_query = built.api_query(page.endpoint.params());
    page.render(source, &api_query, output).await
}

fn prepare(config: &Config, raw_query: &str) -> BuiltQuery {
    let built = build_query(raw_query, &config.query_defaults());
    announce(&built.page_query);
    built
}

impl ChartPage {
    async fn render(&self, source: &Source, api_query: &str, output: &Output) -> Result<()> {
        begin(self.container, source, output)?;
        let rendered = self.fetch_and_render(source, api_query).await;
        finish(self.container, rendered, output)
    }

    async fn fetch_and_render(&self, source: &Source, api_query: &str) -> Result<String> {
        let body = crate::time_phase!("fetch::chart", source.body(&self.endpoint, api_query).await)?;
        let config = crate::time_phase!("chart::reshape", (self.reshape)(&body))?;
        tracing::debug!(
            endpoint = %self.endpoint,
            labels = config.data.labels.len(),
            datasets = config.data.datasets.len(),
            "chart reshaped"
        );
        Ok(chart_fragment(&self.title, self.canvas_id, &config)?)
    }
}

#[cfg(test)]
#[path = "chart_tests.rs"]
mod tests;
