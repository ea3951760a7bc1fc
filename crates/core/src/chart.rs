// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Reshaping of burndown and churn time series into chart configurations.
//!
//! The backend returns counts keyed by date, optionally partitioned by
//! category, fix version or field value. The configurations produced here
//! follow the charting library's `{type, data: {labels, datasets}, options}`
//! shape and are embedded verbatim into the page.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::Result;
use crate::html::escape;

/// Counts keyed by date string.
pub type TimeSeries = BTreeMap<String, i64>;

/// Time series keyed by partition name (category, version or field value).
pub type PartitionedSeries = BTreeMap<String, TimeSeries>;

/// Fixed dataset colors, cycled in partition order.
pub const PALETTE: [&str; 10] = [
    "rgb(75, 192, 192)",
    "rgb(255, 99, 132)",
    "rgb(54, 162, 235)",
    "rgb(255, 159, 64)",
    "rgb(153, 102, 255)",
    "rgb(255, 205, 86)",
    "rgb(201, 203, 207)",
    "rgb(46, 139, 87)",
    "rgb(220, 20, 60)",
    "rgb(106, 90, 205)",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
}

/// One value of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DataPoint {
    Count(i64),
    /// Point on a time axis, `x` in milliseconds since the epoch.
    Timed { x: i64, y: i64 },
    /// Point whose date could not be parsed; the raw label is kept.
    Labeled { x: String, y: i64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<DataPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

/// Label of the backlog line in burndown charts.
pub const BACKLOG_LABEL: &str = "backlog count";

/// Burndown category holding the running backlog.
const BACKLOG_CATEGORY: &str = "backlog";

/// A count as served by the backend.
///
/// Series built from data frames carry floats (`3.0`) and nulls where an
/// outer merge left a gap. Floats are rounded and null counts as 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RawCount(i64);

impl<'de> Deserialize<'de> for RawCount {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<f64>::deserialize(deserializer)?;
        Ok(RawCount(value.map(|v| v.round() as i64).unwrap_or(0)))
    }
}

fn counts(raw: BTreeMap<String, RawCount>) -> TimeSeries {
    raw.into_iter().map(|(date, RawCount(n))| (date, n)).collect()
}

fn partitions(raw: BTreeMap<String, BTreeMap<String, RawCount>>) -> PartitionedSeries {
    raw.into_iter()
        .map(|(name, series)| (name, counts(series)))
        .collect()
}

/// Burndown response: a single backlog series or one series per category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BurndownSeries {
    Flat(TimeSeries),
    /// Keyed by category (`backlog`, `opened`, `closed`, `moved_in`, ...).
    ByCategory(PartitionedSeries),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBurndown {
    Flat(BTreeMap<String, RawCount>),
    ByCategory(BTreeMap<String, BTreeMap<String, RawCount>>),
}

pub fn parse_series(body: &str) -> Result<TimeSeries> {
    Ok(counts(serde_json::from_str(body)?))
}

pub fn parse_partitioned(body: &str) -> Result<PartitionedSeries> {
    Ok(partitions(serde_json::from_str(body)?))
}

/// Accepts both burndown response shapes.
pub fn parse_burndown(body: &str) -> Result<BurndownSeries> {
    Ok(match serde_json::from_str(body)? {
        RawBurndown::Flat(raw) => BurndownSeries::Flat(counts(raw)),
        RawBurndown::ByCategory(raw) => BurndownSeries::ByCategory(partitions(raw)),
    })
}

/// Chart for either burndown shape.
pub fn burndown_chart(series: &BurndownSeries) -> ChartConfig {
    match series {
        BurndownSeries::Flat(series) => burndown(series),
        BurndownSeries::ByCategory(series) => category_burndown(series),
    }
}

/// Single-line backlog chart over an unpartitioned series.
pub fn burndown(series: &TimeSeries) -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Line,
        data: ChartData {
            labels: series.keys().cloned().collect(),
            datasets: vec![Dataset {
                label: BACKLOG_LABEL.to_string(),
                data: series.values().copied().map(DataPoint::Count).collect(),
                fill: Some(false),
                border_color: Some(PALETTE[0].to_string()),
                background_color: None,
                tension: Some(0.1),
            }],
        },
        options: None,
    }
}

/// One line per burndown category over the union of dates.
///
/// The backlog line comes first and keeps its single-series label; the
/// other categories follow in name order. Missing dates count as 0.
pub fn category_burndown(series: &PartitionedSeries) -> ChartConfig {
    let labels = union_dates(series);
    let ordered = series
        .get_key_value(BACKLOG_CATEGORY)
        .into_iter()
        .chain(series.iter().filter(|(name, _)| name.as_str() != BACKLOG_CATEGORY));
    let datasets = ordered
        .enumerate()
        .map(|(idx, (name, counts))| Dataset {
            label: if name == BACKLOG_CATEGORY {
                BACKLOG_LABEL.to_string()
            } else {
                name.clone()
            },
            data: labels
                .iter()
                .map(|date| DataPoint::Count(counts.get(date).copied().unwrap_or(0)))
                .collect(),
            fill: Some(false),
            border_color: Some(PALETTE[idx % PALETTE.len()].to_string()),
            background_color: None,
            tension: Some(0.1),
        })
        .collect();

    ChartConfig {
        kind: ChartKind::Line,
        data: ChartData { labels, datasets },
        options: None,
    }
}

/// One line per fix version on a monthly time axis.
///
/// All versions share the sorted union of dates; a version without a
/// count on some date contributes 0 there.
pub fn fix_version_burndown(series: &PartitionedSeries) -> ChartConfig {
    let labels = union_dates(series);
    let datasets = series
        .iter()
        .enumerate()
        .map(|(idx, (version, counts))| Dataset {
            label: format!("Version {version}"),
            data: labels
                .iter()
                .map(|date| {
                    let y = counts.get(date).copied().unwrap_or(0);
                    match date_millis(date) {
                        Some(x) => DataPoint::Timed { x, y },
                        None => DataPoint::Labeled {
                            x: date.clone(),
                            y,
                        },
                    }
                })
                .collect(),
            fill: Some(false),
            border_color: Some(PALETTE[idx % PALETTE.len()].to_string()),
            background_color: None,
            tension: Some(0.1),
        })
        .collect();

    ChartConfig {
        kind: ChartKind::Line,
        data: ChartData { labels, datasets },
        options: Some(json!({
            "scales": {
                "x": {
                    "type": "time",
                    "time": { "unit": "month" },
                    "title": { "display": true, "text": "Date" }
                },
                "y": {
                    "title": { "display": true, "text": "Count" }
                }
            }
        })),
    }
}

/// Bar chart with one dataset per partition (category or field value).
pub fn churn(series: &PartitionedSeries) -> ChartConfig {
    let labels = union_dates(series);
    let datasets = series
        .iter()
        .enumerate()
        .map(|(idx, (name, counts))| Dataset {
            label: name.clone(),
            data: labels
                .iter()
                .map(|date| DataPoint::Count(counts.get(date).copied().unwrap_or(0)))
                .collect(),
            fill: None,
            border_color: None,
            background_color: Some(PALETTE[idx % PALETTE.len()].to_string()),
            tension: None,
        })
        .collect();

    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData { labels, datasets },
        options: Some(json!({ "responsive": true })),
    }
}

/// Heading for a chart panel: the projects joined by `/`, then the kind.
pub fn chart_title(projects: &[String], kind: &str) -> String {
    let joined = projects.join("/");
    if joined.is_empty() {
        kind.to_string()
    } else {
        format!("{joined} {kind}")
    }
}

/// Heading, canvas and bootstrap script for one chart.
pub fn chart_fragment(title: &str, canvas_id: &str, config: &ChartConfig) -> Result<String> {
    // `</` would end the script element early.
    let json = serde_json::to_string(config)?.replace("</", "<\\/");
    let canvas_id = escape(canvas_id);
    Ok(format!(
        "<h1>{title}</h1><canvas id=\"{canvas_id}\"></canvas>\
         <script>new Chart(document.getElementById(\"{canvas_id}\").getContext(\"2d\"), {json});</script>",
        title = escape(title),
    ))
}

fn union_dates(series: &PartitionedSeries) -> Vec<String> {
    series
        .values()
        .flat_map(|counts| counts.keys().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Milliseconds since the epoch for `YYYY-MM-DD` and ISO date-time labels.
///
/// Date-times may carry fractional seconds and a `Z` or numeric offset.
/// Labels without an offset are read as UTC.
fn date_millis(label: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(label) {
        return Some(dt.timestamp_millis());
    }
    let naive = NaiveDate::parse_from_str(label, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .or_else(|| {
            let local = label.strip_suffix('Z').unwrap_or(label);
            NaiveDateTime::parse_from_str(local, "%Y-%m-%dT%H:%M:%S%.f").ok()
        })?;
    Some(Utc.from_utc_datetime(&naive).timestamp_millis())
}

#[cfg(test)]
#[path = "chart_tests.rs"]
mod tests;
