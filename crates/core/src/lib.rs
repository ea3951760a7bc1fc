// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tix-core: Shared library for the tix renderer
//!
//! This crate provides the issue data model, query normalization, the tree
//! renderer and chart reshaping used by the tix CLI. It performs no I/O.

pub mod chart;
pub mod endpoint;
pub mod error;
pub mod html;
pub mod issue;
pub mod key;
pub mod query;
pub mod render;

pub use chart::{BurndownSeries, ChartConfig, PartitionedSeries, TimeSeries};
pub use endpoint::Endpoint;
pub use error::{Error, Result};
pub use issue::{IssueMap, IssueRecord, Quarantined};
pub use key::{compare_keys, sort_keys, IssueKey};
pub use query::{build_query, AppliedDefault, BuiltQuery, Param, ParamSet, QueryDefaults, QueryState};
pub use render::{render_forest, render_subtree, ColorMap, DepthCap, RenderOptions};
