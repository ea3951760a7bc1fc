// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Nested HTML rendering of issue hierarchies.
//!
//! A render pass walks an [`IssueMap`] from its roots and emits one
//! `<ul class="nested"><li>` container per issue, children nested inside
//! their parent. Children are visited in global issue-key order.
//!
//! The walk is bounded twice over: nodes deeper than the [`DepthCap`]
//! produce nothing, and each key is emitted at most once per pass. Cyclic or
//! dangling `parent_key` links therefore always terminate.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::error::{Error, Result};
use crate::html::escape;
use crate::issue::{IssueMap, IssueRecord};
use crate::key::compare_keys;

/// Default depth cap: levels 0 through 20 are rendered.
pub const DEFAULT_MAX_DEPTH: usize = 20;
/// Largest depth cap accepted by [`DepthCap::new`].
pub const MAX_DEPTH_LIMIT: usize = 256;
/// Background for null or unmapped issue types.
pub const DEFAULT_COLOR: &str = "lightsteelblue";
/// Prefix of the issue detail link; the key is appended.
pub const DEFAULT_LINK_BASE: &str = "/ui/issues/";

const DEFAULT_CLOSED_STATUSES: [&str; 2] = ["Closed", "Release Pending"];

/// Maximum nesting depth of a render pass. Roots sit at depth 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthCap(usize);

impl DepthCap {
    /// Accepts depths in `1..=MAX_DEPTH_LIMIT`.
    pub fn new(depth: usize) -> Result<Self> {
        if depth == 0 || depth > MAX_DEPTH_LIMIT {
            return Err(Error::InvalidOption {
                option: "max_depth",
                reason: format!("must be between 1 and {MAX_DEPTH_LIMIT}, got {depth}"),
            });
        }
        Ok(DepthCap(depth))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for DepthCap {
    fn default() -> Self {
        DepthCap(DEFAULT_MAX_DEPTH)
    }
}

/// Derives the short type code shown next to each issue.
///
/// A few multi-word types get two letters; everything else uses its first
/// letter, uppercased. A null type is `X`.
pub fn type_code(issue_type: Option<&str>) -> String {
    match issue_type {
        None => "X".to_string(),
        Some("Strategic Goal") => "SG".to_string(),
        Some("Sub-task") => "ST".to_string(),
        Some("Feature Request") => "FR".to_string(),
        Some("Spike") => "SP".to_string(),
        Some(other) => other
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default(),
    }
}

/// Background colors keyed by type code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorMap {
    /// Used for null types and codes missing from `by_code`.
    pub default: String,
    pub by_code: BTreeMap<String, String>,
}

impl Default for ColorMap {
    fn default() -> Self {
        let by_code = [
            ("X", "lightsteelblue"),
            ("E", "gold"),
            ("S", "lightblue"),
            ("F", "lightgreen"),
            ("T", "gainsboro"),
            ("B", "lightcoral"),
            ("I", ""),
            ("SG", "skyblue"),
        ]
        .into_iter()
        .map(|(code, color)| (code.to_string(), color.to_string()))
        .collect();
        ColorMap {
            default: DEFAULT_COLOR.to_string(),
            by_code,
        }
    }
}

impl ColorMap {
    pub fn color_for(&self, issue_type: Option<&str>) -> &str {
        match issue_type {
            None => &self.default,
            Some(t) => self
                .by_code
                .get(&type_code(Some(t)))
                .unwrap_or(&self.default),
        }
    }
}

/// Presentation rules for one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Statuses rendered struck through (and hidden as roots when
    /// `show_closed` is off).
    pub closed_statuses: BTreeSet<String>,
    pub colors: ColorMap,
    pub show_fix_versions: bool,
    pub show_status: bool,
    pub show_completed: bool,
    /// When false, roots with a closed status are skipped.
    pub show_closed: bool,
    pub link_base: String,
    pub max_depth: DepthCap,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            closed_statuses: DEFAULT_CLOSED_STATUSES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            colors: ColorMap::default(),
            show_fix_versions: true,
            show_status: false,
            show_completed: true,
            show_closed: true,
            link_base: DEFAULT_LINK_BASE.to_string(),
            max_depth: DepthCap::default(),
        }
    }
}

impl RenderOptions {
    pub fn is_closed(&self, record: &IssueRecord) -> bool {
        self.closed_statuses.contains(&record.status)
    }
}

/// Roots of a forest render, in issue-key order.
///
/// Issues without a parent, or whose parent is missing from the map, are
/// roots. When that leaves nothing (every issue sits in a parent cycle),
/// every issue becomes a root.
///
/// Otherwise issues that no root reaches (cycles, and anything hanging off
/// a cycle) contribute one extra root each: the first such issue in key
/// order, which then pulls in the rest of its cycle.
pub fn forest_roots(map: &IssueMap) -> Vec<&str> {
    let sorted = map.sorted_keys();
    let mut roots: Vec<&str> = sorted
        .iter()
        .copied()
        .filter(|key| match map.get(key).and_then(|r| r.parent_key.as_deref()) {
            None => true,
            Some(parent) => !map.contains_key(parent),
        })
        .collect();

    if roots.is_empty() {
        return sorted;
    }

    let children = child_index(map);
    let mut reached = HashSet::new();
    for &root in &roots {
        mark_reachable(root, &children, &mut reached);
    }
    for &key in &sorted {
        if !reached.contains(key) {
            tracing::debug!(key, "issue unreachable from any root, adding cycle root");
            roots.push(key);
            mark_reachable(key, &children, &mut reached);
        }
    }
    roots.sort_by(|a, b| compare_keys(a, b));
    roots
}

/// Children of each issue, kept in global key order.
fn child_index(map: &IssueMap) -> HashMap<&str, Vec<&str>> {
    let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
    for key in map.sorted_keys() {
        if let Some(parent) = map.get(key).and_then(|r| r.parent_key.as_deref()) {
            children.entry(parent).or_default().push(key);
        }
    }
    children
}

fn mark_reachable<'a>(
    start: &'a str,
    children: &HashMap<&'a str, Vec<&'a str>>,
    reached: &mut HashSet<&'a str>,
) {
    let mut stack = vec![start];
    while let Some(key) = stack.pop() {
        if reached.insert(key) {
            if let Some(kids) = children.get(key) {
                stack.extend(kids.iter().copied());
            }
        }
    }
}

/// Renders every tree of the map.
pub fn render_forest(map: &IssueMap, options: &RenderOptions) -> String {
    let roots = forest_roots(map);
    Walk::new(map, options).render(&roots)
}

/// Renders the tree below a single designated root.
pub fn render_subtree(map: &IssueMap, root_key: &str, options: &RenderOptions) -> Result<String> {
    if !map.contains_key(root_key) {
        return Err(Error::IssueNotFound(root_key.to_string()));
    }
    Ok(Walk::new(map, options).render(&[root_key]))
}

struct Walk<'a> {
    map: &'a IssueMap,
    options: &'a RenderOptions,
    children: HashMap<&'a str, Vec<&'a str>>,
    visited: HashSet<&'a str>,
}

impl<'a> Walk<'a> {
    fn new(map: &'a IssueMap, options: &'a RenderOptions) -> Self {
        Walk {
            map,
            options,
            children: child_index(map),
            visited: HashSet::new(),
        }
    }

    fn render(mut self, roots: &[&'a str]) -> String {
        let (map, options) = (self.map, self.options);
        let mut out = String::from(r#"<ul class="collapsible">"#);
        for &root in roots {
            let Some(record) = map.get(root) else {
                continue;
            };
            if !options.show_closed && options.is_closed(record) {
                tracing::debug!(key = root, status = %record.status, "skipping closed root");
                continue;
            }
            self.node(root, 0, &mut out);
        }
        out.push_str("</ul>");
        out
    }

    fn node(&mut self, key: &'a str, depth: usize, out: &mut String) {
        let (map, options) = (self.map, self.options);
        if depth > options.max_depth.get() {
            tracing::debug!(key, depth, "depth cap reached, subtree truncated");
            return;
        }
        let Some(record) = map.get(key) else {
            return;
        };
        if !self.visited.insert(key) {
            tracing::debug!(key, "issue already rendered, breaking parent cycle");
            return;
        }

        let color = options.colors.color_for(record.issue_type.as_deref());
        let type_title = record.issue_type.as_deref().unwrap_or("");
        out.push_str(&format!(
            r#"<ul class="nested"><li style="background-color: {};">"#,
            escape(color)
        ));
        out.push_str(&format!(
            r#"<span title="{}">({})</span> "#,
            escape(type_title),
            escape(&type_code(record.issue_type.as_deref()))
        ));
        out.push_str(&format!(
            r#"<a href="{}{}" style="color: inherit; text-decoration: none;">{}</a>"#,
            escape(&options.link_base),
            escape(key),
            label(record, options)
        ));
        out.push('\n');

        let children = self.children.get(key).cloned().unwrap_or_default();
        for child in children {
            self.node(child, depth + 1, out);
        }

        out.push_str("</li></ul>");
    }
}

fn label(record: &IssueRecord, options: &RenderOptions) -> String {
    let mut title = format!("[{}]", escape(&record.key));
    if options.show_fix_versions && !record.fix_versions.is_empty() {
        title.push_str(&format!(" (({}))", escape(&record.fix_versions.join(", "))));
    }
    if options.show_status {
        title.push_str(&format!(" ({})", escape(&record.status)));
    }
    if let (true, Some(completed)) = (options.show_completed, record.completed.as_deref()) {
        title.push_str(&format!(" ({})", escape(completed)));
    }
    title.push(' ');
    title.push_str(&escape(&record.summary));

    if options.is_closed(record) {
        format!("<s>{title}</s>")
    } else {
        title
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
