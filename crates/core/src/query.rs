// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Query building: page parameters in, normalized page query and backend
//! query string out.
//!
//! The page query plays the role of the browser address bar. Defaults that
//! fire are written back into it so that building again from the
//! normalized query yields the same result and applies nothing new.

use serde::Serialize;
use std::fmt;
use url::form_urlencoded;

/// Default for `showclosed` when the page query leaves it out.
pub const DEFAULT_SHOW_CLOSED: &str = "1";

/// A recognized page parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Param {
    Project,
    Key,
    ShowClosed,
    Progress,
    Version,
    Start,
    End,
    Frequency,
    Field,
}

impl Param {
    pub const ALL: [Param; 9] = [
        Param::Project,
        Param::Key,
        Param::ShowClosed,
        Param::Progress,
        Param::Version,
        Param::Start,
        Param::End,
        Param::Frequency,
        Param::Field,
    ];

    /// Name of the parameter in the page query.
    pub fn name(&self) -> &'static str {
        match self {
            Param::Project => "project",
            Param::Key => "key",
            Param::ShowClosed => "showclosed",
            Param::Progress => "progress",
            Param::Version => "version",
            Param::Start => "start",
            Param::End => "end",
            Param::Frequency => "frequency",
            Param::Field => "field",
        }
    }

    pub fn from_name(name: &str) -> Option<Param> {
        Param::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Whether the parameter may appear more than once.
    pub fn is_repeatable(&self) -> bool {
        matches!(self, Param::Project | Param::Version | Param::Field)
    }

    /// Name the backend expects for this parameter.
    pub fn api_name(&self) -> &'static str {
        match self {
            Param::ShowClosed => "closed",
            other => other.name(),
        }
    }

    /// Value as sent to the backend. Page flags are `1`/`0`, the backend
    /// takes `true`/`false`; anything else passes through untouched.
    pub fn api_value<'a>(&self, value: &'a str) -> &'a str {
        match (self, value) {
            (Param::ShowClosed | Param::Progress, "1") => "true",
            (Param::ShowClosed | Param::Progress, "0") => "false",
            _ => value,
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The parameters an endpoint accepts, in the order they are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSet(&'static [Param]);

impl ParamSet {
    pub const NONE: ParamSet = ParamSet(&[]);
    pub const TREE: ParamSet = ParamSet(&[
        Param::Key,
        Param::Project,
        Param::ShowClosed,
        Param::Progress,
    ]);
    pub const CHURN: ParamSet = ParamSet(&[Param::Project, Param::Field, Param::Start, Param::End]);
    pub const FIX_BURNDOWN: ParamSet = ParamSet(&[
        Param::Project,
        Param::Version,
        Param::Start,
        Param::End,
        Param::Frequency,
    ]);
    pub const ALL: ParamSet = ParamSet(&Param::ALL);

    pub fn params(&self) -> &'static [Param] {
        self.0
    }

    pub fn contains(&self, param: Param) -> bool {
        self.0.contains(&param)
    }
}

/// Recognized parameters read from the page query.
///
/// Single-valued parameters keep their first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryState {
    pub project: Vec<String>,
    pub key: Option<String>,
    pub showclosed: Option<String>,
    pub progress: Option<String>,
    pub version: Vec<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub frequency: Option<String>,
    pub field: Vec<String>,
}

impl QueryState {
    fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut state = QueryState::default();
        for (name, value) in pairs {
            let Some(param) = Param::from_name(name) else {
                continue;
            };
            let value = value.clone();
            match param {
                Param::Project => state.project.push(value),
                Param::Version => state.version.push(value),
                Param::Field => state.field.push(value),
                Param::Key => {
                    state.key.get_or_insert(value);
                }
                Param::ShowClosed => {
                    state.showclosed.get_or_insert(value);
                }
                Param::Progress => {
                    state.progress.get_or_insert(value);
                }
                Param::Start => {
                    state.start.get_or_insert(value);
                }
                Param::End => {
                    state.end.get_or_insert(value);
                }
                Param::Frequency => {
                    state.frequency.get_or_insert(value);
                }
            }
        }
        state
    }

    /// Every value present for `param`, in page order.
    pub fn values(&self, param: Param) -> Vec<&str> {
        fn single(v: &Option<String>) -> Vec<&str> {
            v.as_deref().into_iter().collect()
        }
        fn many(v: &[String]) -> Vec<&str> {
            v.iter().map(String::as_str).collect()
        }
        match param {
            Param::Project => many(&self.project),
            Param::Version => many(&self.version),
            Param::Field => many(&self.field),
            Param::Key => single(&self.key),
            Param::ShowClosed => single(&self.showclosed),
            Param::Progress => single(&self.progress),
            Param::Start => single(&self.start),
            Param::End => single(&self.end),
            Param::Frequency => single(&self.frequency),
        }
    }

    /// Closed issues are shown unless `showclosed` is exactly `0`.
    pub fn show_closed(&self) -> bool {
        self.showclosed.as_deref() != Some("0")
    }
}

/// Request-scoped defaults for the query builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDefaults {
    /// Project injected when the page names none.
    pub project: Option<String>,
    pub show_closed: String,
}

impl Default for QueryDefaults {
    fn default() -> Self {
        QueryDefaults {
            project: None,
            show_closed: DEFAULT_SHOW_CLOSED.to_string(),
        }
    }
}

impl QueryDefaults {
    pub fn with_project(project: impl Into<String>) -> Self {
        QueryDefaults {
            project: Some(project.into()),
            ..Default::default()
        }
    }
}

/// A default that fired during [`build_query`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AppliedDefault {
    Project,
    ShowClosed,
}

/// Result of [`build_query`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltQuery {
    pub state: QueryState,
    /// Normalized page query, without the leading `?`.
    pub page_query: String,
    pub applied: Vec<AppliedDefault>,
}

impl BuiltQuery {
    /// Serializes the backend query string for an endpoint, without `?`.
    pub fn api_query(&self, accepted: ParamSet) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for param in accepted.params() {
            for value in self.state.values(*param) {
                serializer.append_pair(param.api_name(), param.api_value(value));
            }
        }
        serializer.finish()
    }
}

/// Decodes a raw page query (`?` prefix optional) into name/value pairs.
pub fn parse_pairs(raw: &str) -> Vec<(String, String)> {
    let raw = raw.strip_prefix('?').unwrap_or(raw);
    form_urlencoded::parse(raw.as_bytes()).into_owned().collect()
}

/// Reads a page query, applies defaults and prepares the normalized query.
pub fn build_query(raw: &str, defaults: &QueryDefaults) -> BuiltQuery {
    let mut pairs = parse_pairs(raw);
    let mut applied = Vec::new();

    let has_project = pairs.iter().any(|(n, _)| n == Param::Project.name());
    if let (false, Some(project)) = (has_project, defaults.project.as_ref()) {
        pairs.push((Param::Project.name().to_string(), project.clone()));
        applied.push(AppliedDefault::Project);
    }

    let show_closed_name = Param::ShowClosed.name();
    let first_show_closed = pairs.iter().position(|(n, _)| n == show_closed_name);
    match first_show_closed {
        Some(idx) if !pairs[idx].1.is_empty() => {}
        Some(idx) => {
            // The first entry takes the value; later duplicates are dropped.
            pairs[idx].1 = defaults.show_closed.clone();
            let mut seen = 0usize;
            pairs.retain(|(n, _)| {
                if n != show_closed_name {
                    return true;
                }
                seen += 1;
                seen == 1
            });
            applied.push(AppliedDefault::ShowClosed);
        }
        None => {
            pairs.push((show_closed_name.to_string(), defaults.show_closed.clone()));
            applied.push(AppliedDefault::ShowClosed);
        }
    }

    let page_query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter())
        .finish();

    BuiltQuery {
        state: QueryState::from_pairs(&pairs),
        page_query,
        applied,
    }
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
