// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Issue records as served by the tracker backend.
//!
//! The backend returns a JSON object keyed by issue key. Each entry is
//! validated into an [`IssueRecord`] here; entries that don't fit are
//! quarantined rather than rendered with missing fields.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::key::sort_keys;

/// A single issue in a tree response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRecord {
    /// Issue key (`PREFIX-NUMBER`). Filled from the map key when absent.
    #[serde(default)]
    pub key: String,
    /// Issue category such as "Bug" or "Epic", if the backend knows it.
    #[serde(rename = "type", default)]
    pub issue_type: Option<String>,
    /// Workflow status, e.g. "Closed" or "In Progress".
    #[serde(deserialize_with = "string_or_null")]
    pub status: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub summary: String,
    /// Key of the parent issue. May name an issue missing from the map.
    #[serde(default)]
    pub parent_key: Option<String>,
    #[serde(default, deserialize_with = "list_or_null")]
    pub fix_versions: Vec<String>,
    /// Completion marker (usually a date) for finished work.
    #[serde(default)]
    pub completed: Option<String>,
}

impl IssueRecord {
    /// Creates a record with only the required fields set.
    pub fn new(key: impl Into<String>, status: impl Into<String>) -> Self {
        IssueRecord {
            key: key.into(),
            issue_type: None,
            status: status.into(),
            summary: String::new(),
            parent_key: None,
            fix_versions: Vec::new(),
            completed: None,
        }
    }

    pub fn with_type(mut self, issue_type: impl Into<String>) -> Self {
        self.issue_type = Some(issue_type.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_parent(mut self, parent_key: impl Into<String>) -> Self {
        self.parent_key = Some(parent_key.into());
        self
    }

    pub fn with_fix_versions<I, S>(mut self, versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fix_versions = versions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_completed(mut self, completed: impl Into<String>) -> Self {
        self.completed = Some(completed.into());
        self
    }
}

fn string_or_null<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn list_or_null<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// An entry that failed validation at the API boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quarantined {
    pub key: String,
    pub reason: String,
}

/// All issues of one render pass, keyed by issue key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueMap {
    issues: BTreeMap<String, IssueRecord>,
    quarantined: Vec<Quarantined>,
}

impl IssueMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a backend response body.
    ///
    /// Fails only when the body is not a JSON object. Individual entries
    /// that don't validate end up in [`IssueMap::quarantined`].
    pub fn from_json(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(entries) = value else {
            return Err(Error::UnexpectedShape {
                expected: "issues keyed by issue key",
            });
        };

        let mut map = IssueMap::new();
        for (key, entry) in entries {
            match validate_entry(&key, entry) {
                Ok(record) => {
                    map.issues.insert(key, record);
                }
                Err(e) => {
                    let reason = match e {
                        Error::InvalidRecord { reason, .. } => reason,
                        other => other.to_string(),
                    };
                    tracing::warn!(key = %key, reason = %reason, "quarantined issue record");
                    map.quarantined.push(Quarantined { key, reason });
                }
            }
        }
        Ok(map)
    }

    /// Inserts a record under its own key, replacing any previous one.
    pub fn insert(&mut self, record: IssueRecord) -> Option<IssueRecord> {
        self.issues.insert(record.key.clone(), record)
    }

    pub fn get(&self, key: &str) -> Option<&IssueRecord> {
        self.issues.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.issues.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &IssueRecord)> {
        self.issues.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// All keys in issue-key order (see [`crate::key::compare_keys`]).
    pub fn sorted_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.issues.keys().map(String::as_str).collect();
        sort_keys(&mut keys);
        keys
    }

    /// Entries rejected while parsing, in response order.
    pub fn quarantined(&self) -> &[Quarantined] {
        &self.quarantined
    }
}

impl FromIterator<IssueRecord> for IssueMap {
    fn from_iter<T: IntoIterator<Item = IssueRecord>>(iter: T) -> Self {
        let mut map = IssueMap::new();
        for record in iter {
            map.insert(record);
        }
        map
    }
}

fn validate_entry(key: &str, entry: Value) -> Result<IssueRecord> {
    let mut record: IssueRecord =
        serde_json::from_value(entry).map_err(|e| Error::InvalidRecord {
            key: key.to_string(),
            reason: e.to_string(),
        })?;

    if record.key.is_empty() {
        record.key = key.to_string();
    } else if record.key != key {
        return Err(Error::InvalidRecord {
            key: key.to_string(),
            reason: format!("record key '{}' does not match map key", record.key),
        });
    }

    Ok(record)
}

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;
