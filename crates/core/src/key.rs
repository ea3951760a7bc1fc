// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Issue key parsing and ordering.
//!
//! Keys have the form `PREFIX-NUMBER` (e.g. `AAH-123`). They order by
//! prefix first and then numerically by suffix, so `AAH-2` sorts before
//! `AAH-10`. Keys that don't match the pattern still get a place in the
//! order: after every well-formed key, compared lexically.
//!
//! The pattern must match the whole key: `see AAH-1` or `AAH-1x` are
//! malformed. Suffixes of any length are well-formed; they compare as
//! digit strings, so no suffix is too large to order.

use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

use crate::error::{Error, Result};

// Hard-coded pattern, exercised by the key tests.
static KEY_RE: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"^([A-Z]+)-([0-9]+)$") {
    Ok(re) => re,
    Err(_) => unreachable!("static regex pattern"),
});

/// A parsed `PREFIX-NUMBER` issue key borrowing from its source string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueKey<'a> {
    prefix: &'a str,
    /// Suffix digits without leading zeros (`"0"` for an all-zero suffix).
    digits: &'a str,
}

impl<'a> IssueKey<'a> {
    /// Parses a key, rejecting anything outside `[A-Z]+-[0-9]+`.
    pub fn parse(key: &'a str) -> Result<Self> {
        let caps = KEY_RE
            .captures(key)
            .ok_or_else(|| Error::InvalidKey(key.to_string()))?;
        let prefix = caps
            .get(1)
            .map(|m| m.as_str())
            .ok_or_else(|| Error::InvalidKey(key.to_string()))?;
        let suffix = caps
            .get(2)
            .map(|m| m.as_str())
            .ok_or_else(|| Error::InvalidKey(key.to_string()))?;
        let trimmed = suffix.trim_start_matches('0');
        let digits = if trimmed.is_empty() { "0" } else { trimmed };
        Ok(IssueKey { prefix, digits })
    }

    /// The alphabetic project prefix (`AAH` in `AAH-12`).
    pub fn prefix(&self) -> &'a str {
        self.prefix
    }

    /// The numeric suffix (`12` in `AAH-12`), if it fits a `u64`.
    pub fn number(&self) -> Option<u64> {
        self.digits.parse().ok()
    }

    /// Numeric order of the suffixes: shorter digit strings are smaller.
    fn cmp_number(&self, other: &Self) -> Ordering {
        self.digits
            .len()
            .cmp(&other.digits.len())
            .then_with(|| self.digits.cmp(other.digits))
    }
}

impl fmt::Display for IssueKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.prefix, self.digits)
    }
}

/// Total order over raw key strings.
///
/// Well-formed keys compare by prefix, then number. Equal pairs such as
/// `AAH-01`/`AAH-1` fall back to the raw strings. Malformed keys sort last.
pub fn compare_keys(a: &str, b: &str) -> Ordering {
    match (IssueKey::parse(a), IssueKey::parse(b)) {
        (Ok(ka), Ok(kb)) => ka
            .prefix
            .cmp(kb.prefix)
            .then_with(|| ka.cmp_number(&kb))
            .then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Sorts keys in place using [`compare_keys`].
pub fn sort_keys<S: AsRef<str>>(keys: &mut [S]) {
    keys.sort_by(|a, b| compare_keys(a.as_ref(), b.as_ref()));
}

#[cfg(test)]
#[path = "key_tests.rs"]
mod tests;
