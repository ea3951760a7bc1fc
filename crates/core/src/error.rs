// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for tix-core operations.

use thiserror::Error;

/// All possible errors that can occur in tix-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid issue key: '{0}'\n  hint: keys look like PREFIX-NUMBER, e.g. AAH-123")]
    InvalidKey(String),

    #[error("issue not found: {0}")]
    IssueNotFound(String),

    #[error("invalid record for {key}: {reason}")]
    InvalidRecord { key: String, reason: String },

    #[error("invalid render option {option}: {reason}")]
    InvalidOption {
        option: &'static str,
        reason: String,
    },

    #[error("expected a JSON object of {expected}")]
    UnexpectedShape { expected: &'static str },

    #[error("cannot join endpoint paths onto base url: {0}")]
    InvalidBaseUrl(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for tix-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
