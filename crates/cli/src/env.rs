// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by the CLI are defined here
//! with typed accessor functions. The variable name constants are generated
//! by `build.rs` and live in the [`vars`] submodule.

use std::path::PathBuf;

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

/// Returns `true` if `TIX_TIMINGS` is set (any value).
pub fn tix_timings() -> bool {
    std::env::var(vars::TIX_TIMINGS).is_ok()
}

/// Returns the backend base url from `TIX_SERVER`, if set and non-empty.
pub fn server() -> Option<String> {
    std::env::var(vars::TIX_SERVER)
        .ok()
        .filter(|v| !v.trim().is_empty())
}

/// Returns the value of `TIX_CONFIG` if set.
pub fn config_path() -> Option<PathBuf> {
    std::env::var(vars::TIX_CONFIG).ok().map(PathBuf::from)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
