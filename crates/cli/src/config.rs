// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration management.
//!
//! Configuration is stored in `.tix/config.toml` and includes:
//! - `server`: Base url of the tracker backend (e.g., "http://localhost:5000")
//! - `default_project`: Project injected into queries that name none
//! - `timeout_secs`: Request timeout for backend fetches
//! - `[render]`: Presentation of the issue tree (depth cap, colors, labels)
//!
//! The file is looked up at `--config`, then `TIX_CONFIG`, then by walking
//! up from the current directory. Without one, built-in defaults apply.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tix_core::render::{ColorMap, DepthCap, RenderOptions, DEFAULT_LINK_BASE, DEFAULT_MAX_DEPTH};
use tix_core::QueryDefaults;
use url::Url;

use crate::error::{Error, Result};

const CONFIG_DIR_NAME: &str = ".tix";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Backend used when neither flag, environment nor config names one.
pub const DEFAULT_SERVER: &str = "http://localhost:5000";

/// Configuration stored in `.tix/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base url of the tracker backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    /// Project added to page queries without a `project` parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_project: Option<String>,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub render: RenderConfig,
}

/// The `[render]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Deepest level rendered, roots being level 0 (default: 20).
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Prefix of issue links; the key is appended.
    #[serde(default = "default_link_base")]
    pub link_base: String,
    /// Statuses rendered struck through.
    #[serde(default = "default_closed_statuses")]
    pub closed_statuses: Vec<String>,
    #[serde(default = "default_true")]
    pub show_fix_versions: bool,
    #[serde(default)]
    pub show_status: bool,
    #[serde(default = "default_true")]
    pub show_completed: bool,
    /// Per type code overrides merged over the built-in colors.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub colors: BTreeMap<String, String>,
    /// Color for null types and unmapped codes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_color: Option<String>,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_link_base() -> String {
    DEFAULT_LINK_BASE.to_string()
}

fn default_closed_statuses() -> Vec<String> {
    RenderOptions::default()
        .closed_statuses
        .into_iter()
        .collect()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: None,
            default_project: None,
            timeout_secs: default_timeout_secs(),
            render: RenderConfig::default(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            max_depth: default_max_depth(),
            link_base: default_link_base(),
            closed_statuses: default_closed_statuses(),
            show_fix_versions: true,
            show_status: false,
            show_completed: true,
            colors: BTreeMap::new(),
            default_color: None,
        }
    }
}

impl RenderConfig {
    /// Builds render options; `show_closed` is left on and set per request.
    ///
    /// # Errors
    ///
    /// Returns a core `InvalidOption` error if `max_depth` is out of range.
    pub fn to_options(&self) -> Result<RenderOptions> {
        let mut colors = ColorMap::default();
        colors.by_code.extend(self.colors.clone());
        if let Some(default) = &self.default_color {
            colors.default = default.clone();
        }
        Ok(RenderOptions {
            closed_statuses: self.closed_statuses.iter().cloned().collect(),
            colors,
            show_fix_versions: self.show_fix_versions,
            show_status: self.show_status,
            show_completed: self.show_completed,
            show_closed: true,
            link_base: self.link_base.clone(),
            max_depth: DepthCap::new(self.max_depth)?,
        })
    }
}

impl Config {
    /// Loads configuration from the given file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Resolves the configuration for this invocation.
    ///
    /// An explicit path (flag or `TIX_CONFIG`) must exist. A discovered file
    /// is optional.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let explicit = explicit
            .map(Path::to_path_buf)
            .or_else(crate::env::config_path);
        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "loading config");
            return Config::load(&path);
        }
        match find_config_file()? {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading discovered config");
                Config::load(&path)
            }
            None => {
                tracing::debug!("no config file found, using defaults");
                Ok(Config::default())
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be at least 1".to_string()));
        }
        self.render.to_options()?;
        Ok(())
    }

    /// Backend base url: the flag, then `TIX_SERVER`, then the config file.
    pub fn server_url(&self, flag: Option<&str>) -> Result<Url> {
        let raw = flag
            .map(str::to_string)
            .or_else(crate::env::server)
            .or_else(|| self.server.clone())
            .unwrap_or_else(|| DEFAULT_SERVER.to_string());
        parse_server_url(&raw)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn query_defaults(&self) -> QueryDefaults {
        QueryDefaults {
            project: self.default_project.clone(),
            ..QueryDefaults::default()
        }
    }
}

/// Parses a backend base url. Only http and https are accepted.
pub fn parse_server_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| Error::InvalidServerUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::InvalidServerUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

/// Find `.tix/config.toml` by walking up from the current directory.
pub fn find_config_file() -> Result<Option<PathBuf>> {
    let current = std::env::current_dir()?;
    Ok(find_config_file_from(&current))
}

/// Find `.tix/config.toml` by walking up from `start`.
pub fn find_config_file_from(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
