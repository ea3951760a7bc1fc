// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod chart;
pub mod query;
pub mod subtree;
#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;
pub mod tree;

use std::fs;
use std::path::PathBuf;

use crate::client::Source;
use crate::error::Result;
use crate::panel::{Container, Panel};

/// Destination of the rendered fragment: a file or stdout.
#[derive(Debug, Clone, Default)]
pub struct Output {
    path: Option<PathBuf>,
}

impl Output {
    pub fn new(path: Option<PathBuf>) -> Self {
        Output { path }
    }

    pub fn is_file(&self) -> bool {
        self.path.is_some()
    }

    /// Writes `text` plus a trailing newline, replacing any earlier content.
    pub fn write(&self, text: &str) -> Result<()> {
        match &self.path {
            Some(path) => fs::write(path, format!("{text}\n"))?,
            None => println!("{text}"),
        }
        Ok(())
    }
}

/// Reports the normalized page query, the address bar of the page.
pub(crate) fn announce(page_query: &str) {
    tracing::info!(page_query, "normalized page query");
    if !page_query.is_empty() {
        eprintln!("url: ?{page_query}");
    }
}

/// Shows the loading placeholder while a remote fetch is in flight.
///
/// Only file output gets one: stdout cannot be rewritten afterwards.
pub(crate) fn begin(container: Container, source: &Source, output: &Output) -> Result<()> {
    if output.is_file() && source.is_remote() {
        output.write(&Panel::Loading.fragment(container))?;
    }
    Ok(())
}

/// Writes the final fragment. A failure still produces the error-state
/// fragment before the error is returned.
pub(crate) fn finish(container: Container, rendered: Result<String>, output: &Output) -> Result<()> {
    match rendered {
        Ok(html) => output.write(&Panel::Ready(html).fragment(container)),
        Err(e) => {
            tracing::debug!(%container, error = %e, "switching panel to error state");
            output.write(&Panel::Error(e.to_string()).fragment(container))?;
            Err(e)
        }
    }
}
