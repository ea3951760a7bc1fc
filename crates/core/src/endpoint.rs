// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Backend endpoint catalogue.

use std::fmt;
use url::Url;

use crate::error::{Error, Result};
use crate::query::ParamSet;

/// A backend resource the renderer reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Forest of issues filtered by the page query.
    TicketsTree,
    /// Everything below one issue.
    ChildTree(String),
    TicketsBurndown,
    FixVersionBurndown,
    TicketsChurn,
}

impl Endpoint {
    /// Path segments below the base url. A trailing empty segment keeps the
    /// trailing slash the backend routes expect.
    fn segments(&self) -> Vec<&str> {
        match self {
            Endpoint::TicketsTree => vec!["api", "tickets_tree"],
            Endpoint::ChildTree(key) => vec!["api", "ticket_child_tree", key],
            Endpoint::TicketsBurndown => vec!["api", "tickets_burndown"],
            Endpoint::FixVersionBurndown => vec!["api", "fixversion_burndown", ""],
            Endpoint::TicketsChurn => vec!["api", "tickets_churn", ""],
        }
    }

    /// Query parameters forwarded to this endpoint.
    pub fn params(&self) -> ParamSet {
        match self {
            Endpoint::TicketsTree => ParamSet::TREE,
            Endpoint::ChildTree(_) | Endpoint::TicketsBurndown => ParamSet::NONE,
            Endpoint::FixVersionBurndown => ParamSet::FIX_BURNDOWN,
            Endpoint::TicketsChurn => ParamSet::CHURN,
        }
    }

    /// Joins base, path and query. The `?` is omitted for an empty query;
    /// path-embedded keys are percent-encoded.
    pub fn url(&self, base: &Url, api_query: &str) -> Result<Url> {
        let mut url = base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| Error::InvalidBaseUrl(base.to_string()))?;
            path.pop_if_empty();
            path.extend(self.segments());
        }
        url.set_query(if api_query.is_empty() {
            None
        } else {
            Some(api_query)
        });
        url.set_fragment(None);
        Ok(url)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in self.segments() {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "endpoint_tests.rs"]
mod tests;
