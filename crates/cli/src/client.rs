// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Backend access.
//!
//! A command reads exactly one JSON body, either over HTTP or from a saved
//! response file.

use reqwest::header::ACCEPT;
use std::path::PathBuf;
use std::time::Duration;
use tix_core::Endpoint;
use url::Url;

use crate::error::{Error, Result};

/// HTTP client bound to one backend base url.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base: Url,
}

impl Client {
    pub fn new(base: Url, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tix/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Client { http, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn url(&self, endpoint: &Endpoint, api_query: &str) -> Result<Url> {
        Ok(endpoint.url(&self.base, api_query)?)
    }

    /// GETs an endpoint and returns the body of a successful response.
    ///
    /// # Errors
    ///
    /// [`Error::Http`] for transport failures and timeouts, [`Error::Status`]
    /// for any non-2xx response.
    pub async fn fetch(&self, endpoint: &Endpoint, api_query: &str) -> Result<String> {
        let url = self.url(endpoint, api_query)?;
        tracing::debug!(%url, "fetching");

        let resp = self
            .http
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = resp.text().await?;
        tracing::debug!(%url, bytes = body.len(), "fetched");
        Ok(body)
    }
}

/// Where a command reads its response from.
#[derive(Debug, Clone)]
pub enum Source {
    Remote(Client),
    /// Saved response; the endpoint and query are ignored.
    File(PathBuf),
}

impl Source {
    pub async fn body(&self, endpoint: &Endpoint, api_query: &str) -> Result<String> {
        match self {
            Source::Remote(client) => client.fetch(endpoint, api_query).await,
            Source::File(path) => {
                tracing::debug!(path = %path.display(), %endpoint, "reading saved response");
                Ok(tokio::fs::read_to_string(path).await?)
            }
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Source::Remote(_))
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
