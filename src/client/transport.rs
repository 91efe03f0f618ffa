//! HTTP transport to the raster tool server

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde_json::Value;
use std::time::Duration;

use crate::config::DispatchConfig;

/// Accept both a single JSON reply and an event-stream framed one.
pub const ACCEPT_REPLY_TYPES: &str = "application/json, text/event-stream";

/// Sends one request envelope and hands back the raw reply body.
pub trait Transport {
    fn send(&self, envelope: &Value) -> Result<String>;

    /// Where requests go, for status lines and logs.
    fn endpoint(&self) -> &str;
}

/// Blocking `reqwest` transport, one client reused for the whole session.
pub struct HttpTransport {
    client: Client,
    url: String,
}

impl HttpTransport {
    pub fn new(config: &DispatchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, url: config.endpoint_url() })
    }
}

impl Transport for HttpTransport {
    fn send(&self, envelope: &Value) -> Result<String> {
        let response = self
            .client
            .post(&self.url)
            .header(ACCEPT, ACCEPT_REPLY_TYPES)
            .json(envelope)
            .send()
            .with_context(|| format!("POST {} failed", self.url))?;

        let status = response.status();
        let body = response.text().context("Failed reading response body")?;
        tracing::debug!(%status, bytes = body.len(), "tool server replied");
        Ok(body)
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}
