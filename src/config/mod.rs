//! Configuration loading and merging
//!
//! Precedence: CLI > Env > File > Defaults.

pub mod loader;

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

pub use loader::load_config;

pub const ENV_SERVER_URL: &str = "RASTER_DISPATCH_SERVER_URL";
pub const ENV_TIMEOUT_SECS: &str = "RASTER_DISPATCH_TIMEOUT_SECS";

/// Where and how tool calls are sent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispatchConfig {
    /// Base address of the tool server.
    pub server_url: String,
    /// Path the JSON-RPC endpoint is mounted at.
    pub endpoint: String,
    pub timeout_secs: u64,
    /// Correlation id put on every request. The server does not need it unique.
    pub request_id: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:11435".to_string(),
            endpoint: "/mcp".to_string(),
            timeout_secs: 120,
            request_id: 1,
        }
    }
}

impl DispatchConfig {
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/{}",
            self.server_url.trim_end_matches('/'),
            self.endpoint.trim_start_matches('/')
        )
    }

    /// Apply environment overrides, reading variables through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_SERVER_URL).filter(|v| !v.trim().is_empty()) {
            self.server_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds"))?;
        }
        Ok(())
    }
}

/// Values given on the command line.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub server: Option<String>,
}

/// Build the effective configuration for this process.
pub fn resolve_config(
    work_dir: &Path,
    config_path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<DispatchConfig> {
    let mut config = load_config(work_dir, config_path)?;
    config.apply_env(|key| std::env::var(key).ok())?;
    if let Some(server) = &overrides.server {
        config.server_url = server.clone();
    }
    tracing::debug!(url = %config.endpoint_url(), timeout = config.timeout_secs, "resolved config");
    Ok(config)
}
