//! Config file loading

use super::DispatchConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const SECTION: &str = "raster-dispatch";

pub fn load_config(work_dir: &Path, config_path: Option<&Path>) -> Result<DispatchConfig> {
    let config_path_provided = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(work_dir),
    };

    let Some(config_file) = discovered else {
        return Ok(DispatchConfig::default());
    };

    let content = fs::read_to_string(&config_file)
        .with_context(|| format!("Failed reading config file: {}", config_file.display()))?;

    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "toml" => parse_toml_config(&content, &config_file),
        "yaml" | "yml" => parse_yaml_config(&content, &config_file),
        other => Err(anyhow::anyhow!(
            "Unsupported config extension '.{}' for file {}",
            other,
            config_file.display()
        )),
    };

    match parsed {
        Ok(cfg) => Ok(cfg),
        Err(e) if config_path_provided => Err(e),
        Err(e) => {
            // Auto-discovered: warn and fall back to defaults
            tracing::warn!(
                "Failed to parse auto-discovered config {}: {:#}",
                config_file.display(),
                e
            );
            Ok(DispatchConfig::default())
        }
    }
}

/// Parse TOML config, accepting a nested `[raster-dispatch]` table.
fn parse_toml_config(content: &str, config_file: &Path) -> Result<DispatchConfig> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", config_file.display()))?;

    let config_val = match raw.get(SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    config_val.try_into().with_context(|| format!("Invalid TOML config: {}", config_file.display()))
}

fn parse_yaml_config(content: &str, config_file: &Path) -> Result<DispatchConfig> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", config_file.display()))?;

    let config_val = match raw.get(SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    serde_yaml::from_value(config_val)
        .with_context(|| format!("Invalid YAML config: {}", config_file.display()))
}

fn discover_config(work_dir: &Path) -> Option<PathBuf> {
    let candidates = [
        "raster-dispatch.toml",
        ".raster-dispatch.toml",
        "raster-dispatch.yml",
        "raster-dispatch.yaml",
    ];

    candidates.iter().map(|name| work_dir.join(name)).find(|path| path.exists())
}
