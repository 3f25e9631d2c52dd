//! Report defaults file support for cookbook-audit.
//!
//! Provides YAML-based defaults through `cookbook-audit.config.yml` files,
//! including data structures, file loading, and validation. Values given on
//! the command line always win over the file.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "cookbook-audit.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub detailed: Option<bool>,
    pub skip_unused: Option<bool>,
    pub workers: Option<usize>,
    pub timeout_seconds: Option<u64>,
    pub stage_timeout_seconds: Option<u64>,
    pub analyzer: Option<String>,
    pub no_ssl_verify: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.workers == Some(0) {
        bail!(
            "Invalid config: workers must be at least 1.\n\n\
             💡 Hint: Remove the field to use the default of 10 concurrent cookbooks."
        );
    }
    if config.timeout_seconds == Some(0) || config.stage_timeout_seconds == Some(0) {
        bail!(
            "Invalid config: timeouts must be greater than zero.\n\n\
             💡 Hint: Remove the field to run without a limit."
        );
    }
    if let Some(format) = &config.format {
        format
            .parse::<crate::application::dto::OutputFormat>()
            .map_err(|e| anyhow::anyhow!("Invalid config: {}", e))?;
    }
    if config.analyzer.as_deref().is_some_and(|a| a.trim().is_empty()) {
        bail!("Invalid config: analyzer must not be empty.");
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
