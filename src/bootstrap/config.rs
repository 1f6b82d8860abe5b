//! # Configuration Loader
//!
//! Reads the TOML configuration file and maps it onto [`AppConfig`]. Loading
//! is pure data mapping: fields missing from the file take their defaults
//! and values are not validated here.

use std::path::{Path, PathBuf};

use anyhow::Context;
use lr_core::config::AppConfig;
use tracing::warn;

const CONFIG_FILE_NAME: &str = "config.toml";

/// `<config dir>/locreminder/config.toml`, when the platform has a config
/// directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("locreminder").join(CONFIG_FILE_NAME))
}

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns error if:
/// - File cannot be read (I/O error)
/// - Content is not valid TOML (parse error)
/// - TOML structure does not match the configuration (mapping error)
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
        .with_context(|| format!("Invalid configuration in {}", config_path.display()))
}

/// Like [`load_config`], but a missing file yields the default
/// configuration. Unreadable or malformed files are still errors.
pub fn load_config_or_default(config_path: &Path) -> anyhow::Result<AppConfig> {
    if !config_path.exists() {
        warn!(
            path = %config_path.display(),
            "config file not found, using defaults"
        );
        return Ok(AppConfig::default());
    }
    load_config(config_path)
}
