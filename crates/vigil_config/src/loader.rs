//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::ReportConfig;
use std::path::Path;

/// Name of the configuration file looked up in a project directory.
pub const CONFIG_FILE_NAME: &str = "vigil.toml";

/// Loads and validates a `vigil.toml` configuration from a project directory.
///
/// Reads `<project_dir>/vigil.toml`, parses it, and validates required fields.
pub fn load_config(project_dir: &Path) -> Result<ReportConfig, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE_NAME);
    let content = std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
        path: config_path.clone(),
        source,
    })?;
    load_config_from_str(&content)
}

/// Parses and validates a `vigil.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<ReportConfig, ConfigError> {
    let config: ReportConfig = toml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that required fields are present and values are usable.
fn validate_config(config: &ReportConfig) -> Result<(), ConfigError> {
    if config.output.path.as_os_str().is_empty() {
        return Err(ConfigError::MissingField("output.path"));
    }
    if config.output.locale.is_empty() {
        return Err(ConfigError::EmptyValue("output.locale"));
    }
    if config.tool.name.is_empty() {
        return Err(ConfigError::EmptyValue("tool.name"));
    }
    Ok(())
}
