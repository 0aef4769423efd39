//! Parsing and validation of `vigil.toml` reporting configuration files.
//!
//! This crate reads the configuration file and produces a strongly-typed
//! [`ReportConfig`]: the report output path and encoding, the tool identity
//! written into the report, the import organizer, and the policy for
//! overlapping fix replacements.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
