//! Errors raised while loading `vigil.toml`.

use std::path::PathBuf;

/// Why a reporting configuration could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O failure.
        source: std::io::Error,
    },

    /// The file is not valid TOML or does not match the expected tables.
    #[error("invalid vigil.toml: {0}")]
    Parse(#[from] toml::de::Error),

    /// A setting the report cannot be written without is absent or empty.
    #[error("`{0}` is required")]
    MissingField(&'static str),

    /// A setting is present but empty where a value is needed.
    #[error("`{0}` must not be empty")]
    EmptyValue(&'static str),
}
