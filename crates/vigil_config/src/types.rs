//! Configuration types deserialized from `vigil.toml`.

use serde::Deserialize;
use std::path::PathBuf;
use vigil_diagnostics::CoalescePolicy;
use vigil_imports::OrganizerStrategy;

/// Encoding reported when the configuration leaves it unset or empty.
pub const DEFAULT_ENCODING: &str = "UTF-8";

/// Version reported when the tool version is unknown.
pub const UNKNOWN_VERSION: &str = "unknown version";

/// The top-level reporting configuration parsed from `vigil.toml`.
#[derive(Debug, Deserialize)]
pub struct ReportConfig {
    /// Where and how the report is written.
    pub output: OutputConfig,
    /// How the producing tool identifies itself in the report.
    #[serde(default)]
    pub tool: ToolConfig,
    /// Import block layout used when fixes edit imports.
    #[serde(default)]
    pub imports: ImportsConfig,
    /// How conflicting fix replacements are resolved.
    #[serde(default)]
    pub fixes: FixesConfig,
}

impl ReportConfig {
    /// A configuration writing to `path` with every other setting defaulted.
    pub fn with_output(path: impl Into<PathBuf>) -> Self {
        Self {
            output: OutputConfig {
                path: path.into(),
                encoding: None,
                locale: default_locale(),
            },
            tool: ToolConfig::default(),
            imports: ImportsConfig::default(),
            fixes: FixesConfig::default(),
        }
    }
}

/// Output file settings.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Path of the report file.
    pub path: PathBuf,
    /// Declared encoding of the analysed sources.
    #[serde(default)]
    pub encoding: Option<String>,
    /// Locale used to render host diagnostic messages.
    #[serde(default = "default_locale")]
    pub locale: String,
}

impl OutputConfig {
    /// The encoding to report, falling back to [`DEFAULT_ENCODING`].
    pub fn effective_encoding(&self) -> &str {
        match self.encoding.as_deref() {
            Some(encoding) if !encoding.is_empty() => encoding,
            _ => DEFAULT_ENCODING,
        }
    }
}

fn default_locale() -> String {
    "en".to_string()
}

/// Identity of the tool that produced the report.
#[derive(Debug, Deserialize)]
pub struct ToolConfig {
    /// Tool name.
    #[serde(default = "default_tool_name")]
    pub name: String,
    /// Tool version.
    #[serde(default = "default_tool_version")]
    pub version: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            name: default_tool_name(),
            version: default_tool_version(),
        }
    }
}

fn default_tool_name() -> String {
    "vigil".to_string()
}

fn default_tool_version() -> String {
    UNKNOWN_VERSION.to_string()
}

/// Import block settings.
#[derive(Debug, Default, Deserialize)]
pub struct ImportsConfig {
    /// Which organizer lays out the rewritten import block.
    #[serde(default)]
    pub organizer: OrganizerStrategy,
}

/// Fix rendering settings.
#[derive(Debug, Default, Deserialize)]
pub struct FixesConfig {
    /// What to do when two explicit replacements of one fix overlap.
    #[serde(default)]
    pub overlapping_replacements: OverlapPolicy,
}

/// Resolution of overlapping explicit replacements.
#[derive(Debug, Default, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum OverlapPolicy {
    /// Keep the replacement added first (default).
    #[default]
    KeepFirst,
    /// Keep the replacement added last.
    KeepLast,
    /// Fail the fix.
    Reject,
}

impl OverlapPolicy {
    /// The coalescing policy implementing this setting.
    pub fn coalesce_policy(self) -> CoalescePolicy {
        match self {
            OverlapPolicy::KeepFirst => CoalescePolicy::ReplacementFirst,
            OverlapPolicy::KeepLast => CoalescePolicy::NewFirst,
            OverlapPolicy::Reject => CoalescePolicy::Reject,
        }
    }
}
