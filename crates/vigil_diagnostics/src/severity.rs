//! How strongly a check flags its finding.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The severity a check assigns to its finding.
///
/// Declared from mildest to most severe so that `Ord` ranks findings. In a
/// report, suggestions become `note` results.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A cleanup the check can offer a fix for.
    Suggestion,
    /// Probably a bug.
    Warning,
    /// Fails the build.
    Error,
}

impl Severity {
    /// The lowercase name used in batch files and terminal output.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Suggestion => "suggestion",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
