//! SARIF result levels.

use crate::host::HostKind;
use crate::severity::Severity;
use std::fmt;

/// The `level` of a SARIF result.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Level {
    /// `"error"`
    Error,
    /// `"warning"`
    Warning,
    /// `"note"`
    Note,
    /// `"none"`
    None,
}

impl Level {
    /// The SARIF spelling of this level.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Note => "note",
            Level::None => "none",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Severity> for Level {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Error => Level::Error,
            Severity::Warning => Level::Warning,
            Severity::Suggestion => Level::Note,
        }
    }
}

impl From<HostKind> for Level {
    fn from(kind: HostKind) -> Self {
        match kind {
            HostKind::Error => Level::Error,
            HostKind::Warning => Level::Warning,
            HostKind::Note => Level::Note,
            HostKind::Fragment => Level::None,
        }
    }
}
