//! A check's finding: what went wrong, where, and how to fix it.

use crate::fix::Fix;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use vigil_source::FileId;

/// The kind of syntax node a finding is attached to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// An import declaration.
    Import,
    /// Any other node.
    #[default]
    Other,
    /// The position is not attached to a known node.
    Unknown,
}

/// A finding produced by a check.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Description {
    /// The name of the check that produced this finding; becomes the rule id.
    pub check_name: String,
    /// How severe the finding is.
    pub severity: Severity,
    /// The raw finding message, without any fix suggestion.
    pub message: String,
    /// Optional link to documentation about the check.
    #[serde(default)]
    pub link: Option<String>,
    /// The file the finding is in.
    pub file: FileId,
    /// Byte offset where the flagged range starts.
    pub start: u32,
    /// Byte offset where the flagged range ends; `None` means the range is empty.
    #[serde(default)]
    pub end: Option<u32>,
    /// The kind of node the finding is attached to.
    #[serde(default)]
    pub node: NodeKind,
    /// Proposed fixes, in order of preference.
    #[serde(default)]
    pub fixes: Vec<Fix>,
}

impl Description {
    /// Creates a finding with the given severity at `start` in `file`.
    pub fn new(
        check_name: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        file: FileId,
        start: u32,
    ) -> Self {
        Self {
            check_name: check_name.into(),
            severity,
            message: message.into(),
            link: None,
            file,
            start,
            end: None,
            node: NodeKind::Other,
            fixes: Vec::new(),
        }
    }

    /// Creates an error-severity finding.
    pub fn error(
        check_name: impl Into<String>,
        message: impl Into<String>,
        file: FileId,
        start: u32,
    ) -> Self {
        Self::new(check_name, Severity::Error, message, file, start)
    }

    /// Creates a warning-severity finding.
    pub fn warning(
        check_name: impl Into<String>,
        message: impl Into<String>,
        file: FileId,
        start: u32,
    ) -> Self {
        Self::new(check_name, Severity::Warning, message, file, start)
    }

    /// Creates a suggestion-severity finding.
    pub fn suggestion(
        check_name: impl Into<String>,
        message: impl Into<String>,
        file: FileId,
        start: u32,
    ) -> Self {
        Self::new(check_name, Severity::Suggestion, message, file, start)
    }

    /// Sets the end of the flagged range.
    pub fn with_end(mut self, end: u32) -> Self {
        self.end = Some(end);
        self
    }

    /// Appends a proposed fix.
    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fixes.push(fix);
        self
    }

    /// Sets the documentation link.
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Records the kind of node the finding is attached to.
    pub fn at_node(mut self, node: NodeKind) -> Self {
        self.node = node;
        self
    }

    /// End of the flagged range, falling back to `start` when unknown.
    pub fn end_or_start(&self) -> u32 {
        self.end.unwrap_or(self.start)
    }

    /// Fixes that should be shown to the user.
    ///
    /// A fix that edits imports is dropped when the finding sits on an import
    /// declaration or on no known node: the preview ignores import edits, and
    /// applying one would rewrite the block the finding points at.
    pub fn reportable_fixes(&self) -> impl Iterator<Item = &Fix> {
        let suppress_imports = self.node != NodeKind::Other;
        self.fixes
            .iter()
            .filter(move |fix| !(suppress_imports && fix.has_import_changes()))
    }
}
