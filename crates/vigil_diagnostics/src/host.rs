//! Diagnostics raised by the host compiler rather than by a check.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use vigil_source::FileId;

/// Codes under which the host re-reports check findings. Those findings reach
/// the report through their [`Description`](crate::Description) instead.
const CHECK_REPORT_CODES: &[&str] = &[
    "compiler.err.error.prone",
    "compiler.warn.error.prone",
    "compiler.note.error.prone",
];

/// The host compiler's classification of a diagnostic.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostKind {
    /// A compilation error.
    Error,
    /// A warning.
    Warning,
    /// An informational note.
    Note,
    /// A message fragment that is not a diagnostic on its own.
    Fragment,
}

/// Message text with optional per-locale variants.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    /// Text used when no variant matches the requested locale.
    pub default: String,
    /// Variants keyed by locale tag (`"de"`, `"pt-BR"`).
    #[serde(default)]
    pub translations: BTreeMap<String, String>,
}

impl LocalizedText {
    /// Text with no locale variants.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            default: text.into(),
            translations: BTreeMap::new(),
        }
    }

    /// Adds a variant for `locale`.
    pub fn with_translation(mut self, locale: impl Into<String>, text: impl Into<String>) -> Self {
        self.translations.insert(locale.into(), text.into());
        self
    }

    /// Picks the variant for `locale`: an exact tag match, then its language
    /// subtag, then the default.
    pub fn render(&self, locale: &str) -> &str {
        if let Some(text) = self.translations.get(locale) {
            return text;
        }
        let language = locale.split(['-', '_']).next().unwrap_or(locale);
        self.translations
            .get(language)
            .map_or(self.default.as_str(), String::as_str)
    }
}

/// Byte range of a host diagnostic.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct HostPosition {
    /// Start offset.
    pub start: u32,
    /// End offset; `None` when the host only knows where the problem starts.
    #[serde(default)]
    pub end: Option<u32>,
}

/// A diagnostic produced by the host compiler.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HostDiagnostic {
    /// The host's message key.
    pub code: String,
    /// Error, warning, note, or fragment.
    pub kind: HostKind,
    /// The lint category that produced the diagnostic, reported as the rule id.
    #[serde(default)]
    pub lint_category: Option<String>,
    /// The message text.
    pub message: LocalizedText,
    /// The source file, when the diagnostic is tied to one.
    #[serde(default)]
    pub file: Option<FileId>,
    /// The position within `file`, when known.
    #[serde(default)]
    pub position: Option<HostPosition>,
}

impl HostDiagnostic {
    /// Creates a diagnostic without category, file, or position.
    pub fn new(code: impl Into<String>, kind: HostKind, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            kind,
            lint_category: None,
            message: LocalizedText::new(message),
            file: None,
            position: None,
        }
    }

    /// Sets the lint category.
    pub fn with_lint_category(mut self, category: impl Into<String>) -> Self {
        self.lint_category = Some(category.into());
        self
    }

    /// Ties the diagnostic to a file and, optionally, a byte range in it.
    pub fn at(mut self, file: FileId, position: Option<HostPosition>) -> Self {
        self.file = Some(file);
        self.position = position;
        self
    }

    /// Returns `true` if this is the host's echo of a check finding.
    pub fn is_check_report(&self) -> bool {
        CHECK_REPORT_CODES.contains(&self.code.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_resolution() {
        let text = LocalizedText::new("unchecked call")
            .with_translation("de", "ungeprüfter Aufruf")
            .with_translation("pt-BR", "chamada não verificada");
        assert_eq!(text.render("pt-BR"), "chamada não verificada");
        assert_eq!(text.render("de_AT"), "ungeprüfter Aufruf");
        assert_eq!(text.render("fr"), "unchecked call");
        assert_eq!(text.render(""), "unchecked call");
    }

    #[test]
    fn recognises_check_report_codes() {
        let echo = HostDiagnostic::new("compiler.warn.error.prone", HostKind::Warning, "x");
        assert!(echo.is_check_report());
        let own = HostDiagnostic::new("compiler.warn.unchecked.call", HostKind::Warning, "x");
        assert!(!own.is_check_report());
    }

    #[test]
    fn builder_sets_location() {
        let diag = HostDiagnostic::new("compiler.err.cant.resolve", HostKind::Error, "no symbol")
            .with_lint_category("resolve")
            .at(
                FileId::from_raw(2),
                Some(HostPosition {
                    start: 4,
                    end: Some(9),
                }),
            );
        assert_eq!(diag.file, Some(FileId::from_raw(2)));
        assert_eq!(diag.position.unwrap().end, Some(9));
        assert_eq!(diag.lint_category.as_deref(), Some("resolve"));
    }

    #[test]
    fn deserializes_minimal_json() {
        let diag: HostDiagnostic = serde_json::from_str(
            r#"{"code": "compiler.note.deprecated", "kind": "note", "message": {"default": "uses deprecated API"}}"#,
        )
        .unwrap();
        assert_eq!(diag.kind, HostKind::Note);
        assert!(diag.file.is_none());
        assert!(diag.position.is_none());
    }
}
