//! One-line previews of what a fix does to the source.

use crate::fix::Fix;
use crate::replacements::{CoalescePolicy, Replacements};

/// The visible effect of a fix on the first line it edits.
///
/// Import changes are not part of the preview; only explicit replacements are
/// applied.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AppliedFix {
    snippet: String,
    is_remove_line: bool,
}

impl AppliedFix {
    /// Applies `replacements` to `text` and captures the first edited line.
    ///
    /// The line is located by the start of the earliest replacement in the
    /// original text and read back from the fixed text. Returns `None` when
    /// there is nothing to apply or a replacement does not fit `text`.
    pub fn apply(text: &str, replacements: &Replacements) -> Option<AppliedFix> {
        let first = replacements.ascending().next()?;
        let fixed = replacements.apply_to(text)?;
        let line = text[..first.start as usize].matches('\n').count();
        let snippet = fixed.lines().nth(line).unwrap_or("").trim();
        Some(AppliedFix {
            snippet: snippet.to_string(),
            is_remove_line: snippet.is_empty(),
        })
    }

    /// Previews `fix` against `text`, keeping the earlier of any overlapping
    /// replacements.
    pub fn for_fix(text: &str, fix: &Fix) -> Option<AppliedFix> {
        let mut replacements = Replacements::new();
        replacements
            .add_all(fix.replacements(), CoalescePolicy::ReplacementFirst)
            .ok()?;
        Self::apply(text, &replacements)
    }

    /// The edited line after the fix, trimmed.
    pub fn snippet(&self) -> &str {
        &self.snippet
    }

    /// Returns `true` if the fix leaves the edited line empty.
    pub fn is_remove_line(&self) -> bool {
        self.is_remove_line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "class A {\n  int x = foo();\n  int y;\n}\n";

    #[test]
    fn captures_edited_line() {
        let fix = Fix::builder().replace(20, 23, "bar").build();
        let applied = AppliedFix::for_fix(SOURCE, &fix).unwrap();
        assert_eq!(applied.snippet(), "int x = bar();");
        assert!(!applied.is_remove_line());
    }

    #[test]
    fn deleting_whole_line_is_remove_line() {
        // "  int y;" spans 27..35
        let fix = Fix::builder().delete(27, 35).build();
        let applied = AppliedFix::for_fix(SOURCE, &fix).unwrap();
        assert!(applied.is_remove_line());
        assert_eq!(applied.snippet(), "");
    }

    #[test]
    fn multi_line_insert_shows_first_line() {
        let fix = Fix::builder().insert(10, "  // a\n  // b\n").build();
        let applied = AppliedFix::for_fix(SOURCE, &fix).unwrap();
        assert_eq!(applied.snippet(), "// a");
    }

    #[test]
    fn import_only_fix_has_no_preview() {
        let fix = Fix::builder().add_import("java.util.List").build();
        assert_eq!(AppliedFix::for_fix(SOURCE, &fix), None);
    }

    #[test]
    fn out_of_bounds_fix_has_no_preview() {
        let fix = Fix::builder().replace(100, 120, "x").build();
        assert_eq!(AppliedFix::for_fix(SOURCE, &fix), None);
    }
}
