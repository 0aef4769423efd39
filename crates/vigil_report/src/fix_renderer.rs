//! Turns fixes into resolved replacement lists, once per distinct fix.

use crate::error::ReportError;
use crate::region::{check_range, Region};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::debug;
use vigil_diagnostics::{CoalescePolicy, Fix, Replacement, Replacements};
use vigil_imports::{CompilationUnit, ImportOrganizer, ImportStatements};
use vigil_source::SourceText;

/// A fix ready to be written: its description and its replacements in
/// ascending order, each with a resolved region.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RenderedFix {
    /// The fix's short description; may be empty.
    pub description: String,
    /// Non-overlapping replacements in ascending offset order.
    pub replacements: Vec<RenderedReplacement>,
}

/// One replacement of a [`RenderedFix`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RenderedReplacement {
    /// The replaced range.
    pub region: Region,
    /// The inserted text; empty for a pure deletion.
    pub text: String,
}

/// Renders fixes and remembers the result for the lifetime of one report.
///
/// Checks often attach the same fix to many findings (a rename reported at
/// every use, for instance). Results are keyed by source URI and fix value,
/// so each distinct fix is rendered once per file.
pub struct FixRenderer {
    organizer: Box<dyn ImportOrganizer>,
    explicit_policy: CoalescePolicy,
    cache: HashMap<String, HashMap<Fix, Rc<RenderedFix>>>,
    render_count: usize,
}

impl FixRenderer {
    /// Creates a renderer that lays out import blocks with `organizer` and
    /// resolves overlapping explicit replacements with `explicit_policy`.
    pub fn new(organizer: Box<dyn ImportOrganizer>, explicit_policy: CoalescePolicy) -> Self {
        Self {
            organizer,
            explicit_policy,
            cache: HashMap::new(),
            render_count: 0,
        }
    }

    /// Number of fixes actually rendered, as opposed to served from the cache.
    pub fn render_count(&self) -> usize {
        self.render_count
    }

    /// Renders `fix` against `source`, whose parsed imports are `unit`.
    ///
    /// Explicit replacements are merged first. If the fix edits imports and
    /// that changes the import set, one more replacement rewrites the whole
    /// import block; it gives way to any explicit replacement it overlaps.
    pub fn render(
        &mut self,
        fix: &Fix,
        source: &dyn SourceText,
        unit: &CompilationUnit,
    ) -> Result<Rc<RenderedFix>, ReportError> {
        if let Some(rendered) = self
            .cache
            .get(source.uri())
            .and_then(|fixes| fixes.get(fix))
        {
            debug!(uri = source.uri(), "fix served from cache");
            return Ok(Rc::clone(rendered));
        }

        let rendered = Rc::new(self.render_uncached(fix, source, unit)?);
        self.render_count += 1;
        debug!(
            uri = source.uri(),
            replacements = rendered.replacements.len(),
            "fix rendered"
        );
        self.cache
            .entry(source.uri().to_string())
            .or_default()
            .insert(fix.clone(), Rc::clone(&rendered));
        Ok(rendered)
    }

    fn render_uncached(
        &self,
        fix: &Fix,
        source: &dyn SourceText,
        unit: &CompilationUnit,
    ) -> Result<RenderedFix, ReportError> {
        let mut replacements = Replacements::new();
        for replacement in fix.replacements() {
            check_range(source, replacement.start, replacement.end)?;
            replacements.add(replacement.clone(), self.explicit_policy)?;
        }

        if fix.has_import_changes() {
            let mut statements = ImportStatements::new(unit, self.organizer.as_ref());
            statements.add_all(fix.imports_to_add());
            statements.remove_all(fix.imports_to_remove());
            if statements.imports_have_changed() {
                let block = Replacement::new(
                    statements.start_pos(),
                    statements.end_pos(),
                    statements.to_string(),
                );
                check_range(source, block.start, block.end)?;
                replacements.add(block, CoalescePolicy::ReplacementFirst)?;
            } else {
                debug!(uri = source.uri(), "import changes leave the block unchanged");
            }
        }

        let replacements = replacements
            .ascending()
            .map(|replacement| {
                Ok(RenderedReplacement {
                    region: Region::resolve(source, replacement.start, replacement.end)?,
                    text: replacement.text.clone(),
                })
            })
            .collect::<Result<Vec<_>, ReportError>>()?;

        Ok(RenderedFix {
            description: fix.description().to_string(),
            replacements,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use vigil_imports::OrganizerStrategy;
    use vigil_source::{FileId, SourceFile};

    const SOURCE: &str = "package p;\n\nimport java.util.List;\n\nclass A {\n  List<String> xs;\n}\n";

    fn source(path: &str, content: &str) -> SourceFile {
        SourceFile::new(FileId::from_raw(0), PathBuf::from(path), content.to_string())
    }

    fn renderer(policy: CoalescePolicy) -> FixRenderer {
        FixRenderer::new(OrganizerStrategy::StaticFirst.organizer(), policy)
    }

    fn spans(fix: &RenderedFix) -> Vec<(u32, u32, &str)> {
        fix.replacements
            .iter()
            .map(|r| {
                (
                    r.region.char_offset,
                    r.region.char_offset + r.region.char_length,
                    r.text.as_str(),
                )
            })
            .collect()
    }

    #[test]
    fn explicit_replacements_come_out_ascending() {
        let src = source("A.java", SOURCE);
        let unit = CompilationUnit::scan(SOURCE);
        let fix = Fix::builder()
            .replace(61, 63, "zs")
            .replace(48, 52, "Set")
            .build();
        let rendered = renderer(CoalescePolicy::Reject)
            .render(&fix, &src, &unit)
            .unwrap();
        assert_eq!(spans(&rendered), vec![(48, 52, "Set"), (61, 63, "zs")]);
        assert_eq!(rendered.replacements[0].region.start_line, 6);
    }

    #[test]
    fn import_only_fix_rewrites_import_block() {
        let src = source("A.java", SOURCE);
        let unit = CompilationUnit::scan(SOURCE);
        let fix = Fix::builder().add_import("java.util.Set").build();
        let rendered = renderer(CoalescePolicy::Reject)
            .render(&fix, &src, &unit)
            .unwrap();
        assert_eq!(
            spans(&rendered),
            vec![(12, 34, "import java.util.List;\nimport java.util.Set;")]
        );
    }

    #[test]
    fn unchanged_imports_add_no_replacement() {
        let src = source("A.java", SOURCE);
        let unit = CompilationUnit::scan(SOURCE);
        let fix = Fix::builder().add_import("java.util.List").build();
        let rendered = renderer(CoalescePolicy::Reject)
            .render(&fix, &src, &unit)
            .unwrap();
        assert!(rendered.replacements.is_empty());
    }

    #[test]
    fn explicit_edit_wins_over_import_block() {
        let src = source("A.java", SOURCE);
        let unit = CompilationUnit::scan(SOURCE);
        let fix = Fix::builder()
            .replace(12, 34, "import java.util.ArrayList;")
            .add_import("java.util.Set")
            .build();
        let rendered = renderer(CoalescePolicy::Reject)
            .render(&fix, &src, &unit)
            .unwrap();
        assert_eq!(
            spans(&rendered),
            vec![(12, 34, "import java.util.ArrayList;")]
        );
    }

    #[test]
    fn same_fix_rendered_once() {
        let src = source("A.java", SOURCE);
        let unit = CompilationUnit::scan(SOURCE);
        let mut renderer = renderer(CoalescePolicy::Reject);
        let first = renderer
            .render(&Fix::builder().delete(5, 8).build(), &src, &unit)
            .unwrap();
        let second = renderer
            .render(&Fix::builder().delete(5, 8).build(), &src, &unit)
            .unwrap();
        assert_eq!(renderer.render_count(), 1);
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn cache_is_per_file() {
        let unit = CompilationUnit::scan(SOURCE);
        let mut renderer = renderer(CoalescePolicy::Reject);
        let fix = Fix::builder().delete(0, 1).build();
        renderer
            .render(&fix, &source("A.java", SOURCE), &unit)
            .unwrap();
        renderer
            .render(&fix, &source("B.java", SOURCE), &unit)
            .unwrap();
        assert_eq!(renderer.render_count(), 2);
    }

    #[test]
    fn out_of_bounds_replacement_fails() {
        let src = source("A.java", "short");
        let unit = CompilationUnit::scan("short");
        let fix = Fix::builder().replace(3, 40, "x").build();
        let err = renderer(CoalescePolicy::ReplacementFirst)
            .render(&fix, &src, &unit)
            .unwrap_err();
        assert!(matches!(err, ReportError::OffsetOutOfBounds { offset: 40, .. }));
    }

    #[test]
    fn failed_render_is_not_cached() {
        let src = source("A.java", "short");
        let unit = CompilationUnit::scan("short");
        let mut renderer = renderer(CoalescePolicy::Reject);
        let fix = Fix::builder().replace(0, 2, "a").replace(1, 3, "b").build();
        assert!(matches!(
            renderer.render(&fix, &src, &unit),
            Err(ReportError::Overlap(_))
        ));
        assert_eq!(renderer.render_count(), 0);
    }

    #[test]
    fn overlap_policy_applies_to_explicit_edits() {
        let src = source("A.java", SOURCE);
        let unit = CompilationUnit::scan(SOURCE);
        let fix = Fix::builder().replace(10, 20, "x").replace(15, 25, "y").build();
        let first = renderer(CoalescePolicy::ReplacementFirst)
            .render(&fix, &src, &unit)
            .unwrap();
        assert_eq!(spans(&first), vec![(10, 20, "x")]);
        let last = renderer(CoalescePolicy::NewFirst)
            .render(&fix, &src, &unit)
            .unwrap();
        assert_eq!(spans(&last), vec![(15, 25, "y")]);
    }
}
