//! Rewriting a compilation unit's import block.

use crate::import_name::ImportName;
use crate::organizer::ImportOrganizer;
use crate::unit::CompilationUnit;
use std::collections::BTreeSet;
use std::fmt;

/// The imports of one compilation unit, open for additions and removals.
///
/// The block spans from the first import's `import` keyword to the last
/// import's `;`. Without existing imports the block is the empty range just
/// past the package declaration, or offset 0 when there is no package; the
/// rendered text then carries the blank lines that separate it from its
/// neighbours.
pub struct ImportStatements<'o> {
    organizer: &'o dyn ImportOrganizer,
    original: BTreeSet<ImportName>,
    current: BTreeSet<ImportName>,
    start: u32,
    end: u32,
    has_existing_imports: bool,
    has_package: bool,
}

impl<'o> ImportStatements<'o> {
    /// Captures the imports of `unit`.
    pub fn new(unit: &CompilationUnit, organizer: &'o dyn ImportOrganizer) -> Self {
        let original: BTreeSet<ImportName> =
            unit.imports.iter().map(|decl| decl.name.clone()).collect();
        let (start, end) = match (unit.imports.first(), unit.imports.last()) {
            (Some(first), Some(last)) => (first.start, last.end),
            _ => {
                let anchor = unit.package.as_ref().map_or(0, |package| package.end);
                (anchor, anchor)
            }
        };
        Self {
            organizer,
            current: original.clone(),
            original,
            start,
            end,
            has_existing_imports: !unit.imports.is_empty(),
            has_package: unit.package.is_some(),
        }
    }

    /// Adds imports; returns `true` if any was new.
    pub fn add_all<'a>(&mut self, imports: impl IntoIterator<Item = &'a ImportName>) -> bool {
        let mut changed = false;
        for import in imports {
            changed |= self.current.insert(import.clone());
        }
        changed
    }

    /// Removes imports; returns `true` if any was present.
    pub fn remove_all<'a>(&mut self, imports: impl IntoIterator<Item = &'a ImportName>) -> bool {
        let mut changed = false;
        for import in imports {
            changed |= self.current.remove(import);
        }
        changed
    }

    /// Whether the import set differs from the compilation unit's.
    pub fn imports_have_changed(&self) -> bool {
        self.current != self.original
    }

    /// Byte offset where the block starts.
    pub fn start_pos(&self) -> u32 {
        self.start
    }

    /// Byte offset where the block ends.
    pub fn end_pos(&self) -> u32 {
        self.end
    }

    /// The current import set, sorted.
    pub fn imports(&self) -> impl Iterator<Item = &ImportName> {
        self.current.iter()
    }
}

impl fmt::Display for ImportStatements<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.current.is_empty() {
            return Ok(());
        }
        let imports: Vec<ImportName> = self.current.iter().cloned().collect();
        let block = self.organizer.organize(&imports).as_import_block();
        match (self.has_existing_imports, self.has_package) {
            (true, _) => write!(f, "{block}"),
            (false, true) => write!(f, "\n\n{block}"),
            (false, false) => write!(f, "{block}\n\n"),
        }
    }
}
