//! Fixes proposed by checks: text replacements plus import changes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use vigil_imports::ImportName;

/// One contiguous byte-range substitution within a single source file.
///
/// Ordered by start, then end, then text. An empty `text` deletes the range;
/// an empty range inserts `text`. Deserializing an inverted range fails.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawReplacement")]
pub struct Replacement {
    /// Byte offset where the replaced range starts (inclusive).
    pub start: u32,
    /// Byte offset where the replaced range ends (exclusive).
    pub end: u32,
    /// The text inserted in place of the range.
    pub text: String,
}

impl Replacement {
    /// Creates a replacement of `start..end` with `text`.
    ///
    /// # Panics
    ///
    /// Panics if `end < start`.
    pub fn new(start: u32, end: u32, text: impl Into<String>) -> Self {
        assert!(end >= start, "replacement end {end} precedes start {start}");
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Number of bytes replaced.
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if the replaced range is empty (a pure insertion).
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// The `(start, end)` key this replacement occupies.
    pub fn range(&self) -> (u32, u32) {
        (self.start, self.end)
    }

    /// Whether this replacement conflicts with `other`.
    ///
    /// Identical ranges always conflict, including two insertions at the same
    /// offset. Otherwise ranges conflict when they share a byte, or when one is
    /// an insertion strictly inside the other's range.
    pub fn overlaps(&self, other: &Replacement) -> bool {
        self.range() == other.range() || (self.start < other.end && other.start < self.end)
    }
}

/// The serialized shape of a [`Replacement`], before range validation.
#[derive(Deserialize)]
struct RawReplacement {
    start: u32,
    end: u32,
    #[serde(default)]
    text: String,
}

/// A replacement whose end precedes its start.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("replacement end {end} precedes start {start}")]
pub struct InvertedRange {
    /// Start offset.
    pub start: u32,
    /// End offset.
    pub end: u32,
}

impl TryFrom<RawReplacement> for Replacement {
    type Error = InvertedRange;

    fn try_from(raw: RawReplacement) -> Result<Self, Self::Error> {
        if raw.end < raw.start {
            return Err(InvertedRange {
                start: raw.start,
                end: raw.end,
            });
        }
        Ok(Replacement {
            start: raw.start,
            end: raw.end,
            text: raw.text,
        })
    }
}

impl fmt::Display for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}) -> {:?}", self.start, self.end, self.text)
    }
}

/// A proposed edit a check attaches to a finding.
///
/// Two fixes with the same description, replacements, and import changes are
/// equal and hash alike, which is what lets renderers cache by fix value.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Fix {
    #[serde(default)]
    description: String,
    #[serde(default)]
    replacements: Vec<Replacement>,
    #[serde(default)]
    imports_to_add: BTreeSet<ImportName>,
    #[serde(default)]
    imports_to_remove: BTreeSet<ImportName>,
}

impl Fix {
    /// Starts building a fix.
    pub fn builder() -> FixBuilder {
        FixBuilder::default()
    }

    /// Short human-readable description; may be empty.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Explicit replacements, in the order they were added.
    pub fn replacements(&self) -> &[Replacement] {
        &self.replacements
    }

    /// Imports the fix needs added.
    pub fn imports_to_add(&self) -> &BTreeSet<ImportName> {
        &self.imports_to_add
    }

    /// Imports the fix makes unnecessary.
    pub fn imports_to_remove(&self) -> &BTreeSet<ImportName> {
        &self.imports_to_remove
    }

    /// Returns `true` if the fix adds or removes imports.
    pub fn has_import_changes(&self) -> bool {
        !self.imports_to_add.is_empty() || !self.imports_to_remove.is_empty()
    }

    /// Returns `true` if the fix changes nothing.
    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty() && !self.has_import_changes()
    }
}

/// Incremental construction of a [`Fix`].
#[derive(Debug, Default)]
pub struct FixBuilder {
    fix: Fix,
}

impl FixBuilder {
    /// Sets the short description.
    pub fn short_description(mut self, description: impl Into<String>) -> Self {
        self.fix.description = description.into();
        self
    }

    /// Replaces `start..end` with `text`.
    pub fn replace(mut self, start: u32, end: u32, text: impl Into<String>) -> Self {
        self.fix.replacements.push(Replacement::new(start, end, text));
        self
    }

    /// Inserts `text` at `offset`.
    pub fn insert(self, offset: u32, text: impl Into<String>) -> Self {
        self.replace(offset, offset, text)
    }

    /// Deletes `start..end`.
    pub fn delete(self, start: u32, end: u32) -> Self {
        self.replace(start, end, "")
    }

    /// Requests a regular import; cancels a pending removal of the same name.
    pub fn add_import(self, path: impl Into<String>) -> Self {
        self.add(ImportName::new(path))
    }

    /// Requests a static import; cancels a pending removal of the same name.
    pub fn add_static_import(self, path: impl Into<String>) -> Self {
        self.add(ImportName::new_static(path))
    }

    /// Requests removal of a regular import; cancels a pending addition.
    pub fn remove_import(self, path: impl Into<String>) -> Self {
        self.remove(ImportName::new(path))
    }

    /// Requests removal of a static import; cancels a pending addition.
    pub fn remove_static_import(self, path: impl Into<String>) -> Self {
        self.remove(ImportName::new_static(path))
    }

    /// Folds another fix's replacements and import changes into this one.
    ///
    /// The description is kept unless this builder has none yet.
    pub fn merge(mut self, other: &Fix) -> Self {
        if self.fix.description.is_empty() {
            self.fix.description = other.description.clone();
        }
        self.fix
            .replacements
            .extend(other.replacements.iter().cloned());
        for name in &other.imports_to_add {
            self = self.add(name.clone());
        }
        for name in &other.imports_to_remove {
            self = self.remove(name.clone());
        }
        self
    }

    /// Finishes the fix.
    pub fn build(self) -> Fix {
        self.fix
    }

    fn add(mut self, name: ImportName) -> Self {
        self.fix.imports_to_remove.remove(&name);
        self.fix.imports_to_add.insert(name);
        self
    }

    fn remove(mut self, name: ImportName) -> Self {
        self.fix.imports_to_add.remove(&name);
        self.fix.imports_to_remove.insert(name);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn builder_collects_edits() {
        let fix = Fix::builder()
            .short_description("use List")
            .replace(10, 20, "List")
            .insert(5, "final ")
            .delete(30, 35)
            .add_import("java.util.List")
            .build();
        assert_eq!(fix.description(), "use List");
        assert_eq!(fix.replacements().len(), 3);
        assert_eq!(fix.replacements()[2], Replacement::new(30, 35, ""));
        assert!(fix.has_import_changes());
        assert!(!fix.is_empty());
    }

    #[test]
    fn add_cancels_remove() {
        let fix = Fix::builder()
            .remove_import("a.A")
            .add_import("a.A")
            .remove_static_import("b.B.c")
            .build();
        assert!(fix.imports_to_add().contains(&ImportName::new("a.A")));
        assert!(fix.imports_to_remove().contains(&ImportName::new_static("b.B.c")));
        assert!(!fix.imports_to_remove().contains(&ImportName::new("a.A")));
    }

    #[test]
    fn merge_combines_fixes() {
        let first = Fix::builder()
            .short_description("first")
            .replace(0, 1, "x")
            .add_static_import("a.B.c")
            .build();
        let merged = Fix::builder().replace(5, 6, "y").merge(&first).build();
        assert_eq!(merged.description(), "first");
        assert_eq!(merged.replacements().len(), 2);
        assert_eq!(merged.imports_to_add().len(), 1);
    }

    #[test]
    fn equal_fixes_hash_alike() {
        let make = || Fix::builder().replace(1, 2, "z").add_import("q.Q").build();
        let mut set = HashSet::new();
        set.insert(make());
        set.insert(make());
        assert_eq!(set.len(), 1);
        assert_ne!(make(), Fix::builder().replace(1, 2, "w").build());
    }

    #[test]
    fn empty_fix() {
        assert!(Fix::default().is_empty());
    }

    #[test]
    fn replacement_overlap_rules() {
        let a = Replacement::new(10, 20, "x");
        assert!(a.overlaps(&Replacement::new(15, 25, "y")));
        assert!(a.overlaps(&Replacement::new(10, 20, "other")));
        assert!(a.overlaps(&Replacement::new(12, 12, "ins")));
        assert!(!a.overlaps(&Replacement::new(20, 30, "adjacent")));
        assert!(!a.overlaps(&Replacement::new(10, 10, "before")));
        assert!(!a.overlaps(&Replacement::new(20, 20, "after")));
        let ins = Replacement::new(7, 7, "a");
        assert!(ins.overlaps(&Replacement::new(7, 7, "b")));
    }

    #[test]
    #[should_panic(expected = "precedes start")]
    fn inverted_range_panics() {
        Replacement::new(5, 4, "");
    }

    #[test]
    fn deserializes_from_json() {
        let fix: Fix = serde_json::from_str(
            r#"{"replacements": [{"start": 5, "end": 8}], "imports_to_add": ["static a.B.c"]}"#,
        )
        .unwrap();
        assert_eq!(fix.description(), "");
        assert_eq!(fix.replacements()[0].text, "");
        assert!(fix.imports_to_add().iter().all(|i| i.is_static));
    }

    #[test]
    fn inverted_range_fails_to_deserialize() {
        let err = serde_json::from_str::<Fix>(r#"{"replacements": [{"start": 8, "end": 5}]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("end 5 precedes start 8"));
        let empty: Replacement = serde_json::from_str(r#"{"start": 4, "end": 4}"#).unwrap();
        assert!(empty.is_empty());
    }
}
