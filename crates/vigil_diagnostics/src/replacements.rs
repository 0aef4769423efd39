//! Ordered, non-overlapping replacement sets with explicit coalescing.

use crate::fix::Replacement;
use std::collections::BTreeMap;

/// How [`Replacements::add`] resolves a replacement that overlaps ones already
/// in the set.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CoalescePolicy {
    /// Keep the replacements already in the set; drop the new one.
    ReplacementFirst,
    /// Keep the new replacement; drop every replacement it overlaps.
    NewFirst,
    /// Refuse the new replacement with an [`OverlapError`].
    Reject,
}

/// A replacement refused under [`CoalescePolicy::Reject`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("replacement {new} overlaps existing replacement {existing}")]
pub struct OverlapError {
    /// A replacement already in the set that `new` overlaps.
    pub existing: Replacement,
    /// The refused replacement.
    pub new: Replacement,
}

/// The replacements of one fix in one file.
///
/// Entries are kept sorted by `(start, end)` and pairwise non-overlapping at
/// all times, so [`ascending`](Self::ascending) can be called any number of
/// times without further work.
#[derive(Clone, Debug, Default)]
pub struct Replacements {
    entries: BTreeMap<(u32, u32), Replacement>,
}

impl Replacements {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a replacement, resolving overlaps with `policy`.
    ///
    /// Adding a replacement identical to one already present is a no-op under
    /// every policy.
    pub fn add(
        &mut self,
        replacement: Replacement,
        policy: CoalescePolicy,
    ) -> Result<(), OverlapError> {
        if self.entries.get(&replacement.range()) == Some(&replacement) {
            return Ok(());
        }
        let overlapping = self.overlapping(&replacement);
        if overlapping.is_empty() {
            self.entries.insert(replacement.range(), replacement);
            return Ok(());
        }
        match policy {
            CoalescePolicy::ReplacementFirst => Ok(()),
            CoalescePolicy::NewFirst => {
                for key in overlapping {
                    self.entries.remove(&key);
                }
                self.entries.insert(replacement.range(), replacement);
                Ok(())
            }
            CoalescePolicy::Reject => Err(OverlapError {
                existing: self.entries[&overlapping[0]].clone(),
                new: replacement,
            }),
        }
    }

    /// Adds every replacement with the same `policy`, stopping at the first error.
    pub fn add_all<'a>(
        &mut self,
        replacements: impl IntoIterator<Item = &'a Replacement>,
        policy: CoalescePolicy,
    ) -> Result<(), OverlapError> {
        for replacement in replacements {
            self.add(replacement.clone(), policy)?;
        }
        Ok(())
    }

    /// Keys of entries overlapping `replacement`, in descending order.
    fn overlapping(&self, replacement: &Replacement) -> Vec<(u32, u32)> {
        // Entries are disjoint, so their ends ascend with their starts: scanning
        // back from the last entry starting at or before `replacement.end` can
        // stop at the first entry ending before `replacement.start`.
        self.entries
            .range(..=(replacement.end, u32::MAX))
            .rev()
            .take_while(|(_, existing)| existing.end >= replacement.start)
            .filter(|(_, existing)| existing.overlaps(replacement))
            .map(|(key, _)| *key)
            .collect()
    }

    /// Replacements in ascending offset order.
    pub fn ascending(&self) -> impl DoubleEndedIterator<Item = &Replacement> + ExactSizeIterator {
        self.entries.values()
    }

    /// Replacements in descending offset order, for back-to-front application.
    pub fn descending(&self) -> impl Iterator<Item = &Replacement> {
        self.entries.values().rev()
    }

    /// Number of replacements in the set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Applies every replacement to `text`.
    ///
    /// Returns `None` if any replacement is inverted, falls outside `text`,
    /// or splits a character.
    pub fn apply_to(&self, text: &str) -> Option<String> {
        let mut out = text.to_string();
        for replacement in self.descending() {
            let (start, end) = (replacement.start as usize, replacement.end as usize);
            if end < start
                || end > out.len()
                || !out.is_char_boundary(start)
                || !out.is_char_boundary(end)
            {
                return None;
            }
            out.replace_range(start..end, &replacement.text);
        }
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges(set: &Replacements) -> Vec<(u32, u32, &str)> {
        set.ascending()
            .map(|r| (r.start, r.end, r.text.as_str()))
            .collect()
    }

    #[test]
    fn keeps_ascending_order() {
        let mut set = Replacements::new();
        for (start, end) in [(30, 35), (0, 2), (10, 10), (10, 12)] {
            set.add(Replacement::new(start, end, "t"), CoalescePolicy::Reject)
                .unwrap();
        }
        let starts: Vec<_> = set.ascending().map(|r| (r.start, r.end)).collect();
        assert_eq!(starts, vec![(0, 2), (10, 10), (10, 12), (30, 35)]);
        let back: Vec<_> = set.descending().map(|r| r.start).collect();
        assert_eq!(back, vec![30, 10, 10, 0]);
    }

    #[test]
    fn replacement_first_keeps_existing() {
        let mut set = Replacements::new();
        set.add(Replacement::new(10, 20, "x"), CoalescePolicy::ReplacementFirst)
            .unwrap();
        set.add(Replacement::new(15, 25, "y"), CoalescePolicy::ReplacementFirst)
            .unwrap();
        assert_eq!(ranges(&set), vec![(10, 20, "x")]);
    }

    #[test]
    fn new_first_replaces_existing() {
        let mut set = Replacements::new();
        set.add(Replacement::new(10, 20, "x"), CoalescePolicy::NewFirst)
            .unwrap();
        set.add(Replacement::new(15, 25, "y"), CoalescePolicy::NewFirst)
            .unwrap();
        assert_eq!(ranges(&set), vec![(15, 25, "y")]);
    }

    #[test]
    fn new_first_evicts_every_overlapped_entry() {
        let mut set = Replacements::new();
        for (start, end) in [(0, 5), (6, 8), (9, 12), (20, 22)] {
            set.add(Replacement::new(start, end, ""), CoalescePolicy::Reject)
                .unwrap();
        }
        set.add(Replacement::new(4, 10, "wide"), CoalescePolicy::NewFirst)
            .unwrap();
        assert_eq!(ranges(&set), vec![(4, 10, "wide"), (20, 22, "")]);
    }

    #[test]
    fn reject_reports_conflict_and_keeps_set() {
        let mut set = Replacements::new();
        set.add(Replacement::new(10, 20, "x"), CoalescePolicy::Reject)
            .unwrap();
        let err = set
            .add(Replacement::new(15, 25, "y"), CoalescePolicy::Reject)
            .unwrap_err();
        assert_eq!(err.existing, Replacement::new(10, 20, "x"));
        assert_eq!(err.new, Replacement::new(15, 25, "y"));
        assert!(err.to_string().contains("overlaps"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn identical_replacement_is_idempotent() {
        let mut set = Replacements::new();
        set.add(Replacement::new(3, 3, "a"), CoalescePolicy::Reject)
            .unwrap();
        set.add(Replacement::new(3, 3, "a"), CoalescePolicy::Reject)
            .unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn insertions_at_same_offset_conflict() {
        let mut set = Replacements::new();
        set.add(Replacement::new(3, 3, "a"), CoalescePolicy::ReplacementFirst)
            .unwrap();
        set.add(Replacement::new(3, 3, "b"), CoalescePolicy::ReplacementFirst)
            .unwrap();
        assert_eq!(ranges(&set), vec![(3, 3, "a")]);
        set.add(Replacement::new(3, 3, "b"), CoalescePolicy::NewFirst)
            .unwrap();
        assert_eq!(ranges(&set), vec![(3, 3, "b")]);
    }

    #[test]
    fn adjacent_ranges_coexist() {
        let mut set = Replacements::new();
        set.add_all(
            &[
                Replacement::new(0, 5, "a"),
                Replacement::new(5, 5, "b"),
                Replacement::new(5, 9, "c"),
                Replacement::new(9, 9, "d"),
            ],
            CoalescePolicy::Reject,
        )
        .unwrap();
        assert_eq!(set.len(), 4);
        let pairs: Vec<_> = set.ascending().collect();
        for window in pairs.windows(2) {
            assert!(window[0].end <= window[1].start);
        }
    }

    #[test]
    fn insertion_inside_range_conflicts() {
        let mut set = Replacements::new();
        set.add(Replacement::new(0, 10, "a"), CoalescePolicy::Reject)
            .unwrap();
        assert!(set
            .add(Replacement::new(4, 4, "b"), CoalescePolicy::Reject)
            .is_err());
    }

    #[test]
    fn ascending_is_repeatable() {
        let mut set = Replacements::new();
        set.add(Replacement::new(1, 2, "x"), CoalescePolicy::Reject)
            .unwrap();
        let first: Vec<_> = set.ascending().cloned().collect();
        let second: Vec<_> = set.ascending().cloned().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn apply_back_to_front() {
        let mut set = Replacements::new();
        set.add_all(
            &[Replacement::new(0, 3, "let"), Replacement::new(8, 9, "")],
            CoalescePolicy::Reject,
        )
        .unwrap();
        assert_eq!(set.apply_to("var x = 1;").as_deref(), Some("let x = ;"));
        assert_eq!(set.apply_to("var"), None);
    }

    #[test]
    fn inverted_replacement_does_not_apply() {
        let mut set = Replacements::new();
        let inverted = Replacement {
            start: 8,
            end: 5,
            text: String::new(),
        };
        set.add(inverted, CoalescePolicy::Reject).unwrap();
        assert_eq!(set.apply_to("0123456789"), None);
    }
}
