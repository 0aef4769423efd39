//! Strategies for ordering and grouping an import block.

use crate::import_name::ImportName;
use serde::Deserialize;

/// Imports grouped in output order; groups are separated by a blank line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrganizedImports {
    groups: Vec<Vec<ImportName>>,
}

impl OrganizedImports {
    /// Appends a group; empty groups are dropped.
    pub fn push_group(&mut self, group: Vec<ImportName>) {
        if !group.is_empty() {
            self.groups.push(group);
        }
    }

    /// The non-empty groups in output order.
    pub fn groups(&self) -> &[Vec<ImportName>] {
        &self.groups
    }

    /// Renders the block: one statement per line, a blank line between groups,
    /// no trailing newline.
    pub fn as_import_block(&self) -> String {
        self.groups
            .iter()
            .map(|group| {
                group
                    .iter()
                    .map(ImportName::statement)
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Orders a set of imports into an import block.
pub trait ImportOrganizer {
    /// Groups and orders `imports`; the input is sorted and duplicate-free.
    fn organize(&self, imports: &[ImportName]) -> OrganizedImports;
}

/// Where static imports go relative to regular ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StaticOrder {
    /// Static imports precede regular imports.
    First,
    /// Static imports follow regular imports.
    Last,
}

/// One group of static imports and one group of regular imports, each
/// sorted lexicographically.
#[derive(Clone, Copy, Debug)]
pub struct BasicOrganizer {
    /// Placement of the static group.
    pub statics: StaticOrder,
}

impl ImportOrganizer for BasicOrganizer {
    fn organize(&self, imports: &[ImportName]) -> OrganizedImports {
        let (statics, regular) = split_sorted(imports);
        let mut organized = OrganizedImports::default();
        match self.statics {
            StaticOrder::First => {
                organized.push_group(statics);
                organized.push_group(regular);
            }
            StaticOrder::Last => {
                organized.push_group(regular);
                organized.push_group(statics);
            }
        }
        organized
    }
}

/// Root packages grouped ahead of third-party imports, in order.
const ANDROID_LEADING_ROOTS: &[&str] = &[
    "android",
    "com.android",
    "dalvik",
    "libcore",
    "org.apache",
    "org.json",
    "org.w3c.dom",
    "org.xml",
    "junit",
];

/// Root packages grouped after third-party imports, in order.
const ANDROID_TRAILING_ROOTS: &[&str] = &["java", "javax"];

/// Android platform ordering: well-known platform roots, then third-party
/// imports, then `java` and `javax`. Static imports are grouped the same way
/// and placed before or after all regular imports.
#[derive(Clone, Copy, Debug)]
pub struct AndroidOrganizer {
    /// Placement of the static groups.
    pub statics: StaticOrder,
}

impl AndroidOrganizer {
    fn group_rank(name: &ImportName) -> usize {
        let in_root = |root: &str| {
            name.path == root
                || name
                    .path
                    .strip_prefix(root)
                    .is_some_and(|rest| rest.starts_with('.'))
        };
        if let Some(idx) = ANDROID_LEADING_ROOTS.iter().position(|root| in_root(root)) {
            return idx;
        }
        let third_party = ANDROID_LEADING_ROOTS.len();
        match ANDROID_TRAILING_ROOTS.iter().position(|root| in_root(root)) {
            Some(idx) => third_party + 1 + idx,
            None => third_party,
        }
    }

    fn grouped(imports: Vec<ImportName>) -> Vec<Vec<ImportName>> {
        let rank_count = ANDROID_LEADING_ROOTS.len() + 1 + ANDROID_TRAILING_ROOTS.len();
        let mut groups = vec![Vec::new(); rank_count];
        for import in imports {
            groups[Self::group_rank(&import)].push(import);
        }
        groups
    }
}

impl ImportOrganizer for AndroidOrganizer {
    fn organize(&self, imports: &[ImportName]) -> OrganizedImports {
        let (statics, regular) = split_sorted(imports);
        let (first, second) = match self.statics {
            StaticOrder::First => (statics, regular),
            StaticOrder::Last => (regular, statics),
        };
        let mut organized = OrganizedImports::default();
        for group in Self::grouped(first).into_iter().chain(Self::grouped(second)) {
            organized.push_group(group);
        }
        organized
    }
}

/// Configurable organizer selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrganizerStrategy {
    /// [`BasicOrganizer`] with static imports first.
    #[default]
    StaticFirst,
    /// [`BasicOrganizer`] with static imports last.
    StaticLast,
    /// [`AndroidOrganizer`] with static imports first.
    AndroidStaticFirst,
    /// [`AndroidOrganizer`] with static imports last.
    AndroidStaticLast,
}

impl OrganizerStrategy {
    /// Instantiates the organizer for this strategy.
    pub fn organizer(self) -> Box<dyn ImportOrganizer> {
        match self {
            OrganizerStrategy::StaticFirst => Box::new(BasicOrganizer {
                statics: StaticOrder::First,
            }),
            OrganizerStrategy::StaticLast => Box::new(BasicOrganizer {
                statics: StaticOrder::Last,
            }),
            OrganizerStrategy::AndroidStaticFirst => Box::new(AndroidOrganizer {
                statics: StaticOrder::First,
            }),
            OrganizerStrategy::AndroidStaticLast => Box::new(AndroidOrganizer {
                statics: StaticOrder::Last,
            }),
        }
    }
}

/// Splits into (static, regular), each sorted by path.
fn split_sorted(imports: &[ImportName]) -> (Vec<ImportName>, Vec<ImportName>) {
    let (mut statics, mut regular): (Vec<_>, Vec<_>) =
        imports.iter().cloned().partition(|import| import.is_static);
    statics.sort_by(|a, b| a.path.cmp(&b.path));
    regular.sort_by(|a, b| a.path.cmp(&b.path));
    (statics, regular)
}
