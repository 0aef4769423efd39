//! Diagnostic records, fixes, and replacement merging.
//!
//! This crate models what a check pipeline hands to the reporting layer:
//! [`Description`]s (a check's finding with candidate [`Fix`]es) and
//! [`HostDiagnostic`]s (messages raised by the host compiler itself). It also
//! owns [`Replacements`], the ordered non-overlapping edit set that fixes are
//! merged into, the [`AppliedFix`] preview used in human-readable messages,
//! and the [`TerminalRenderer`].

#![warn(missing_docs)]

pub mod applied_fix;
pub mod description;
pub mod fix;
pub mod host;
pub mod level;
pub mod message;
pub mod renderer;
pub mod replacements;
pub mod severity;

pub use applied_fix::AppliedFix;
pub use description::{Description, NodeKind};
pub use fix::{Fix, FixBuilder, InvertedRange, Replacement};
pub use host::{HostDiagnostic, HostKind, HostPosition, LocalizedText};
pub use level::Level;
pub use message::{description_message, suggestion_text};
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use replacements::{CoalescePolicy, OverlapError, Replacements};
pub use severity::Severity;
