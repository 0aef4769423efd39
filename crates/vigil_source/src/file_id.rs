//! Opaque identifier for source files loaded into a reporting session.

use serde::{Deserialize, Serialize};

/// Opaque identifier for a source file loaded into the [`SourceDb`](crate::SourceDb).
///
/// Diagnostics carry a `FileId` instead of the file itself; the emitter
/// resolves it back to a [`SourceFile`](crate::SourceFile) when it needs the
/// text for offset translation.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(u32);

impl FileId {
    /// Creates a `FileId` from a raw `u32` value.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw `u32` value of this `FileId`.
    pub const fn as_raw(self) -> u32 {
        self.0
    }
}
