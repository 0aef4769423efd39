//! Error types for report generation.

use vigil_diagnostics::OverlapError;

/// Errors that can occur while rendering fixes or writing a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Writing to the report sink failed.
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    /// An offset lies outside the source text or inside a character.
    #[error("offset {offset} is not a valid position in {uri} ({len} bytes)")]
    OffsetOutOfBounds {
        /// The source the offset was resolved against.
        uri: String,
        /// The offending offset.
        offset: u32,
        /// Length of the source text in bytes.
        len: u32,
    },

    /// A range whose end precedes its start.
    #[error("invalid range: end {end} precedes start {start}")]
    InvalidRange {
        /// Start offset.
        start: u32,
        /// End offset.
        end: u32,
    },

    /// Two explicit replacements of a fix overlap and the policy rejects it.
    #[error(transparent)]
    Overlap(#[from] OverlapError),

    /// An earlier write failed; the report can no longer be completed.
    #[error("report aborted after an earlier write failure")]
    Aborted,
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_diagnostics::Replacement;

    #[test]
    fn display_out_of_bounds() {
        let err = ReportError::OffsetOutOfBounds {
            uri: "A.java".to_string(),
            offset: 120,
            len: 100,
        };
        assert_eq!(
            err.to_string(),
            "offset 120 is not a valid position in A.java (100 bytes)"
        );
    }

    #[test]
    fn display_overlap_is_transparent() {
        let err = ReportError::from(OverlapError {
            existing: Replacement::new(1, 4, "a"),
            new: Replacement::new(2, 3, "b"),
        });
        assert!(err.to_string().starts_with("replacement [2, 3)"));
    }

    #[test]
    fn io_error_converts() {
        let err: ReportError = std::io::Error::other("disk full").into();
        assert!(matches!(err, ReportError::Io(_)));
        assert_eq!(err.to_string(), "failed to write report: disk full");
    }
}
