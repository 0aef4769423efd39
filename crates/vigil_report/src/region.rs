//! Byte ranges resolved to report regions.

use crate::error::ReportError;
use vigil_source::SourceText;

/// A byte range resolved against its source: the fields of a SARIF `region`.
///
/// Lines and columns are 1-based and the end position is exclusive, so an
/// empty range has equal start and end coordinates. Columns, `char_offset`
/// and `char_length` all count UTF-16 code units, matching the run's
/// `columnKind`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Region {
    /// Line of the first byte.
    pub start_line: u32,
    /// Column of the first byte, in UTF-16 code units.
    pub start_column: u32,
    /// Line of the end position.
    pub end_line: u32,
    /// Column of the end position, in UTF-16 code units.
    pub end_column: u32,
    /// Offset of the range start from the beginning of the text.
    pub char_offset: u32,
    /// Length of the range.
    pub char_length: u32,
}

impl Region {
    /// Resolves the byte range `start..end` in `source`.
    ///
    /// Fails if the range is inverted or either end is not a character
    /// boundary inside the text.
    pub fn resolve(source: &dyn SourceText, start: u32, end: u32) -> Result<Region, ReportError> {
        check_range(source, start, end)?;
        let char_offset = source.utf16_offset(start);
        Ok(Region {
            start_line: source.line_number(start),
            start_column: source.column_number(start, false),
            end_line: source.line_number(end),
            end_column: source.column_number(end, false),
            char_offset,
            char_length: source.utf16_offset(end) - char_offset,
        })
    }
}

/// Checks that `start..end` is a well-formed range of `source`.
pub fn check_range(source: &dyn SourceText, start: u32, end: u32) -> Result<(), ReportError> {
    if end < start {
        return Err(ReportError::InvalidRange { start, end });
    }
    for offset in [start, end] {
        if !source.is_valid_offset(offset) {
            return Err(ReportError::OffsetOutOfBounds {
                uri: source.uri().to_string(),
                offset,
                len: source.len(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use vigil_source::{FileId, SourceFile};

    fn file(content: &str) -> SourceFile {
        SourceFile::new(
            FileId::from_raw(0),
            PathBuf::from("src/A.java"),
            content.to_string(),
        )
    }

    #[test]
    fn resolves_single_line_range() {
        let src = file("class A {\n  int x;\n}\n");
        let region = Region::resolve(&src, 12, 15).unwrap();
        assert_eq!(
            region,
            Region {
                start_line: 2,
                start_column: 3,
                end_line: 2,
                end_column: 6,
                char_offset: 12,
                char_length: 3,
            }
        );
    }

    #[test]
    fn resolves_multi_line_range() {
        let src = file("a\nbb\nccc\n");
        let region = Region::resolve(&src, 1, 6).unwrap();
        assert_eq!((region.start_line, region.start_column), (1, 2));
        assert_eq!((region.end_line, region.end_column), (3, 2));
        assert_eq!(region.char_length, 5);
    }

    #[test]
    fn empty_range_at_end_of_text() {
        let src = file("ab");
        let region = Region::resolve(&src, 2, 2).unwrap();
        assert_eq!(region.char_length, 0);
        assert_eq!(region.end_column, 3);
    }

    #[test]
    fn columns_count_utf16_units() {
        let src = file("s = \"😀\";");
        // the emoji is 4 bytes and 2 UTF-16 units
        let region = Region::resolve(&src, 5, 9).unwrap();
        assert_eq!(region.start_column, 6);
        assert_eq!(region.end_column, 8);
    }

    #[test]
    fn char_offsets_agree_with_columns() {
        let src = file("éx");
        let region = Region::resolve(&src, 2, 3).unwrap();
        assert_eq!(region.char_offset, 1);
        assert_eq!(region.char_length, 1);
        assert_eq!(region.start_column, region.char_offset + 1);
    }

    #[test]
    fn char_length_counts_surrogate_pairs() {
        let src = file("a\n\"😀\" b");
        // the emoji spans bytes 3..7
        let region = Region::resolve(&src, 3, 7).unwrap();
        assert_eq!((region.char_offset, region.char_length), (3, 2));
        assert_eq!((region.start_column, region.end_column), (2, 4));
    }

    #[test]
    fn rejects_out_of_bounds() {
        let src = file("abc");
        let err = Region::resolve(&src, 1, 10).unwrap_err();
        assert!(matches!(
            err,
            ReportError::OffsetOutOfBounds {
                offset: 10,
                len: 3,
                ..
            }
        ));
    }

    #[test]
    fn rejects_inverted_range() {
        let src = file("abcdef");
        let err = Region::resolve(&src, 4, 2).unwrap_err();
        assert!(matches!(err, ReportError::InvalidRange { start: 4, end: 2 }));
    }

    #[test]
    fn rejects_offset_inside_character() {
        let src = file("é");
        assert!(Region::resolve(&src, 1, 2).is_err());
    }
}
