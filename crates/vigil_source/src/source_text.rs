//! The offset-translation contract consumed by report emitters.

/// Column width of a tab stop when columns are computed with tab expansion.
pub const TAB_WIDTH: u32 = 8;

/// Read access to one source file's text and its coordinate system.
///
/// Offsets are byte offsets into [`text`](Self::text). Lines and columns are
/// 1-based. Columns count UTF-16 code units, which is the `columnKind` the
/// SARIF header advertises.
pub trait SourceText {
    /// The URI reported as `artifactLocation.uri`.
    fn uri(&self) -> &str;

    /// The full source text.
    fn text(&self) -> &str;

    /// Returns the 1-based line containing `offset`.
    ///
    /// Offsets past the end of the text resolve to the last line.
    fn line_number(&self, offset: u32) -> u32;

    /// Returns the 1-based column of `offset` within its line.
    ///
    /// With `expand_tabs`, a tab advances the column to the next multiple of
    /// [`TAB_WIDTH`].
    fn column_number(&self, offset: u32, expand_tabs: bool) -> u32;

    /// Length of the text in bytes.
    fn len(&self) -> u32 {
        self.text().len() as u32
    }

    /// Returns `true` if the text is empty.
    fn is_empty(&self) -> bool {
        self.text().is_empty()
    }

    /// Returns the number of UTF-16 code units before byte `offset`.
    ///
    /// Reports state `charOffset` and `charLength` in these units. Offsets
    /// past the end clamp to the text length; offsets inside a character
    /// floor to its start.
    fn utf16_offset(&self, offset: u32) -> u32 {
        let text = self.text();
        let mut offset = (offset as usize).min(text.len());
        while !text.is_char_boundary(offset) {
            offset -= 1;
        }
        text[..offset].encode_utf16().count() as u32
    }

    /// Returns `true` if `offset` lies within the text on a character boundary.
    fn is_valid_offset(&self, offset: u32) -> bool {
        self.text().is_char_boundary(offset as usize)
    }
}
