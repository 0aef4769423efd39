//! Source file representation with line-start indexing for fast line/column lookup.

use crate::file_id::FileId;
use crate::source_text::{SourceText, TAB_WIDTH};
use std::path::{Path, PathBuf};

/// A source file loaded into the reporting session.
///
/// Stores the file's content along with precomputed line-start offsets so that
/// every region written to a report costs one binary search.
pub struct SourceFile {
    /// The unique identifier for this file within the [`SourceDb`](crate::SourceDb).
    pub id: FileId,
    /// The filesystem path of this file (or a synthetic name for in-memory sources).
    pub path: PathBuf,
    /// The URI written to reports for this file.
    pub uri: String,
    /// The full text content of the file.
    pub content: String,
    /// Byte offsets of each line start (the first entry is always 0).
    line_starts: Vec<u32>,
}

impl SourceFile {
    /// Creates a new `SourceFile` with precomputed line starts and its report URI.
    pub fn new(id: FileId, path: PathBuf, content: String) -> Self {
        let line_starts = compute_line_starts(&content);
        let uri = path_to_uri(&path);
        Self {
            id,
            path,
            uri,
            content,
            line_starts,
        }
    }

    /// Returns the 0-based index of the line containing `offset`.
    fn line_index(&self, offset: u32) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        }
    }

    /// Returns the text of the 1-based line `line`, without its terminator.
    pub fn line_text(&self, line: u32) -> &str {
        let idx = (line.max(1) - 1) as usize;
        let Some(&start) = self.line_starts.get(idx) else {
            return "";
        };
        let end = self
            .line_starts
            .get(idx + 1)
            .map_or(self.content.len(), |&next| next as usize - 1);
        self.content[start as usize..end].trim_end_matches('\r')
    }

    /// Returns a substring of the file content between byte offsets.
    pub fn snippet(&self, start: u32, end: u32) -> &str {
        &self.content[start as usize..end as usize]
    }

    /// Clamps `offset` into the text and moves it back onto a character boundary.
    fn floor_offset(&self, offset: u32) -> usize {
        let mut offset = (offset as usize).min(self.content.len());
        while !self.content.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }
}

impl SourceText for SourceFile {
    fn uri(&self) -> &str {
        &self.uri
    }

    fn text(&self) -> &str {
        &self.content
    }

    fn line_number(&self, offset: u32) -> u32 {
        let offset = self.floor_offset(offset) as u32;
        self.line_index(offset) as u32 + 1
    }

    fn column_number(&self, offset: u32, expand_tabs: bool) -> u32 {
        let offset = self.floor_offset(offset);
        let line_start = self.line_starts[self.line_index(offset as u32)] as usize;
        let mut column = 0u32;
        for ch in self.content[line_start..offset].chars() {
            if expand_tabs && ch == '\t' {
                column = (column / TAB_WIDTH) * TAB_WIDTH + TAB_WIDTH;
            } else {
                column += ch.len_utf16() as u32;
            }
        }
        column + 1
    }
}

/// Computes the byte offsets of each line start in the given content.
fn compute_line_starts(content: &str) -> Vec<u32> {
    let mut starts = vec![0u32];
    for (i, byte) in content.bytes().enumerate() {
        if byte == b'\n' {
            starts.push((i + 1) as u32);
        }
    }
    starts
}

/// Builds the report URI for a path: `file://` URIs for absolute paths,
/// forward-slash relative references otherwise.
fn path_to_uri(path: &Path) -> String {
    let display = path.to_string_lossy().replace('\\', "/");
    if path.is_absolute() {
        let encoded = display.replace(' ', "%20");
        if encoded.starts_with('/') {
            format!("file://{encoded}")
        } else {
            format!("file:///{encoded}")
        }
    } else {
        display
    }
}
