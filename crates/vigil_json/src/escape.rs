//! JSON string escaping.

use std::io::{self, Write};

/// Returns the two-character escape for `byte`, if it has one.
fn short_escape(byte: u8) -> Option<&'static [u8]> {
    match byte {
        b'"' => Some(b"\\\""),
        b'\\' => Some(b"\\\\"),
        0x08 => Some(b"\\b"),
        0x0c => Some(b"\\f"),
        b'\n' => Some(b"\\n"),
        b'\r' => Some(b"\\r"),
        b'\t' => Some(b"\\t"),
        _ => None,
    }
}

fn needs_escaping(byte: u8) -> bool {
    byte == b'"' || byte == b'\\' || byte < 0x20
}

/// Writes `s` as a quoted JSON string.
///
/// Quotation mark, reverse solidus, and U+0000 through U+001F are escaped;
/// everything else, including non-ASCII text, is written verbatim. Every
/// escapable character is ASCII, so scanning bytes never splits a UTF-8
/// sequence.
pub fn write_escaped<W: Write>(out: &mut W, s: &str) -> io::Result<()> {
    let bytes = s.as_bytes();
    out.write_all(b"\"")?;
    let mut run_start = 0;
    for (i, &byte) in bytes.iter().enumerate() {
        if !needs_escaping(byte) {
            continue;
        }
        if run_start < i {
            out.write_all(&bytes[run_start..i])?;
        }
        match short_escape(byte) {
            Some(seq) => out.write_all(seq)?,
            None => write!(out, "\\u{byte:04x}")?,
        }
        run_start = i + 1;
    }
    if run_start < bytes.len() {
        out.write_all(&bytes[run_start..])?;
    }
    out.write_all(b"\"")
}
