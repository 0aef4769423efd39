//! Streaming JSON document writer with a bounded scope stack.

use crate::escape::write_escaped;
use std::fmt;
use std::io::{self, Write};

/// Maximum number of simultaneously open scopes, the implicit outer object included.
///
/// Report documents have a fixed schema, so their nesting depth is known in
/// advance; a SARIF replacement region sits twelve scopes deep.
pub const MAX_DEPTH: usize = 16;

/// The kind of an open nesting level.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Scope {
    /// A `{ ... }` scope whose members are named.
    Object,
    /// A `[ ... ]` scope whose elements are unnamed.
    Array,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Object => write!(f, "object"),
            Scope::Array => write!(f, "array"),
        }
    }
}

/// One open scope: its kind and whether it already holds an item.
#[derive(Clone, Copy, Debug)]
struct Frame {
    scope: Scope,
    has_items: bool,
}

impl Frame {
    const EMPTY_OBJECT: Frame = Frame {
        scope: Scope::Object,
        has_items: false,
    };
}

/// Writes one JSON document incrementally to a sink.
///
/// The outer object is opened by [`new`](Self::new) and closed by
/// [`finish`](Self::finish); everything in between is written through the
/// `open_*`/`close_*`/`write_*` calls, which return `&mut Self` so that
/// sequences chain with `?`:
///
/// ```
/// # use vigil_json::JsonWriter;
/// # fn main() -> std::io::Result<()> {
/// let mut w = JsonWriter::new(Vec::new())?;
/// w.open_object("message")?.write_string("text", "hi")?.close_object()?;
/// let bytes = w.finish()?;
/// assert_eq!(bytes, b"{\n\"message\": {\"text\": \"hi\"}\n}\n");
/// # Ok(())
/// # }
/// ```
///
/// A name is required for every item written inside an object and forbidden
/// inside an array. Breaking that rule, closing a scope of the wrong kind, or
/// nesting deeper than [`MAX_DEPTH`] panics.
pub struct JsonWriter<W: Write> {
    sink: W,
    frames: [Frame; MAX_DEPTH],
    /// Number of open frames; frame 0 is the outer object.
    depth: usize,
}

impl<W: Write> JsonWriter<W> {
    /// Opens the outer object of a new document on `sink`.
    pub fn new(mut sink: W) -> io::Result<Self> {
        sink.write_all(b"{\n")?;
        Ok(Self {
            sink,
            frames: [Frame::EMPTY_OBJECT; MAX_DEPTH],
            depth: 1,
        })
    }

    /// Number of scopes opened by the caller and not yet closed.
    pub fn depth(&self) -> usize {
        self.depth - 1
    }

    /// Kind of the innermost open scope.
    pub fn current_scope(&self) -> Scope {
        self.frames[self.depth - 1].scope
    }

    /// Opens an object; `name` must be given inside objects and omitted inside arrays.
    pub fn open_object<'n>(&mut self, name: impl Into<Option<&'n str>>) -> io::Result<&mut Self> {
        self.begin_item(name.into())?;
        self.sink.write_all(b"{")?;
        self.push(Scope::Object);
        Ok(self)
    }

    /// Closes the innermost scope, which must be an object.
    pub fn close_object(&mut self) -> io::Result<&mut Self> {
        self.pop(Scope::Object);
        self.sink.write_all(b"}")?;
        Ok(self)
    }

    /// Opens an array; `name` must be given inside objects and omitted inside arrays.
    pub fn open_array<'n>(&mut self, name: impl Into<Option<&'n str>>) -> io::Result<&mut Self> {
        self.begin_item(name.into())?;
        self.sink.write_all(b"[")?;
        self.push(Scope::Array);
        Ok(self)
    }

    /// Closes the innermost scope, which must be an array.
    pub fn close_array(&mut self) -> io::Result<&mut Self> {
        self.pop(Scope::Array);
        self.sink.write_all(b"]")?;
        Ok(self)
    }

    /// Writes an escaped string value.
    pub fn write_string<'n>(
        &mut self,
        name: impl Into<Option<&'n str>>,
        value: &str,
    ) -> io::Result<&mut Self> {
        self.begin_item(name.into())?;
        write_escaped(&mut self.sink, value)?;
        Ok(self)
    }

    /// Writes an integer value.
    pub fn write_number<'n>(
        &mut self,
        name: impl Into<Option<&'n str>>,
        value: i64,
    ) -> io::Result<&mut Self> {
        self.begin_item(name.into())?;
        write!(self.sink, "{value}")?;
        Ok(self)
    }

    /// Writes a boolean value.
    pub fn write_bool<'n>(
        &mut self,
        name: impl Into<Option<&'n str>>,
        value: bool,
    ) -> io::Result<&mut Self> {
        self.begin_item(name.into())?;
        let literal: &[u8] = if value { b"true" } else { b"false" };
        self.sink.write_all(literal)?;
        Ok(self)
    }

    /// Closes the outer object, flushes, and returns the sink.
    ///
    /// # Panics
    ///
    /// Panics if any scope opened by the caller is still open.
    pub fn finish(mut self) -> io::Result<W> {
        assert!(
            self.depth == 1,
            "cannot finish document: {} scope(s) still open (innermost: {})",
            self.depth - 1,
            self.current_scope()
        );
        self.sink.write_all(b"\n}\n")?;
        self.sink.flush()?;
        Ok(self.sink)
    }

    /// Validates naming for the current scope, then writes the separator and key.
    fn begin_item(&mut self, name: Option<&str>) -> io::Result<()> {
        let frame = &mut self.frames[self.depth - 1];
        match (frame.scope, name) {
            (Scope::Object, None) => panic!("items inside an object must be named"),
            (Scope::Array, Some(name)) => {
                panic!("items inside an array cannot be named (got {name:?})")
            }
            (Scope::Object, Some(_)) | (Scope::Array, None) => {}
        }
        if std::mem::replace(&mut frame.has_items, true) {
            self.sink.write_all(b", ")?;
        }
        if let Some(name) = name {
            write_escaped(&mut self.sink, name)?;
            self.sink.write_all(b": ")?;
        }
        Ok(())
    }

    fn push(&mut self, scope: Scope) {
        assert!(
            self.depth < MAX_DEPTH,
            "document nesting exceeds {MAX_DEPTH} scopes"
        );
        self.frames[self.depth] = Frame {
            scope,
            has_items: false,
        };
        self.depth += 1;
    }

    fn pop(&mut self, expected: Scope) {
        assert!(self.depth > 1, "no open {expected} to close");
        let actual = self.frames[self.depth - 1].scope;
        assert!(
            actual == expected,
            "cannot close {expected}: innermost open scope is an {actual}"
        );
        self.depth -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(build: impl FnOnce(&mut JsonWriter<Vec<u8>>) -> io::Result<()>) -> String {
        let mut w = JsonWriter::new(Vec::new()).unwrap();
        build(&mut w).unwrap();
        String::from_utf8(w.finish().unwrap()).unwrap()
    }

    #[test]
    fn empty_document() {
        assert_eq!(render(|_| Ok(())), "{\n\n}\n");
    }

    #[test]
    fn exact_layout() {
        let out = render(|w| {
            w.write_string("version", "2.1.0")?
                .open_array("runs")?
                .open_object(None)?
                .write_number("n", 3)?
                .write_bool("ok", true)?
                .close_object()?
                .close_array()?;
            Ok(())
        });
        assert_eq!(
            out,
            "{\n\"version\": \"2.1.0\", \"runs\": [{\"n\": 3, \"ok\": true}]\n}\n"
        );
    }

    #[test]
    fn separators_are_tracked_per_scope() {
        let out = render(|w| {
            w.open_array("items")?;
            for i in 0..3 {
                w.open_object(None)?
                    .write_number("i", i)?
                    .open_array("tags")?
                    .write_string(None, "a")?
                    .write_string(None, "b")?
                    .close_array()?
                    .close_object()?;
            }
            w.close_array()?.write_bool("done", false)?;
            Ok(())
        });
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["items"].as_array().unwrap().len(), 3);
        assert_eq!(value["items"][2]["i"], 2);
        assert_eq!(value["items"][1]["tags"][1], "b");
        assert_eq!(value["done"], false);
    }

    #[test]
    fn balanced_sequences_produce_balanced_output() {
        // Opens: 1 outer + 4 objects + 3 arrays.
        let out = render(|w| {
            w.open_object("a")?
                .open_array("b")?
                .open_object(None)?
                .open_array("c")?
                .open_array(None)?
                .close_array()?
                .close_array()?
                .close_object()?
                .open_object(None)?
                .close_object()?
                .close_array()?
                .close_object()?
                .open_object("d")?
                .close_object()?;
            Ok(())
        });
        assert_eq!(out.matches('{').count(), 4);
        assert_eq!(out.matches('}').count(), 4);
        assert_eq!(out.matches('[').count(), 3);
        assert_eq!(out.matches(']').count(), 3);
        serde_json::from_str::<serde_json::Value>(&out).unwrap();
    }

    #[test]
    fn keys_are_escaped() {
        let out = render(|w| {
            w.write_string("$schema", "x")?.write_string("a\"b", "y")?;
            Ok(())
        });
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["a\"b"], "y");
        assert_eq!(value["$schema"], "x");
    }

    #[test]
    fn depth_tracks_open_scopes() {
        let mut w = JsonWriter::new(Vec::new()).unwrap();
        assert_eq!(w.depth(), 0);
        assert_eq!(w.current_scope(), Scope::Object);
        w.open_array("a").unwrap().open_object(None).unwrap();
        assert_eq!(w.depth(), 2);
        w.close_object().unwrap();
        assert_eq!(w.current_scope(), Scope::Array);
        w.close_array().unwrap();
        assert_eq!(w.depth(), 0);
    }

    #[test]
    fn max_depth_is_reachable() {
        let out = render(|w| {
            for _ in 1..MAX_DEPTH {
                let name = match w.current_scope() {
                    Scope::Object => Some("x"),
                    Scope::Array => None,
                };
                w.open_array(name)?;
            }
            for _ in 1..MAX_DEPTH {
                w.close_array()?;
            }
            Ok(())
        });
        serde_json::from_str::<serde_json::Value>(&out).unwrap();
    }

    #[test]
    #[should_panic(expected = "nesting exceeds")]
    fn exceeding_max_depth_panics() {
        let mut w = JsonWriter::new(Vec::new()).unwrap();
        w.open_array("x").unwrap();
        for _ in 0..MAX_DEPTH {
            w.open_array(None).unwrap();
        }
    }

    #[test]
    #[should_panic(expected = "must be named")]
    fn unnamed_item_in_object_panics() {
        let mut w = JsonWriter::new(Vec::new()).unwrap();
        w.write_string(None, "x").unwrap();
    }

    #[test]
    #[should_panic(expected = "cannot be named")]
    fn named_item_in_array_panics() {
        let mut w = JsonWriter::new(Vec::new()).unwrap();
        w.open_array("a").unwrap().write_number("n", 1).unwrap();
    }

    #[test]
    #[should_panic(expected = "cannot close array")]
    fn mismatched_close_panics() {
        let mut w = JsonWriter::new(Vec::new()).unwrap();
        w.open_object("a").unwrap().close_array().unwrap();
    }

    #[test]
    #[should_panic(expected = "no open object")]
    fn closing_the_outer_object_panics() {
        let mut w = JsonWriter::new(Vec::new()).unwrap();
        w.close_object().unwrap();
    }

    #[test]
    #[should_panic(expected = "still open")]
    fn finish_with_open_scope_panics() {
        let mut w = JsonWriter::new(Vec::new()).unwrap();
        w.open_array("results").unwrap();
        let _ = w.finish();
    }

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn sink_errors_propagate() {
        let err = JsonWriter::new(FailingSink).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
