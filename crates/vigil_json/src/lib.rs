//! Minimal streaming JSON writer for report documents.
//!
//! [`JsonWriter`] emits nested objects and arrays straight to an
//! [`std::io::Write`] sink. It never buffers document structure: the only
//! state it keeps is a fixed-capacity scope stack with one separator flag per
//! open scope. Misuse (naming an array element, closing the wrong scope,
//! finishing with open scopes) panics, since a malformed report is worse than
//! a crash. Sink failures surface as [`std::io::Error`].

#![warn(missing_docs)]

pub mod escape;
pub mod writer;

pub use escape::write_escaped;
pub use writer::{JsonWriter, Scope, MAX_DEPTH};
