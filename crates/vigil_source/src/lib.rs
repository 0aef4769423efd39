//! Source file management and offset translation for diagnostic reports.
//!
//! This crate provides the [`SourceDb`] for loading and managing source files,
//! the [`FileId`] handle used by diagnostics to name their file, and the
//! [`SourceText`] accessor that converts byte offsets into the 1-based
//! line/column coordinates written to reports.

#![warn(missing_docs)]

pub mod file_id;
pub mod resolved_span;
pub mod source_db;
pub mod source_file;
pub mod source_text;

pub use file_id::FileId;
pub use resolved_span::ResolvedSpan;
pub use source_db::SourceDb;
pub use source_file::SourceFile;
pub use source_text::{SourceText, TAB_WIDTH};
