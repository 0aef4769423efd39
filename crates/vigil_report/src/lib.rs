//! Streaming SARIF reports for check findings and host diagnostics.
//!
//! [`SarifEmitter`] writes one SARIF 2.1.0 run through a
//! [`JsonWriter`](vigil_json::JsonWriter), one result at a time, so the report
//! never has to be held in memory. Offsets are resolved to line/column
//! [`Region`]s through the [`SourceText`](vigil_source::SourceText) of the
//! file each finding belongs to. Fixes go through a [`FixRenderer`] that
//! merges their replacements and any import block rewrite into one ordered,
//! non-overlapping list and caches the result per distinct fix.

#![warn(missing_docs)]

pub mod emitter;
pub mod error;
pub mod fix_renderer;
pub mod handler;
pub mod region;

pub use emitter::{EmitterOptions, SarifEmitter, COLUMN_KIND, SARIF_SCHEMA, SARIF_VERSION};
pub use error::ReportError;
pub use fix_renderer::{FixRenderer, RenderedFix, RenderedReplacement};
pub use handler::{DiagnosticHandler, SarifDiagnosticHandler};
pub use region::{check_range, Region};
