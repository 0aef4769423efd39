//! Loading of diagnostic batches and reporting configuration.
//!
//! A batch is a JSON file listing the analysed source files together with
//! the findings and host diagnostics produced for them:
//!
//! ```json
//! {
//!   "sources": ["src/Main.java"],
//!   "descriptions": [
//!     {"check_name": "DeadException", "severity": "error",
//!      "message": "exception created but not thrown", "file": 0, "start": 100, "end": 110}
//!   ],
//!   "host_diagnostics": []
//! }
//! ```
//!
//! `file` fields index into `sources`. Relative source paths are resolved
//! against the directory holding the batch file.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;
use vigil_config::{load_config, load_config_from_str, ReportConfig, CONFIG_FILE_NAME};
use vigil_diagnostics::{Description, HostDiagnostic, HostKind, Severity};
use vigil_imports::CompilationUnit;
use vigil_source::{FileId, SourceDb, SourceFile, SourceText};

use crate::GlobalArgs;

/// Report path used when no configuration file is found.
pub const DEFAULT_REPORT_PATH: &str = "vigil.sarif";

/// The on-disk shape of a batch file.
#[derive(Debug, Deserialize)]
pub struct DiagnosticBatch {
    /// Source files, indexed by the `file` fields below.
    pub sources: Vec<PathBuf>,
    /// Findings produced by checks.
    #[serde(default)]
    pub descriptions: Vec<Description>,
    /// Diagnostics produced by the host compiler.
    #[serde(default)]
    pub host_diagnostics: Vec<HostDiagnostic>,
}

/// A batch with its sources loaded and scanned.
pub struct LoadedBatch {
    /// The loaded sources, in batch order.
    pub source_db: SourceDb,
    /// The import shape of each source, by file index.
    pub units: Vec<CompilationUnit>,
    /// Findings produced by checks.
    pub descriptions: Vec<Description>,
    /// Diagnostics produced by the host compiler.
    pub host_diagnostics: Vec<HostDiagnostic>,
}

impl LoadedBatch {
    /// The source file and compilation unit for `id`.
    pub fn file(
        &self,
        id: FileId,
    ) -> Result<(&SourceFile, &CompilationUnit), Box<dyn std::error::Error>> {
        let file = self
            .source_db
            .file(id)
            .ok_or_else(|| format!("file index {} is not listed in sources", id.as_raw()))?;
        Ok((file, &self.units[id.as_raw() as usize]))
    }

    /// The source text for `id`, if it was loaded.
    pub fn source(&self, id: Option<FileId>) -> Option<&dyn SourceText> {
        id.and_then(|id| self.source_db.file(id))
            .map(|file| file as &dyn SourceText)
    }

    /// Returns `true` if any finding or reported host diagnostic is an error.
    ///
    /// Host echoes of check findings are not reported, so they do not count.
    pub fn has_errors(&self) -> bool {
        self.descriptions
            .iter()
            .any(|desc| desc.severity == Severity::Error)
            || self
                .host_diagnostics
                .iter()
                .any(|diag| diag.kind == HostKind::Error && !diag.is_check_report())
    }
}

/// Reads a batch file and loads every source it lists.
pub fn load_batch(path: &Path) -> Result<LoadedBatch, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let batch: DiagnosticBatch = serde_json::from_str(&content)
        .map_err(|e| format!("invalid batch {}: {e}", path.display()))?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));

    let mut source_db = SourceDb::new();
    let mut units = Vec::with_capacity(batch.sources.len());
    for source in &batch.sources {
        let full = if source.is_absolute() {
            source.clone()
        } else {
            base.join(source)
        };
        let content = std::fs::read_to_string(&full)
            .map_err(|e| format!("failed to read source {}: {e}", full.display()))?;
        units.push(CompilationUnit::scan(&content));
        // Keep the listed path so report URIs stay relative when the batch is.
        source_db.add_source(source.clone(), content);
    }
    debug!(
        sources = batch.sources.len(),
        descriptions = batch.descriptions.len(),
        host_diagnostics = batch.host_diagnostics.len(),
        "batch loaded"
    );

    Ok(LoadedBatch {
        source_db,
        units,
        descriptions: batch.descriptions,
        host_diagnostics: batch.host_diagnostics,
    })
}

/// Resolves the reporting configuration from global CLI args.
///
/// `--config` may name a file or a directory holding `vigil.toml`. Without
/// it, `vigil.toml` in the current directory is used if present, and
/// defaults otherwise.
pub fn resolve_config(global: &GlobalArgs) -> Result<ReportConfig, Box<dyn std::error::Error>> {
    if let Some(ref config_path) = global.config {
        let path = PathBuf::from(config_path);
        let config = if path.is_file() {
            load_config_from_str(&std::fs::read_to_string(&path)?)?
        } else {
            load_config(&path)?
        };
        return Ok(config);
    }
    let cwd = std::env::current_dir()?;
    if cwd.join(CONFIG_FILE_NAME).is_file() {
        return Ok(load_config(&cwd)?);
    }
    Ok(ReportConfig::with_output(DEFAULT_REPORT_PATH))
}
