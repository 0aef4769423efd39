//! Streaming SARIF 2.1.0 report emission.

use crate::error::ReportError;
use crate::fix_renderer::{FixRenderer, RenderedFix};
use crate::region::Region;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::rc::Rc;
use tracing::{debug, info, warn};
use vigil_config::{ReportConfig, DEFAULT_ENCODING, UNKNOWN_VERSION};
use vigil_diagnostics::{CoalescePolicy, Description, HostDiagnostic, Level};
use vigil_imports::{CompilationUnit, OrganizerStrategy};
use vigil_json::JsonWriter;
use vigil_source::SourceText;

/// SARIF version written in the document header.
pub const SARIF_VERSION: &str = "2.1.0";

/// JSON schema the document conforms to.
pub const SARIF_SCHEMA: &str =
    "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";

/// Column unit advertised in the run header.
pub const COLUMN_KIND: &str = "utf16CodeUnits";

/// Settings for one report run.
#[derive(Clone, Debug)]
pub struct EmitterOptions {
    /// `tool.driver.name`.
    pub tool_name: String,
    /// `tool.driver.version`.
    pub tool_version: String,
    /// `defaultFileEncoding`.
    pub encoding: String,
    /// Locale used to render host diagnostic messages.
    pub locale: String,
    /// Import block layout for fixes that edit imports.
    pub organizer: OrganizerStrategy,
    /// Resolution of overlapping explicit replacements within a fix.
    pub explicit_policy: CoalescePolicy,
}

impl EmitterOptions {
    /// Options taken from a loaded configuration.
    pub fn from_config(config: &ReportConfig) -> Self {
        Self {
            tool_name: config.tool.name.clone(),
            tool_version: config.tool.version.clone(),
            encoding: config.output.effective_encoding().to_string(),
            locale: config.output.locale.clone(),
            organizer: config.imports.organizer,
            explicit_policy: config.fixes.overlapping_replacements.coalesce_policy(),
        }
    }
}

impl Default for EmitterOptions {
    fn default() -> Self {
        Self {
            tool_name: "vigil".to_string(),
            tool_version: UNKNOWN_VERSION.to_string(),
            encoding: DEFAULT_ENCODING.to_string(),
            locale: "en".to_string(),
            organizer: OrganizerStrategy::default(),
            explicit_policy: CoalescePolicy::ReplacementFirst,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum State {
    /// Header written, no result yet.
    HeaderOpen,
    /// At least one result written.
    Streaming,
    /// A write or render failed; nothing more may be written.
    Failed,
}

/// Writes one SARIF run, result by result, to a sink.
///
/// The header is written on construction and the document is completed by
/// [`close`](Self::close), which consumes the emitter. Any failure moves the
/// emitter to a failed state in which every later call returns
/// [`ReportError::Aborted`].
pub struct SarifEmitter<W: Write> {
    writer: JsonWriter<W>,
    renderer: FixRenderer,
    locale: String,
    state: State,
    results: usize,
}

impl SarifEmitter<BufWriter<File>> {
    /// Creates the configured output file (and its parent directories) and
    /// starts a report in it.
    pub fn create(config: &ReportConfig) -> Result<Self, ReportError> {
        let path = &config.output.path;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        info!(path = %path.display(), "writing SARIF report");
        Self::new(BufWriter::new(file), EmitterOptions::from_config(config))
    }
}

impl<W: Write> SarifEmitter<W> {
    /// Writes the document header to `sink` and opens the results array.
    pub fn new(sink: W, options: EmitterOptions) -> Result<Self, ReportError> {
        let mut writer = JsonWriter::new(sink)?;
        writer
            .write_string("version", SARIF_VERSION)?
            .write_string("$schema", SARIF_SCHEMA)?
            .open_array("runs")?
            .open_object(None)?
            .write_string("defaultFileEncoding", &options.encoding)?
            .write_string("columnKind", COLUMN_KIND)?
            .open_object("tool")?
            .open_object("driver")?
            .write_string("name", &options.tool_name)?
            .write_string("version", &options.tool_version)?
            .close_object()?
            .close_object()?
            .open_array("results")?;
        debug!(tool = %options.tool_name, encoding = %options.encoding, "report header written");
        Ok(Self {
            writer,
            renderer: FixRenderer::new(options.organizer.organizer(), options.explicit_policy),
            locale: options.locale,
            state: State::HeaderOpen,
            results: 0,
        })
    }

    /// Number of results written so far.
    pub fn results_written(&self) -> usize {
        self.results
    }

    /// Number of fixes rendered, excluding cache hits.
    pub fn fixes_rendered(&self) -> usize {
        self.renderer.render_count()
    }

    /// Returns `true` once a write or render has failed.
    pub fn is_failed(&self) -> bool {
        self.state == State::Failed
    }

    /// Writes a check finding with its location and reportable fixes.
    ///
    /// The location and every fix are resolved before anything is written, so
    /// a render error leaves no partial result in the document.
    pub fn emit_description(
        &mut self,
        desc: &Description,
        source: &dyn SourceText,
        unit: &CompilationUnit,
    ) -> Result<(), ReportError> {
        self.ensure_usable()?;
        let outcome = self.write_description(desc, source, unit);
        self.track(outcome)
    }

    /// Writes a diagnostic raised by the host compiler.
    ///
    /// `source` is the file the diagnostic belongs to, if any; without it no
    /// location is written.
    pub fn emit_host(
        &mut self,
        diag: &HostDiagnostic,
        source: Option<&dyn SourceText>,
    ) -> Result<(), ReportError> {
        self.ensure_usable()?;
        let outcome = self.write_host(diag, source);
        self.track(outcome)
    }

    /// Closes the results, the run, and the document, then flushes and
    /// returns the sink.
    pub fn close(mut self) -> Result<W, ReportError> {
        self.ensure_usable()?;
        self.writer
            .close_array()? // results
            .close_object()? // run
            .close_array()?; // runs
        let sink = self.writer.finish()?;
        info!(
            results = self.results,
            fixes_rendered = self.renderer.render_count(),
            "SARIF report closed"
        );
        Ok(sink)
    }

    fn ensure_usable(&self) -> Result<(), ReportError> {
        match self.state {
            State::Failed => Err(ReportError::Aborted),
            State::HeaderOpen | State::Streaming => Ok(()),
        }
    }

    fn track(&mut self, outcome: Result<(), ReportError>) -> Result<(), ReportError> {
        match outcome {
            Ok(()) => {
                self.state = State::Streaming;
                self.results += 1;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "report failed; no further results will be written");
                self.state = State::Failed;
                Err(err)
            }
        }
    }

    fn write_description(
        &mut self,
        desc: &Description,
        source: &dyn SourceText,
        unit: &CompilationUnit,
    ) -> Result<(), ReportError> {
        let region = Region::resolve(source, desc.start, desc.end_or_start())?;
        let fixes = desc
            .reportable_fixes()
            .map(|fix| self.renderer.render(fix, source, unit))
            .collect::<Result<Vec<Rc<RenderedFix>>, ReportError>>()?;
        let suppressed = desc.fixes.len() - fixes.len();
        if suppressed > 0 {
            debug!(
                check = %desc.check_name,
                suppressed,
                "import-editing fixes on an import declaration dropped"
            );
        }

        let uri = source.uri();
        let writer = &mut self.writer;
        writer
            .open_object(None)?
            .write_string("ruleId", &desc.check_name)?
            .write_string("level", Level::from(desc.severity).as_str())?
            .open_object("message")?
            .write_string("text", &desc.message)?
            .close_object()?;
        write_locations(writer, uri, Some(&region))?;
        if !fixes.is_empty() {
            writer.open_array("fixes")?;
            for fix in &fixes {
                write_fix(writer, uri, fix)?;
            }
            writer.close_array()?;
        }
        writer.close_object()?;
        Ok(())
    }

    fn write_host(
        &mut self,
        diag: &HostDiagnostic,
        source: Option<&dyn SourceText>,
    ) -> Result<(), ReportError> {
        let region = match (source, diag.position) {
            (Some(source), Some(position)) => Some(Region::resolve(
                source,
                position.start,
                position.end.unwrap_or(position.start),
            )?),
            _ => None,
        };

        let writer = &mut self.writer;
        writer.open_object(None)?;
        if let Some(category) = &diag.lint_category {
            writer.write_string("ruleId", category)?;
        }
        writer
            .write_string("level", Level::from(diag.kind).as_str())?
            .open_object("message")?
            .write_string("text", diag.message.render(&self.locale))?
            .close_object()?;
        if let Some(source) = source {
            write_locations(writer, source.uri(), region.as_ref())?;
        }
        writer.close_object()?;
        Ok(())
    }
}

/// Writes `locations: [{physicalLocation: {artifactLocation, region?}}]`.
fn write_locations<W: Write>(
    writer: &mut JsonWriter<W>,
    uri: &str,
    region: Option<&Region>,
) -> Result<(), ReportError> {
    writer
        .open_array("locations")?
        .open_object(None)?
        .open_object("physicalLocation")?;
    write_artifact_location(writer, uri)?;
    if let Some(region) = region {
        write_region(writer, "region", region)?;
    }
    writer
        .close_object()? // physicalLocation
        .close_object()? // location
        .close_array()?; // locations
    Ok(())
}

fn write_artifact_location<W: Write>(
    writer: &mut JsonWriter<W>,
    uri: &str,
) -> Result<(), ReportError> {
    writer
        .open_object("artifactLocation")?
        .write_string("uri", uri)?
        .close_object()?;
    Ok(())
}

fn write_region<W: Write>(
    writer: &mut JsonWriter<W>,
    name: &str,
    region: &Region,
) -> Result<(), ReportError> {
    writer
        .open_object(name)?
        .write_number("startLine", region.start_line.into())?
        .write_number("startColumn", region.start_column.into())?
        .write_number("endLine", region.end_line.into())?
        .write_number("endColumn", region.end_column.into())?
        .write_number("charOffset", region.char_offset.into())?
        .write_number("charLength", region.char_length.into())?
        .close_object()?;
    Ok(())
}

/// Writes one fix object: an optional description and one artifact change
/// per replacement.
fn write_fix<W: Write>(
    writer: &mut JsonWriter<W>,
    uri: &str,
    fix: &RenderedFix,
) -> Result<(), ReportError> {
    writer.open_object(None)?;
    if !fix.description.is_empty() {
        writer
            .open_object("description")?
            .write_string("text", &fix.description)?
            .close_object()?;
    }
    writer.open_array("artifactChanges")?;
    for replacement in &fix.replacements {
        writer.open_object(None)?;
        write_artifact_location(writer, uri)?;
        writer.open_array("replacements")?.open_object(None)?;
        write_region(writer, "deletedRegion", &replacement.region)?;
        if !replacement.text.is_empty() {
            writer
                .open_object("insertedContent")?
                .write_string("text", &replacement.text)?
                .close_object()?;
        }
        writer
            .close_object()? // replacement
            .close_array()? // replacements
            .close_object()?; // artifact change
    }
    writer
        .close_array()? // artifactChanges
        .close_object()?; // fix
    Ok(())
}
