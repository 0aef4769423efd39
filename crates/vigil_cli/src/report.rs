//! `vigil report`: streams a batch of diagnostics into a SARIF file.
//!
//! 1. Load the batch and its sources
//! 2. Resolve `vigil.toml` (and the `--output` override)
//! 3. Emit every finding, then every host diagnostic
//! 4. Close the report

use tracing::info;
use vigil_diagnostics::HostDiagnostic;
use vigil_report::{DiagnosticHandler, ReportError, SarifDiagnosticHandler, SarifEmitter};
use vigil_source::SourceText;

use crate::input::{load_batch, resolve_config};
use crate::{GlobalArgs, ReportArgs};

/// Last handler in the chain: logs what the host reported.
struct HostLog;

impl DiagnosticHandler for HostLog {
    fn report(
        &mut self,
        diag: &HostDiagnostic,
        _: Option<&dyn SourceText>,
    ) -> Result<(), ReportError> {
        tracing::debug!(code = %diag.code, kind = ?diag.kind, "host diagnostic");
        Ok(())
    }
}

/// Runs the `vigil report` command.
///
/// Returns exit code 0 if no errors were reported, 1 otherwise.
pub fn run(args: &ReportArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let batch = load_batch(&args.input)?;
    let mut config = resolve_config(global)?;
    if let Some(ref output) = args.output {
        config.output.path = output.clone();
    }

    let mut emitter = SarifEmitter::create(&config)?;
    for desc in &batch.descriptions {
        let (file, unit) = batch.file(desc.file)?;
        emitter.emit_description(desc, file, unit)?;
    }

    let mut handler = SarifDiagnosticHandler::new(&mut emitter, HostLog);
    for diag in &batch.host_diagnostics {
        handler.report(diag, batch.source(diag.file))?;
    }

    let results = emitter.results_written();
    let rendered = emitter.fixes_rendered();
    emitter.close()?;
    info!(results, fixes_rendered = rendered, "report complete");

    if !global.quiet {
        eprintln!(
            "   Reported {results} result(s) to {}",
            config.output.path.display()
        );
    }

    Ok(if batch.has_errors() { 1 } else { 0 })
}
