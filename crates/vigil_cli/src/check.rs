//! `vigil check`: prints a batch of findings to the terminal.

use vigil_diagnostics::{DiagnosticRenderer, Severity, TerminalRenderer};

use crate::input::load_batch;
use crate::{CheckArgs, GlobalArgs};

/// Counts of rendered findings by severity.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// Error findings.
    pub errors: usize,
    /// Warning findings.
    pub warnings: usize,
    /// Suggestion findings.
    pub suggestions: usize,
}

impl Summary {
    fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
            Severity::Suggestion => self.suggestions += 1,
        }
    }
}

/// Renders every finding of the batch and counts them.
pub fn render_batch(
    args: &CheckArgs,
    color: bool,
) -> Result<(Vec<String>, Summary), Box<dyn std::error::Error>> {
    let batch = load_batch(&args.input)?;
    let renderer = TerminalRenderer::new(color);
    let mut summary = Summary::default();
    let mut rendered = Vec::with_capacity(batch.descriptions.len());
    for desc in &batch.descriptions {
        rendered.push(renderer.render(desc, &batch.source_db));
        summary.record(desc.severity);
    }
    Ok((rendered, summary))
}

/// Runs the `vigil check` command.
///
/// Returns exit code 0 if there are no error findings, 1 otherwise.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let (rendered, summary) = render_batch(args, global.color)?;
    for text in &rendered {
        if !global.quiet || text.starts_with("error") {
            eprintln!("{text}");
        }
    }
    if !global.quiet {
        eprintln!(
            "   Found {} error(s), {} warning(s), {} suggestion(s)",
            summary.errors, summary.warnings, summary.suggestions
        );
    }
    Ok(if summary.errors > 0 { 1 } else { 0 })
}
