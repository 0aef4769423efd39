//! Forwarding of host compiler diagnostics into a report.

use crate::emitter::SarifEmitter;
use crate::error::ReportError;
use std::io::Write;
use tracing::trace;
use vigil_diagnostics::HostDiagnostic;
use vigil_source::SourceText;

/// Receives host diagnostics as the host reports them.
pub trait DiagnosticHandler {
    /// Handles one diagnostic. `source` is the file it belongs to, if any.
    fn report(
        &mut self,
        diag: &HostDiagnostic,
        source: Option<&dyn SourceText>,
    ) -> Result<(), ReportError>;
}

/// The end of a handler chain: drops every diagnostic.
impl DiagnosticHandler for () {
    fn report(&mut self, _: &HostDiagnostic, _: Option<&dyn SourceText>) -> Result<(), ReportError> {
        Ok(())
    }
}

/// Writes host diagnostics to a report, then passes them on to `next`.
///
/// Diagnostics that echo a check finding are not written: the finding
/// reaches the report through its description, with its fixes. They are
/// still passed on.
pub struct SarifDiagnosticHandler<'e, W: Write, N> {
    emitter: &'e mut SarifEmitter<W>,
    next: N,
}

impl<'e, W: Write, N: DiagnosticHandler> SarifDiagnosticHandler<'e, W, N> {
    /// Installs the handler in front of `next`.
    pub fn new(emitter: &'e mut SarifEmitter<W>, next: N) -> Self {
        Self { emitter, next }
    }

    /// Removes the handler and returns the one it was installed in front of.
    pub fn into_next(self) -> N {
        self.next
    }
}

impl<W: Write, N: DiagnosticHandler> DiagnosticHandler for SarifDiagnosticHandler<'_, W, N> {
    fn report(
        &mut self,
        diag: &HostDiagnostic,
        source: Option<&dyn SourceText>,
    ) -> Result<(), ReportError> {
        if diag.is_check_report() {
            trace!(code = %diag.code, "check finding echoed by host; not written");
        } else {
            self.emitter.emit_host(diag, source)?;
        }
        self.next.report(diag, source)
    }
}
