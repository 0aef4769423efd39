//! Human-readable rendering of findings for terminal output.

use crate::applied_fix::AppliedFix;
use crate::description::Description;
use crate::message::suggestion_text;
use crate::severity::Severity;
use vigil_source::{SourceDb, SourceFile, SourceText};

/// Trait for rendering findings into formatted output strings.
pub trait DiagnosticRenderer {
    /// Renders a single finding into a formatted string.
    fn render(&self, desc: &Description, source_db: &SourceDb) -> String;
}

/// Renders findings in a rustc-style terminal format.
///
/// Produces output like:
/// ```text
/// warning[UnusedVariable]: the variable 'x' is never read
///   --> src/Main.java:3:9
///    |
///  3 |     int x = 1;
///    |         ^
///    = help: Did you mean 'int x;' or to remove this line?
///    = note: see https://errorprone.info/bugpattern/UnusedVariable
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn severity_label(&self, severity: Severity) -> String {
        if !self.color {
            return severity.to_string();
        }
        let code = match severity {
            Severity::Error => "31",
            Severity::Warning => "33",
            Severity::Suggestion => "36",
        };
        format!("\x1b[1;{code}m{severity}\x1b[0m")
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, desc: &Description, source_db: &SourceDb) -> String {
        let mut out = format!(
            "{}[{}]: {}\n",
            self.severity_label(desc.severity),
            desc.check_name,
            desc.message
        );

        let file = source_db.file(desc.file);
        if let Some(file) = file.filter(|f| f.is_valid_offset(desc.start)) {
            let resolved = source_db.resolve(desc.file, desc.start, desc.end_or_start());
            out.push_str(&format!("  --> {resolved}\n"));

            let line_num = resolved.start_line.to_string();
            let padding = " ".repeat(line_num.len());
            let (line_content, underline) = underline(file, desc.start, desc.end_or_start());
            out.push_str(&format!("{padding} |\n"));
            out.push_str(&format!("{line_num} | {line_content}\n"));
            out.push_str(&format!("{padding} | {underline}\n"));
        }

        if let Some(file) = file {
            let applied: Vec<AppliedFix> = desc
                .reportable_fixes()
                .filter_map(|fix| AppliedFix::for_fix(&file.content, fix))
                .collect();
            if let Some(suggestion) = suggestion_text(&applied) {
                out.push_str(&format!("   = help: {suggestion}\n"));
            }
        }

        if let Some(link) = &desc.link {
            out.push_str(&format!("   = note: see {link}\n"));
        }

        out
    }
}

/// The source line holding `start` and a caret line marking `start..end` on it.
///
/// Tabs before the range are echoed so the carets stay aligned.
fn underline(file: &SourceFile, start: u32, end: u32) -> (&str, String) {
    let content = &file.content;
    let start = start as usize;
    let line_start = content[..start].rfind('\n').map_or(0, |pos| pos + 1);
    let line_end = content[start..]
        .find('\n')
        .map_or(content.len(), |pos| start + pos);
    let line = content[line_start..line_end].trim_end_matches('\r');

    let prefix: String = content[line_start..start]
        .chars()
        .map(|ch| if ch == '\t' { '\t' } else { ' ' })
        .collect();
    let span_end = (end as usize).clamp(start, line_end);
    let width = content
        .get(start..span_end)
        .map_or(0, |s| s.chars().count())
        .max(1);
    (line, format!("{prefix}{}", "^".repeat(width)))
}
