//! Human-readable finding messages with fix suggestions appended.

use crate::applied_fix::AppliedFix;

/// Builds the "Did you mean ...?" sentence for a list of fix previews.
///
/// Returns `None` when there are no previews.
pub fn suggestion_text(applied: &[AppliedFix]) -> Option<String> {
    if applied.is_empty() {
        return None;
    }
    let options: Vec<String> = applied
        .iter()
        .map(|fix| {
            if fix.is_remove_line() {
                "to remove this line".to_string()
            } else {
                format!("'{}'", fix.snippet())
            }
        })
        .collect();
    Some(format!("Did you mean {}?", options.join(" or ")))
}

/// The finding message followed, on a new line, by its fix suggestion.
pub fn description_message(message: &str, applied: &[AppliedFix]) -> String {
    match suggestion_text(applied) {
        Some(suggestion) => format!("{message}\n{suggestion}"),
        None => message.to_string(),
    }
}
