//! JSON well-formedness checker.

use serde::de::IgnoredAny;

use crate::verdict::Diagnostic;

/// Check that `content` is a single well-formed JSON document.
///
/// No schema or semantic checks are made. A parse failure yields exactly one
/// ERROR carrying the parser message and its line/column.
#[must_use]
pub fn check_json(content: &str) -> Vec<Diagnostic> {
    match serde_json::from_str::<IgnoredAny>(content) {
        Ok(_) => Vec::new(),
        Err(e) => {
            let diagnostic = Diagnostic::error(format!("Invalid JSON: {e}"));
            // serde_json reports line 0 when no position applies
            let diagnostic = if e.line() > 0 {
                diagnostic.at_position(e.line(), e.column())
            } else {
                diagnostic
            };
            vec![diagnostic]
        }
    }
}
