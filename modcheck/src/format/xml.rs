//! XML well-formedness checker.

use roxmltree::{Document, ParsingOptions};

use crate::verdict::Diagnostic;

/// Check that `content` is a well-formed XML document.
///
/// DTDs are accepted but not validated against.
#[must_use]
pub fn check_xml(content: &str) -> Vec<Diagnostic> {
    let mut options = ParsingOptions::default();
    options.allow_dtd = true;

    match Document::parse_with_options(content, options) {
        Ok(_) => Vec::new(),
        Err(e) => {
            let pos = e.pos();
            vec![
                Diagnostic::error(format!("Invalid XML: {e}"))
                    .at_position(pos.row as usize, pos.col as usize),
            ]
        }
    }
}
