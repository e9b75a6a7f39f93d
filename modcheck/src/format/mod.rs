//! Format-specific syntax checkers.
//!
//! Each sub-module is a pure function from file content to diagnostics:
//! - `json`: well-formedness via `serde_json`
//! - `xml`: well-formedness via `roxmltree`
//! - `script`: heuristic lexical checks for WitcherScript
//!
//! [`check`] dispatches on the classified format and wraps the result in a
//! [`Verdict`].

pub mod json;
pub mod script;
pub mod xml;

use crate::config::ScriptPolicy;
use crate::strategy::FileFormat;
use crate::verdict::{ValidationTarget, Verdict};

/// Run the checker matching `target.detected_format` over `content`.
///
/// Returns `None` for [`FileFormat::Unknown`]: such targets get no verdict.
#[must_use]
pub fn check(target: ValidationTarget, content: &str, policy: ScriptPolicy) -> Option<Verdict> {
    let diagnostics = match target.detected_format {
        FileFormat::Json => json::check_json(content),
        FileFormat::Xml => xml::check_xml(content),
        FileFormat::Script => script::check_script(content, policy),
        FileFormat::Unknown => return None,
    };
    Some(Verdict::new(target, diagnostics))
}
