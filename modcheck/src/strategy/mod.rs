//! File discovery and classification.
//!
//! The filesystem walker lives in `fs`; classification is a pure function of
//! the path and is kept here so checkers and the runner share one definition.

pub mod fs;

use std::fmt;
use std::path::Path;

use serde::Serialize;

/// Extension used by WitcherScript sources.
pub const SCRIPT_EXTENSION: &str = "ws";

/// Format a file is checked as.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum FileFormat {
    Json,
    Xml,
    Script,
    Unknown,
}

impl FileFormat {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Xml => "XML",
            Self::Script => "WitcherScript",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Determine the format from the file extension (case-insensitive).
#[must_use]
pub fn classify(path: &Path) -> FileFormat {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return FileFormat::Unknown;
    };
    match ext.to_ascii_lowercase().as_str() {
        "json" => FileFormat::Json,
        "xml" => FileFormat::Xml,
        SCRIPT_EXTENSION => FileFormat::Script,
        _ => FileFormat::Unknown,
    }
}
