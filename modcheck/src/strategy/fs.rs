//! Filesystem validation source.
//!
//! Discovers candidate files on disk and reads them for the checkers.
//! - Symlinks (to files or directories) are not followed unless configured
//! - Every directory under the root is descended into; use exclude patterns to skip
//! - Device files, pipes, and sockets are skipped
//! - Maximum directory depth is enforced
//! - Bounded reads keep oversized files out of memory

use std::io::Read;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use walkdir::WalkDir;

use crate::error::{ConfigError, ScanError, ScanErrorKind};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// A parsed list of glob patterns.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    /// Parse every pattern, failing on the first invalid one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] if a pattern does not parse.
    pub fn new(patterns: &[String]) -> Result<Self, ConfigError> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| ConfigError::InvalidPattern {
                    pattern: p.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Whether the file name of `path` matches any pattern.
    #[must_use]
    pub fn matches_name(&self, path: &Path) -> bool {
        path.file_name().is_some_and(|name| {
            let name = name.to_string_lossy();
            self.patterns
                .iter()
                .any(|p| p.matches_with(&name, MATCH_OPTIONS))
        })
    }

    /// Whether the full path or the file name of `path` matches any pattern.
    #[must_use]
    pub fn matches_path(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.patterns
            .iter()
            .any(|p| p.matches_with(&path_str, MATCH_OPTIONS))
            || self.matches_name(path)
    }
}

/// Traversal options shared by every target of a run.
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    pub exclude: PatternSet,
    pub follow_links: bool,
    pub max_depth: usize,
}

#[cfg(unix)]
fn is_special_file(entry: &walkdir::DirEntry) -> bool {
    use std::os::unix::fs::FileTypeExt;
    entry.metadata().map(|m| m.file_type()).is_ok_and(|ft| {
        ft.is_block_device() || ft.is_char_device() || ft.is_fifo() || ft.is_socket()
    })
}

#[cfg(not(unix))]
fn is_special_file(_entry: &walkdir::DirEntry) -> bool {
    false
}

/// Lazily enumerate files under `root` whose name matches `patterns`.
///
/// Yields paths in traversal order. A missing `root` yields nothing; the caller
/// decides how to report it. Traversal failures (permission denied, symlink
/// loops) are yielded as `Err` and never silently dropped.
pub fn walk<'a>(
    root: &Path,
    patterns: &'a PatternSet,
    options: &'a WalkOptions,
) -> impl Iterator<Item = Result<PathBuf, ScanError>> + use<'a> {
    let root_buf = root.to_path_buf();
    let entries = root
        .is_dir()
        .then(|| {
            WalkDir::new(root)
                .follow_links(options.follow_links)
                .max_depth(options.max_depth)
                .into_iter()
        })
        .into_iter()
        .flatten();

    entries.filter_map(move |entry_result| {
        let entry = match entry_result {
            Ok(e) => e,
            Err(walk_err) => {
                let path = walk_err
                    .path()
                    .map_or_else(|| root_buf.clone(), Path::to_path_buf);
                return Some(Err(ScanError::new(
                    path,
                    ScanErrorKind::WalkError,
                    format!("Directory traversal error: {walk_err}"),
                )));
            }
        };

        // `DirEntry::file_type` only resolves symlinks when `follow_links` is set.
        let path = entry.path();
        if !entry.file_type().is_file() || is_special_file(&entry) {
            return None;
        }
        if !patterns.matches_name(path) {
            return None;
        }
        if options.exclude.matches_path(path) {
            tracing::debug!(path = %path.display(), "excluded by pattern");
            return None;
        }
        Some(Ok(path.to_path_buf()))
    })
}

/// Read a file using a bounded streaming read, enforcing `max_file_size`.
///
/// Reads at most `max_file_size + 1` bytes so that an oversized file is
/// detected without loading it entirely.
///
/// # Errors
///
/// Returns a [`ScanError`] if the file cannot be opened or read, exceeds
/// `max_file_size`, or is not valid UTF-8.
pub fn read_file_bounded(path: &Path, max_file_size: u64) -> Result<String, ScanError> {
    let file = std::fs::File::open(path).map_err(|e| {
        ScanError::new(
            path.to_owned(),
            ScanErrorKind::IoError,
            format!("Failed to open file: {e}"),
        )
    })?;

    let mut buffer = Vec::new();
    file.take(max_file_size.saturating_add(1))
        .read_to_end(&mut buffer)
        .map_err(|e| {
            ScanError::new(
                path.to_owned(),
                ScanErrorKind::IoError,
                format!("Failed to read file: {e}"),
            )
        })?;

    if buffer.len() as u64 > max_file_size {
        return Err(ScanError::new(
            path.to_owned(),
            ScanErrorKind::FileTooLarge,
            format!("File exceeds maximum size of {max_file_size} bytes"),
        ));
    }

    String::from_utf8(buffer).map_err(|_| {
        ScanError::new(
            path.to_owned(),
            ScanErrorKind::InvalidEncoding,
            "File is not valid UTF-8".to_owned(),
        )
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn patterns(list: &[&str]) -> PatternSet {
        let owned: Vec<String> = list.iter().map(|p| (*p).to_owned()).collect();
        PatternSet::new(&owned).unwrap()
    }

    fn options() -> WalkOptions {
        WalkOptions {
            max_depth: 64,
            ..WalkOptions::default()
        }
    }

    fn collect(root: &Path, set: &PatternSet, opts: &WalkOptions) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = walk(root, set, opts).map(Result::unwrap).collect();
        files.sort();
        files
    }

    #[test]
    fn test_walk_matches_patterns_recursively() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("game").join("witcher3_mp");
        fs::create_dir_all(&nested).unwrap();
        fs::write(tmp.path().join("a.json"), "{}").unwrap();
        fs::write(nested.join("b.ws"), "").unwrap();
        fs::write(nested.join("notes.txt"), "").unwrap();

        let files = collect(tmp.path(), &patterns(&["*.json", "*.ws"]), &options());
        assert_eq!(files, vec![tmp.path().join("a.json"), nested.join("b.ws")]);
    }

    #[test]
    fn test_walk_pattern_match_ignores_case() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("MENU.XML"), "<a/>").unwrap();

        let files = collect(tmp.path(), &patterns(&["*.xml"]), &options());
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_walk_missing_root_yields_nothing() {
        let tmp = TempDir::new().unwrap();
        let set = patterns(&["*.json"]);
        let opts = options();
        let missing = tmp.path().join("nope");
        assert_eq!(walk(&missing, &set, &opts).count(), 0);
    }

    #[test]
    fn test_walk_skips_excluded_paths() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("backup")).unwrap();
        fs::write(tmp.path().join("backup").join("old.json"), "{}").unwrap();
        fs::write(tmp.path().join("keep.json"), "{}").unwrap();

        let mut opts = options();
        opts.exclude = patterns(&["*/backup/*"]);
        let files = collect(tmp.path(), &patterns(&["*.json"]), &opts);
        assert_eq!(files, vec![tmp.path().join("keep.json")]);
    }

    #[test]
    fn test_walk_descends_into_every_directory() {
        let tmp = TempDir::new().unwrap();
        for dir in ["target", "node_modules", ".git"] {
            fs::create_dir_all(tmp.path().join(dir)).unwrap();
            fs::write(tmp.path().join(dir).join("x.json"), "{").unwrap();
        }

        let files = collect(tmp.path(), &patterns(&["*.json"]), &options());
        assert_eq!(
            files,
            vec![
                tmp.path().join(".git").join("x.json"),
                tmp.path().join("node_modules").join("x.json"),
                tmp.path().join("target").join("x.json"),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_skips_file_symlinks_unless_following() {
        let outside = TempDir::new().unwrap();
        let secret = outside.path().join("outside.json");
        fs::write(&secret, "{}").unwrap();

        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("inside.json"), "{}").unwrap();
        std::os::unix::fs::symlink(&secret, tmp.path().join("link.json")).unwrap();

        let set = patterns(&["*.json"]);
        let files = collect(tmp.path(), &set, &options());
        assert_eq!(files, vec![tmp.path().join("inside.json")]);

        let mut following = options();
        following.follow_links = true;
        let files = collect(tmp.path(), &set, &following);
        assert_eq!(
            files,
            vec![tmp.path().join("inside.json"), tmp.path().join("link.json")]
        );
    }

    #[test]
    fn test_read_file_bounded_rejects_oversized() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("big.json");
        fs::write(&path, "0123456789").unwrap();

        let err = read_file_bounded(&path, 4).unwrap_err();
        assert_eq!(err.kind, ScanErrorKind::FileTooLarge);
        assert_eq!(read_file_bounded(&path, 10).unwrap(), "0123456789");
    }

    #[test]
    fn test_read_file_bounded_rejects_invalid_utf8() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.ws");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let err = read_file_bounded(&path, 1024).unwrap_err();
        assert_eq!(err.kind, ScanErrorKind::InvalidEncoding);
    }

    #[test]
    fn test_read_file_bounded_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = read_file_bounded(&tmp.path().join("gone.json"), 1024).unwrap_err();
        assert_eq!(err.kind, ScanErrorKind::IoError);
        assert!(err.message.starts_with("Failed to open file"));
    }
}
