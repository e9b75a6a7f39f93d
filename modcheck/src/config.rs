//! Configuration types for a validation run.
//!
//! All glob patterns are compiled up front by [`ValidationConfig::compile`] so
//! that a misconfigured run fails before any file is touched.

use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::strategy::fs::{PatternSet, WalkOptions};

/// One root directory and the file-name globs to collect beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct ScanTarget {
    /// Directory walked recursively.
    pub root: PathBuf,
    /// File-name globs (e.g. `*.json`). A file matching any of them is collected.
    pub patterns: Vec<String>,
}

impl ScanTarget {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, patterns: &[&str]) -> Self {
        Self {
            root: root.into(),
            patterns: patterns.iter().map(|p| (*p).to_owned()).collect(),
        }
    }
}

/// Parses `ROOT=PATTERN[,PATTERN...]`, e.g. `mod/config=*.json,*.xml`.
impl FromStr for ScanTarget {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidTarget(s.to_owned());
        let (root, patterns) = s.split_once('=').ok_or_else(invalid)?;
        let root = root.trim();
        let patterns: Vec<String> = patterns
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_owned)
            .collect();
        if root.is_empty() || patterns.is_empty() {
            return Err(invalid());
        }
        Ok(Self {
            root: PathBuf::from(root),
            patterns,
        })
    }
}

/// How WitcherScript heuristic issues map to severities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScriptPolicy {
    /// Every script issue is a WARNING; scripts never fail the run (default).
    #[default]
    Lenient,
    /// Unbalanced braces or parentheses are ERRORs; other issues stay WARNINGs.
    Strict,
}

/// Options for a validation run.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ValidationConfig {
    /// Directories to walk, each with its own patterns. Required, must be non-empty.
    pub targets: Vec<ScanTarget>,
    /// Exclude patterns (glob format), matched against the path and the file name.
    pub exclude: Vec<String>,
    /// Maximum file size in bytes (default: 10 MB).
    pub max_file_size: u64,
    /// Whether to follow symbolic links (default: `false`).
    pub follow_links: bool,
    /// Maximum directory traversal depth (default: 64).
    pub max_depth: usize,
    /// Severity mapping for script issues.
    pub script_policy: ScriptPolicy,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            targets: Vec::new(),
            exclude: Vec::new(),
            max_file_size: 10_485_760,
            follow_links: false,
            max_depth: 64,
            script_policy: ScriptPolicy::default(),
        }
    }
}

impl ValidationConfig {
    /// The conventional mod layout: configuration under `mod/config` and
    /// `config`, scripts under `mod/scripts`.
    #[must_use]
    pub fn with_default_targets() -> Self {
        Self {
            targets: default_targets(),
            ..Self::default()
        }
    }

    /// Compile every glob pattern and check the run has something to do.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoTargets`] if `targets` is empty,
    /// [`ConfigError::InvalidTarget`] for a target without patterns, and
    /// [`ConfigError::InvalidPattern`] for the first pattern that does not parse.
    pub fn compile(&self) -> Result<CompiledConfig, ConfigError> {
        if self.targets.is_empty() {
            return Err(ConfigError::NoTargets);
        }

        let mut targets = Vec::with_capacity(self.targets.len());
        for target in &self.targets {
            if target.patterns.is_empty() {
                return Err(ConfigError::InvalidTarget(target.root.display().to_string()));
            }
            targets.push(CompiledTarget {
                root: target.root.clone(),
                patterns: PatternSet::new(&target.patterns)?,
            });
        }

        Ok(CompiledConfig {
            targets,
            walk: WalkOptions {
                exclude: PatternSet::new(&self.exclude)?,
                follow_links: self.follow_links,
                max_depth: self.max_depth,
            },
            max_file_size: self.max_file_size,
            script_policy: self.script_policy,
        })
    }
}

/// The default scan targets.
#[must_use]
pub fn default_targets() -> Vec<ScanTarget> {
    vec![
        ScanTarget::new("mod/config", &["*.json", "*.xml"]),
        ScanTarget::new("config", &["*.json"]),
        ScanTarget::new("mod/scripts", &["*.ws"]),
    ]
}

/// A target whose patterns have been parsed.
#[derive(Debug, Clone)]
pub struct CompiledTarget {
    pub root: PathBuf,
    pub patterns: PatternSet,
}

/// A validated configuration, ready to drive the runner.
#[derive(Debug, Clone)]
pub struct CompiledConfig {
    pub targets: Vec<CompiledTarget>,
    pub walk: WalkOptions,
    pub max_file_size: u64,
    pub script_policy: ScriptPolicy,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target() {
        let target: ScanTarget = "mod/config=*.json, *.xml".parse().unwrap();
        assert_eq!(target, ScanTarget::new("mod/config", &["*.json", "*.xml"]));
    }

    #[test]
    fn test_parse_target_rejects_missing_patterns() {
        for bad in ["mod/config", "mod/config=", "=*.json", "mod=,,"] {
            assert_eq!(
                bad.parse::<ScanTarget>().unwrap_err(),
                ConfigError::InvalidTarget(bad.to_owned()),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_default_targets_layout() {
        let config = ValidationConfig::with_default_targets();
        let roots: Vec<_> = config.targets.iter().map(|t| t.root.clone()).collect();
        assert_eq!(
            roots,
            vec![
                PathBuf::from("mod/config"),
                PathBuf::from("config"),
                PathBuf::from("mod/scripts")
            ]
        );
        assert_eq!(config.script_policy, ScriptPolicy::Lenient);
    }

    #[test]
    fn test_compile_rejects_empty_targets() {
        let err = ValidationConfig::default().compile().unwrap_err();
        assert_eq!(err, ConfigError::NoTargets);
    }

    #[test]
    fn test_compile_rejects_target_without_patterns() {
        let mut config = ValidationConfig::default();
        config.targets = vec![ScanTarget::new("scripts", &[])];
        assert_eq!(
            config.compile().unwrap_err(),
            ConfigError::InvalidTarget("scripts".to_owned())
        );
    }

    #[test]
    fn test_compile_rejects_bad_include_pattern() {
        let mut config = ValidationConfig::default();
        config.targets = vec![ScanTarget::new("scripts", &["[*.ws"])];
        assert!(matches!(
            config.compile(),
            Err(ConfigError::InvalidPattern { pattern, .. }) if pattern == "[*.ws"
        ));
    }

    #[test]
    fn test_compile_rejects_bad_exclude_pattern() {
        let mut config = ValidationConfig::with_default_targets();
        config.exclude = vec!["***/[".to_owned()];
        assert!(matches!(
            config.compile(),
            Err(ConfigError::InvalidPattern { .. })
        ));
    }
}
