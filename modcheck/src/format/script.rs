//! Heuristic WitcherScript checker.
//!
//! There is no grammar for the dialect here, so checks are lexical passes over
//! the raw text. All issues are collected; the scan never stops at the first one.
//!
//! Known limitation: delimiters are counted as raw characters, so a brace or
//! parenthesis inside a string literal or comment still counts and can report
//! an imbalance in a file that compiles.

use std::fmt;

use crate::config::ScriptPolicy;
use crate::verdict::{Diagnostic, Severity};

/// Prefixes that open a variable declaration, trailing space included.
const DECLARATION_PREFIXES: &[&str] = &["var ", "let "];

/// A declaration line containing any of these, anywhere, is exempt from the
/// terminator check. Matching is by substring, so `var diff : int` is exempt.
const CONTROL_FLOW_KEYWORDS: &[&str] = &["if", "while", "for", "switch"];

const CANONICAL_FUNCTION_KEYWORD: &str = "func";

/// Declaration markers compared for the mixed-syntax check, trailing space included.
const CANONICAL_FUNCTION_MARKER: &str = "func ";
const ALTERNATE_FUNCTION_MARKER: &str = "function ";

/// One heuristic finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptIssue {
    UnbalancedBraces { open: usize, close: usize },
    UnbalancedParentheses { open: usize, close: usize },
    MixedFunctionKeywords,
    /// 1-indexed line of a declaration with no `;` or `{` at the end.
    MissingTerminator { line: usize },
}

impl ScriptIssue {
    /// Structural issues suggest the file will not parse at all.
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::UnbalancedBraces { .. } | Self::UnbalancedParentheses { .. }
        )
    }

    #[must_use]
    pub fn severity(&self, policy: ScriptPolicy) -> Severity {
        match policy {
            ScriptPolicy::Strict if self.is_structural() => Severity::Error,
            _ => Severity::Warning,
        }
    }

    #[must_use]
    pub fn to_diagnostic(&self, policy: ScriptPolicy) -> Diagnostic {
        let diagnostic = Diagnostic::new(self.severity(policy), self.to_string());
        match self {
            Self::MissingTerminator { line } => diagnostic.at_line(*line),
            _ => diagnostic,
        }
    }
}

impl fmt::Display for ScriptIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnbalancedBraces { open, close } => {
                write!(f, "Unbalanced braces: {open} open, {close} close")
            }
            Self::UnbalancedParentheses { open, close } => {
                write!(f, "Unbalanced parentheses: {open} open, {close} close")
            }
            Self::MixedFunctionKeywords => write!(
                f,
                "Mixed function declaration syntax (use '{CANONICAL_FUNCTION_KEYWORD}' consistently)"
            ),
            Self::MissingTerminator { .. } => {
                write!(f, "Missing semicolon after variable declaration")
            }
        }
    }
}

fn count_pair(content: &str, open: char, close: char) -> (usize, usize) {
    content.chars().fold((0, 0), |(o, c), ch| {
        if ch == open {
            (o + 1, c)
        } else if ch == close {
            (o, c + 1)
        } else {
            (o, c)
        }
    })
}

fn is_missing_terminator(line: &str) -> bool {
    let trimmed = line.trim();
    DECLARATION_PREFIXES.iter().any(|p| trimmed.starts_with(p))
        && !trimmed.ends_with(';')
        && !trimmed.ends_with('{')
        && !CONTROL_FLOW_KEYWORDS.iter().any(|kw| trimmed.contains(kw))
}

/// Run every heuristic over `content`, in a fixed order.
#[must_use]
pub fn analyze(content: &str) -> Vec<ScriptIssue> {
    let mut issues = Vec::new();

    let (open, close) = count_pair(content, '{', '}');
    if open != close {
        issues.push(ScriptIssue::UnbalancedBraces { open, close });
    }

    let (open, close) = count_pair(content, '(', ')');
    if open != close {
        issues.push(ScriptIssue::UnbalancedParentheses { open, close });
    }

    if content.contains(ALTERNATE_FUNCTION_MARKER)
        && content.contains(CANONICAL_FUNCTION_MARKER)
    {
        issues.push(ScriptIssue::MixedFunctionKeywords);
    }

    issues.extend(
        content
            .lines()
            .enumerate()
            .filter(|(_, line)| is_missing_terminator(line))
            .map(|(idx, _)| ScriptIssue::MissingTerminator { line: idx + 1 }),
    );

    issues
}

/// Check WitcherScript `content`, mapping each issue to a diagnostic under `policy`.
#[must_use]
pub fn check_script(content: &str, policy: ScriptPolicy) -> Vec<Diagnostic> {
    analyze(content)
        .iter()
        .map(|issue| issue.to_diagnostic(policy))
        .collect()
}
