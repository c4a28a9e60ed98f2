//! Diagnostic collection for editor tooling
//!
//! Diagnostics are the non-fatal channel of a parse: lexing problems, skipped unknown
//! blocks, grammar-shape warnings from the sub-parsers. They are appended to the
//! [ParserContext](crate::script::parsing::ParserContext) in the order they are found and
//! returned alongside the tree (or alongside the partial tree on failure, where the fatal
//! error is appended last).
//!
//! Every diagnostic carries a short machine-readable code (`unknown-block`,
//! `duplicate-property`, ...) so tooling can filter without matching on messages.

use super::range::Range;
use serde::Serialize;
use std::fmt;

/// Producer recorded on diagnostics created by this crate.
pub const DIAGNOSTIC_SOURCE: &str = "ufoscript-parser";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Error => write!(f, "error"),
            DiagnosticSeverity::Warning => write!(f, "warning"),
            DiagnosticSeverity::Info => write!(f, "info"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub range: Range,
    pub severity: DiagnosticSeverity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// File identity, filled in by the context that collected the diagnostic
    pub file: String,
    pub source: String,
}

impl Diagnostic {
    pub fn new(range: Range, severity: DiagnosticSeverity, message: impl Into<String>) -> Self {
        Self {
            range,
            severity,
            message: message.into(),
            code: None,
            file: String::new(),
            source: DIAGNOSTIC_SOURCE.to_string(),
        }
    }

    pub fn error(range: Range, message: impl Into<String>) -> Self {
        Self::new(range, DiagnosticSeverity::Error, message)
    }

    pub fn warning(range: Range, message: impl Into<String>) -> Self {
        Self::new(range, DiagnosticSeverity::Warning, message)
    }

    pub fn info(range: Range, message: impl Into<String>) -> Self {
        Self::new(range, DiagnosticSeverity::Info, message)
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = file.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }

    /// One-line `file:line:col: severity: message [code]` rendering, 1-based for humans.
    pub fn to_compact_string(&self) -> String {
        let mut out = format!(
            "{}:{}:{}: {}: {}",
            self.file,
            self.range.start.line + 1,
            self.range.start.column + 1,
            self.severity,
            self.message
        );
        if let Some(code) = &self.code {
            out.push_str(&format!(" [{}]", code));
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]: {} at {}",
            self.severity, self.source, self.message, self.range.start
        )
    }
}

/// Count diagnostics of the given severity.
pub fn count_severity(diagnostics: &[Diagnostic], severity: DiagnosticSeverity) -> usize {
    diagnostics
        .iter()
        .filter(|d| d.severity == severity)
        .count()
}
