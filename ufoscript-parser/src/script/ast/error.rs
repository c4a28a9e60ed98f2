//! Error types for parsing and sub-parser registration

use super::diagnostics::Diagnostic;
use super::node::Node;
use super::range::Range;
use crate::script::lexing::TokenKind;
use std::fmt;

/// Fatal errors that abort the parse of one file.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The next token does not fit the grammar at this point
    UnexpectedToken {
        expected: String,
        found: TokenKind,
        text: String,
        range: Range,
    },
    /// A block reached end of input (or an unbalanced brace) before its closing brace.
    /// The range is the block's opening brace.
    UnterminatedBlock { keyword: String, open_brace: Range },
    /// No factory is registered for the block keyword and the policy forbids skipping
    UnknownBlockType { keyword: String, range: Range },
    /// End of input outside of any block body, e.g. in the middle of a block header
    UnexpectedEof { expected: String, range: Range },
    /// A block header would open more nested blocks than the parse allows
    NestingTooDeep { keyword: String, limit: usize, range: Range },
}

impl ParseError {
    pub fn range(&self) -> &Range {
        match self {
            ParseError::UnexpectedToken { range, .. }
            | ParseError::UnknownBlockType { range, .. }
            | ParseError::UnexpectedEof { range, .. }
            | ParseError::NestingTooDeep { range, .. } => range,
            ParseError::UnterminatedBlock { open_brace, .. } => open_brace,
        }
    }

    /// Stable diagnostic code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::UnexpectedToken { .. } => "unexpected-token",
            ParseError::UnterminatedBlock { .. } => "unterminated-block",
            ParseError::UnknownBlockType { .. } => "unknown-block",
            ParseError::UnexpectedEof { .. } => "unexpected-eof",
            ParseError::NestingTooDeep { .. } => "nesting-too-deep",
        }
    }

    /// The fatal diagnostic recorded when this error aborts a parse.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.range().clone(), self.to_string()).with_code(self.code())
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedToken {
                expected,
                found,
                text,
                range,
            } => write!(
                f,
                "Expected {}, found {} '{}' at {}",
                expected, found, text, range.start
            ),
            ParseError::UnterminatedBlock {
                keyword,
                open_brace,
            } => write!(
                f,
                "Unterminated '{}' block opened at {}",
                keyword, open_brace.start
            ),
            ParseError::UnknownBlockType { keyword, range } => {
                write!(f, "Unknown block type '{}' at {}", keyword, range.start)
            }
            ParseError::UnexpectedEof { expected, range } => write!(
                f,
                "Unexpected end of input at {}, expected {}",
                range.start, expected
            ),
            ParseError::NestingTooDeep {
                keyword,
                limit,
                range,
            } => write!(
                f,
                "'{}' block at {} is nested deeper than {} levels",
                keyword, range.start, limit
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors raised while building a sub-parser registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A factory for this keyword is already registered (strict policy)
    DuplicateRegistration { id: String },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateRegistration { id } => {
                write!(f, "A sub-parser for '{}' is already registered", id)
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// A failed parse: the fatal error plus everything built and reported before it.
#[derive(Debug, Clone)]
pub struct ParseFailure {
    pub error: ParseError,
    /// Root node holding every block completed before the failure, followed by the
    /// chain of blocks that were still open when it happened
    pub partial: Node,
    /// All diagnostics in order; the last one is the fatal error
    pub diagnostics: Vec<Diagnostic>,
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parse failed: {}", self.error)
    }
}

impl std::error::Error for ParseFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Format source code context around an error location
///
/// Shows 2 lines before the error, the error line with >> marker, and 2 lines after.
/// Lines are numbered from 1.
pub fn format_source_context(source: &str, range: &Range) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let error_line = range.start.line;

    let start_line = error_line.saturating_sub(2);
    let end_line = (error_line + 3).min(lines.len());

    let mut context = String::new();
    for (line_num, line) in lines.iter().enumerate().take(end_line).skip(start_line) {
        let marker = if line_num == error_line { ">>" } else { "  " };
        context.push_str(&format!("{} {:3} | {}\n", marker, line_num + 1, line));
    }
    context
}
