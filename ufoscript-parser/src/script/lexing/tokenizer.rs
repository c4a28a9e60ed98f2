//! Source text to token stream
//!
//!     Runs the logos lexer over the whole file and produces the complete token stream up
//!     front, so the parser never waits on input mid-parse. Byte spans are converted to
//!     line:column ranges here, once.
//!
//!     Lexing never aborts. Characters outside the vocabulary and unterminated strings are
//!     recorded as Error diagnostics and lexing carries on, so the parser still sees as much
//!     structure as possible.

use super::token::{RawToken, Token, TokenKind};
use crate::script::ast::diagnostics::Diagnostic;
use crate::script::ast::range::SourceLocation;
use logos::Logos;

/// Output from the tokenizer
#[derive(Debug, Clone)]
pub struct LexOutput {
    /// Always terminated by a single `Eof` token
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn tokenize(source: &str) -> LexOutput {
    let locations = SourceLocation::new(source);
    let mut lexer = RawToken::lexer(source);
    let mut tokens = Vec::new();
    let mut diagnostics = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let range = locations.byte_range_to_range(&span);
        let text = lexer.slice();

        let kind = match result {
            Ok(RawToken::LBrace) => TokenKind::LBrace,
            Ok(RawToken::RBrace) => TokenKind::RBrace,
            Ok(RawToken::Extends) => TokenKind::Keyword,
            Ok(RawToken::String) => TokenKind::String,
            Ok(RawToken::Number) => TokenKind::Number,
            Ok(RawToken::Identifier) => TokenKind::Identifier,
            Ok(RawToken::UnterminatedString) => {
                diagnostics.push(
                    Diagnostic::error(range.clone(), "Unterminated string literal")
                        .with_code("unterminated-string"),
                );
                TokenKind::String
            }
            // Comments are skipped by their callbacks and never reach this point
            Ok(RawToken::LineComment) | Ok(RawToken::BlockComment) => continue,
            Err(()) => {
                diagnostics.push(
                    Diagnostic::error(range, format!("Unexpected character '{}'", text))
                        .with_code("invalid-character"),
                );
                continue;
            }
        };

        tokens.push(Token::new(kind, text, range));
    }

    tokens.push(Token::eof(locations.end_of_input()));

    LexOutput {
        tokens,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::ast::range::Position;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_block_header_tokens() {
        assert_eq!(
            kinds("window main extends ipopup {\n}"),
            vec![
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Keyword,
                TokenKind::Identifier,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_positions() {
        let output = tokenize("optionlist {\n\tlabel \"a\"");
        let tokens = output.tokens;

        assert_eq!(tokens[1].kind, TokenKind::LBrace);
        assert_eq!(tokens[1].position(), Position::new(0, 11));
        assert_eq!(tokens[2].text, "label");
        assert_eq!(tokens[2].position(), Position::new(1, 1));
        assert_eq!(tokens[3].string_value(), "a");
        assert_eq!(tokens[4].kind, TokenKind::Eof);
        assert_eq!(tokens[4].position(), Position::new(1, 10));
    }

    #[test]
    fn test_empty_source_is_just_eof() {
        let output = tokenize("");
        assert_eq!(output.tokens.len(), 1);
        assert!(output.tokens[0].is(TokenKind::Eof));
        assert!(output.diagnostics.is_empty());
    }

    #[test]
    fn test_invalid_character_is_reported_and_skipped() {
        let output = tokenize("button ok { pos = \"1 2\" }");
        let kinds: Vec<TokenKind> = output.tokens.iter().map(|t| t.kind).collect();

        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::LBrace,
                TokenKind::Identifier,
                TokenKind::String,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
        assert_eq!(output.diagnostics.len(), 1);
        assert_eq!(
            output.diagnostics[0].code.as_deref(),
            Some("invalid-character")
        );
        assert_eq!(output.diagnostics[0].range.start, Position::new(0, 16));
    }

    #[test]
    fn test_unterminated_string_is_reported() {
        let output = tokenize("string title { string \"_Options");
        assert_eq!(output.diagnostics.len(), 1);
        assert_eq!(
            output.diagnostics[0].code.as_deref(),
            Some("unterminated-string")
        );
        let last_value = &output.tokens[output.tokens.len() - 2];
        assert_eq!(last_value.kind, TokenKind::String);
        assert_eq!(last_value.string_value(), "_Options");
    }

    #[test]
    fn test_unterminated_string_keeps_escaped_quote() {
        let output = tokenize(r#"label "abc\""#);
        assert_eq!(output.diagnostics.len(), 1);
        let value = &output.tokens[1];
        assert_eq!(value.text, r#""abc\""#);
        assert_eq!(value.string_value(), "abc\"");
    }

    #[test]
    fn test_escaped_backslash_before_closing_quote() {
        let output = tokenize(r#"label "abc\\""#);
        assert!(output.diagnostics.is_empty());
        assert_eq!(output.tokens[1].string_value(), "abc\\");
    }

    #[test]
    fn test_comments_between_tokens() {
        assert_eq!(
            kinds("a /* x */ 1 // trailing\n b"),
            vec![
                TokenKind::Identifier,
                TokenKind::Number,
                TokenKind::Identifier,
                TokenKind::Eof
            ]
        );
    }
}
