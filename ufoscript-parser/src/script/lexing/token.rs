//! Token definitions for UFO scripts
//!
//! Two enums live here. [RawToken] is the logos-derived lexer vocabulary, including the
//! recoverable error shapes (unterminated strings) and skipped trivia. [TokenKind] is the
//! public vocabulary the parser sees: trivia is gone, errors have been turned into
//! diagnostics, and an explicit `Eof` terminates every stream.

use crate::script::ast::range::{Position, Range};
use logos::Logos;
use serde::Serialize;
use std::fmt;

/// Logos vocabulary for `.ufo` source text.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum RawToken {
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", logos::skip)]
    BlockComment,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("extends")]
    Extends,

    #[regex(r#""([^"\\]|\\.)*""#, priority = 3)]
    String,

    // A quote that never closes runs to end of input
    #[regex(r#""([^"\\]|\\.)*"#, priority = 1)]
    UnterminatedString,

    #[regex(r"-?[0-9]+(\.[0-9]+)?")]
    Number,

    #[regex(r"[A-Za-z_][A-Za-z0-9_.:\-]*")]
    Identifier,
}

/// Token kinds seen by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Identifier,
    String,
    Number,
    LBrace,
    RBrace,
    /// Reserved word (`extends`)
    Keyword,
    Eof,
}

impl TokenKind {
    /// True for tokens that can appear as a property value.
    pub fn is_value(&self) -> bool {
        matches!(
            self,
            TokenKind::String | TokenKind::Number | TokenKind::Identifier
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Identifier => "identifier",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Keyword => "keyword",
            TokenKind::Eof => "end of input",
        };
        f.write_str(name)
    }
}

/// A lexed token. `text` is the raw lexeme; use [Token::string_value] for string contents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub range: Range,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, range: Range) -> Self {
        Self {
            kind,
            text: text.into(),
            range,
        }
    }

    pub fn eof(range: Range) -> Self {
        Self::new(TokenKind::Eof, "", range)
    }

    pub fn position(&self) -> Position {
        self.range.start
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Decoded contents of a string token (quotes stripped, escapes resolved).
    /// Other tokens return their text unchanged.
    pub fn string_value(&self) -> String {
        if self.kind != TokenKind::String {
            return self.text.clone();
        }
        let inner = self.text.strip_prefix('"').unwrap_or(&self.text);
        let inner = if has_closing_quote(inner) {
            &inner[..inner.len() - 1]
        } else {
            inner
        };
        unescape(inner)
    }
}

/// True when `body` (a string lexeme without its opening quote) ends in an unescaped quote.
fn has_closing_quote(body: &str) -> bool {
    match body.strip_suffix('"') {
        Some(rest) => rest.chars().rev().take_while(|&c| c == '\\').count() % 2 == 0,
        None => false,
    }
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Inverse of the string decoding, used by the script serializer.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(source: &str) -> Vec<Result<RawToken, ()>> {
        RawToken::lexer(source).collect()
    }

    #[test]
    fn test_braces_and_identifiers() {
        assert_eq!(
            raw("optionlist res {}"),
            vec![
                Ok(RawToken::Identifier),
                Ok(RawToken::Identifier),
                Ok(RawToken::LBrace),
                Ok(RawToken::RBrace),
            ]
        );
    }

    #[test]
    fn test_keyword_beats_identifier() {
        assert_eq!(raw("extends"), vec![Ok(RawToken::Extends)]);
        assert_eq!(raw("extends_more"), vec![Ok(RawToken::Identifier)]);
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            raw("// line\n/* block\n * more */ value"),
            vec![Ok(RawToken::Identifier)]
        );
    }

    #[test]
    fn test_strings() {
        assert_eq!(raw(r#""a \"quoted\" word""#), vec![Ok(RawToken::String)]);
        assert_eq!(raw(r#""open"#), vec![Ok(RawToken::UnterminatedString)]);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            raw("1 -2 3.5"),
            vec![
                Ok(RawToken::Number),
                Ok(RawToken::Number),
                Ok(RawToken::Number)
            ]
        );
    }

    #[test]
    fn test_cvar_identifier() {
        let mut lexer = RawToken::lexer("cvar:mn_serverlist_sort");
        assert_eq!(lexer.next(), Some(Ok(RawToken::Identifier)));
        assert_eq!(lexer.slice(), "cvar:mn_serverlist_sort");
    }

    #[test]
    fn test_string_value_unescapes() {
        let token = Token::new(TokenKind::String, r#""say \"hi\"\n\q""#, Range::default());
        assert_eq!(token.string_value(), "say \"hi\"\n\\q");
    }

    #[test]
    fn test_escape_inverts_unescape() {
        let original = "tab\there \"q\" back\\slash\nline";
        assert_eq!(unescape(&escape(original)), original);
    }
}
