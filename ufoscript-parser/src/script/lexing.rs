//! Lexer
//!
//!     UFO scripts are brace-delimited, so lexing is a single logos pass: no indentation
//!     tracking, no line grouping. Whitespace and comments disappear, every remaining
//!     lexeme becomes a [Token] with its source range, and the stream ends with `Eof`.
//!
//!     See [tokenizer] for error handling and [token] for the vocabulary.

pub mod token;
pub mod tokenizer;

pub use token::{escape, RawToken, Token, TokenKind};
pub use tokenizer::{tokenize, LexOutput};
