//! Parser context shared by every sub-parser working on one file
//!
//!     The context owns the token stream, the cursor into it, the ordered diagnostic sink and
//!     the symbol table. The dispatcher and all sub-parsers share it by mutable reference,
//!     so positions and diagnostics stay consistent across nested blocks. It is created per
//!     source file and dropped when the parse completes or fails.
//!
//!     The stream always ends in an `Eof` token and the cursor never moves past it, so
//!     `peek` is total.
//!
//!     Nested blocks are parsed by recursion, so the context also enforces the nesting
//!     limit and, when a fatal error unwinds that recursion, collects the blocks that were
//!     still open so the failure can report them.

use super::symbols::SymbolTable;
use crate::script::ast::diagnostics::Diagnostic;
use crate::script::ast::error::ParseError;
use crate::script::ast::node::Node;
use crate::script::ast::range::Range;
use crate::script::lexing::{tokenize, Token, TokenKind};

/// Deepest block nesting accepted unless a parse asks for another limit.
pub const DEFAULT_MAX_DEPTH: usize = 128;

#[derive(Debug)]
pub struct ParserContext {
    file: String,
    tokens: Vec<Token>,
    cursor: usize,
    diagnostics: Vec<Diagnostic>,
    symbols: SymbolTable,
    depth: usize,
    max_depth: usize,
    /// Innermost open block of a failed parse, holding the open blocks below it
    unwound: Option<Node>,
}

impl ParserContext {
    /// Build a context over an already lexed stream. A missing trailing `Eof` is added.
    pub fn new(file: impl Into<String>, mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let end = tokens
                .last()
                .map(|t| {
                    let mut r = t.range.clone();
                    r.start = r.end;
                    r.span.start = r.span.end;
                    r
                })
                .unwrap_or_default();
            tokens.push(Token::eof(end));
        }
        Self {
            file: file.into(),
            tokens,
            cursor: 0,
            diagnostics: Vec::new(),
            symbols: SymbolTable::new(),
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
            unwound: None,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Lex `source` and build a context over it, keeping the lexer's diagnostics.
    pub fn from_source(file: impl Into<String>, source: &str) -> Self {
        let lexed = tokenize(source);
        let mut ctx = Self::new(file, lexed.tokens);
        for diagnostic in lexed.diagnostics {
            ctx.report_diagnostic(diagnostic);
        }
        ctx
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn peek(&self) -> &Token {
        &self.tokens[self.cursor]
    }

    /// Look `n` tokens ahead; anything past the end is the `Eof` token.
    pub fn peek_nth(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.cursor + n).min(last)]
    }

    pub fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    pub fn at_eof(&self) -> bool {
        self.peek().is(TokenKind::Eof)
    }

    /// Consume and return the next token. At end of input this keeps returning `Eof`.
    pub fn advance(&mut self) -> Token {
        let token = self.tokens[self.cursor].clone();
        if !token.is(TokenKind::Eof) {
            self.cursor += 1;
        }
        token
    }

    /// Consume the next token if it is of `kind`; otherwise fail without consuming.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.peek().is(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind.to_string()))
        }
    }

    /// Error describing the current token as not matching `expected`.
    pub fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        let token = self.peek();
        if token.is(TokenKind::Eof) {
            ParseError::UnexpectedEof {
                expected: expected.into(),
                range: token.range.clone(),
            }
        } else {
            ParseError::UnexpectedToken {
                expected: expected.into(),
                found: token.kind,
                text: token.text.clone(),
                range: token.range.clone(),
            }
        }
    }

    /// Append a diagnostic, stamping it with this context's file identity.
    pub fn report_diagnostic(&mut self, diagnostic: Diagnostic) {
        let diagnostic = diagnostic.with_file(self.file.clone());
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Open a block: bump the nesting depth and declare its name, if any.
    ///
    /// Fails without opening anything when the block would exceed the nesting limit.
    pub fn enter_block(
        &mut self,
        keyword: &str,
        name: Option<&str>,
        site: &Range,
    ) -> Result<(), ParseError> {
        if self.depth >= self.max_depth {
            return Err(ParseError::NestingTooDeep {
                keyword: keyword.to_string(),
                limit: self.max_depth,
                range: site.clone(),
            });
        }
        self.depth += 1;
        if let Some(previous) = self.symbols.enter(name, site) {
            let path = self.symbols.current_path();
            self.report_diagnostic(
                Diagnostic::warning(
                    site.clone(),
                    format!(
                        "Duplicate node name '{}' (first declared at {})",
                        path, previous.start
                    ),
                )
                .with_code("duplicate-name"),
            );
        }
        Ok(())
    }

    pub fn exit_block(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.symbols.exit();
    }

    /// Number of blocks currently open. Inside a top-level block this is 1.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Record `node` as a block left open by a fatal error. A block recorded earlier
    /// failed inside `node` and becomes its last child.
    pub fn record_unwound(&mut self, mut node: Node) {
        if let Some(inner) = self.unwound.take() {
            node.children.push(inner);
        }
        self.unwound = Some(node);
    }

    /// The outermost block recorded by [ParserContext::record_unwound], if any.
    pub fn take_unwound(&mut self) -> Option<Node> {
        self.unwound.take()
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn into_parts(self) -> (Vec<Diagnostic>, SymbolTable) {
        (self.diagnostics, self.symbols)
    }
}
