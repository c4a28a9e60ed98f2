//! Dispatcher - block header recognition and sub-parser delegation
//!
//!     The dispatcher drives the top level of a file as a small state machine:
//!
//!         ReadingHeader ──header──▶ DispatchingBlock ──node attached──▶ ReadingHeader
//!               │
//!               └──end of input──▶ Done
//!
//!     A header is `keyword [name] [extends parent] {`. In DispatchingBlock the keyword is
//!     looked up in the registry; on a hit the factory creates a sub-parser bound to the
//!     context and the sub-parser consumes the block body. Sub-parsers call back into
//!     [Dispatcher::dispatch_block] for their nested blocks, so nesting is plain recursion
//!     and every block, whatever its depth, goes through the same lookup.
//!
//!     Unknown keywords follow the [UnknownBlockPolicy]: skip the balanced-brace span with a
//!     warning (default), or fail the parse.

use super::context::ParserContext;
use super::registry::SubParserRegistry;
use crate::script::ast::diagnostics::Diagnostic;
use crate::script::ast::error::ParseError;
use crate::script::ast::node::Node;
use crate::script::ast::range::Range;
use crate::script::lexing::TokenKind;
use serde::{Deserialize, Serialize};

/// What to do with a block whose keyword has no registered factory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownBlockPolicy {
    /// Skip the block's balanced-brace span and record a warning
    #[default]
    Skip,
    /// Fail the parse with `UnknownBlockType`
    Error,
}

/// A parsed block header, up to and including the opening brace.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockHeader {
    pub keyword: String,
    pub name: Option<String>,
    pub extends: Option<String>,
    /// Range of the keyword token
    pub range: Range,
    pub open_brace: Range,
}

impl BlockHeader {
    /// A node for this block, spanning from the keyword to the opening brace. Sub-parsers
    /// extend the range to the closing brace once they have consumed the body.
    pub fn to_node(&self) -> Node {
        let mut range = self.range.clone();
        range.extend_to(&self.open_brace);
        let mut node = Node::new(self.keyword.clone()).at(range);
        node.name = self.name.clone();
        node.extends = self.extends.clone();
        node
    }

    pub fn unterminated(&self) -> ParseError {
        ParseError::UnterminatedBlock {
            keyword: self.keyword.clone(),
            open_brace: self.open_brace.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DispatchState {
    ReadingHeader,
    DispatchingBlock(BlockHeader),
    Done,
}

pub struct Dispatcher<'r> {
    registry: &'r SubParserRegistry,
    unknown_blocks: UnknownBlockPolicy,
}

impl<'r> Dispatcher<'r> {
    pub fn new(registry: &'r SubParserRegistry, unknown_blocks: UnknownBlockPolicy) -> Self {
        Self {
            registry,
            unknown_blocks,
        }
    }

    pub fn registry(&self) -> &'r SubParserRegistry {
        self.registry
    }

    pub fn unknown_blocks(&self) -> UnknownBlockPolicy {
        self.unknown_blocks
    }

    /// Parse every top-level block, attaching the resulting nodes to `root`.
    ///
    /// On failure `root` keeps every block completed before the error, followed by the
    /// top-level block that was open when it happened (with its own open blocks inside).
    pub fn parse_document(
        &self,
        ctx: &mut ParserContext,
        root: &mut Node,
    ) -> Result<(), ParseError> {
        let result = self.read_blocks(ctx, root);
        if result.is_err() {
            if let Some(open) = ctx.take_unwound() {
                root.children.push(open);
            }
        }
        result
    }

    fn read_blocks(&self, ctx: &mut ParserContext, root: &mut Node) -> Result<(), ParseError> {
        let mut state = DispatchState::ReadingHeader;
        loop {
            state = match state {
                DispatchState::ReadingHeader => match ctx.peek_kind() {
                    TokenKind::Eof => DispatchState::Done,
                    TokenKind::Identifier => DispatchState::DispatchingBlock(self.read_header(ctx)?),
                    _ => return Err(ctx.unexpected("block keyword")),
                },
                DispatchState::DispatchingBlock(header) => {
                    if let Some(node) = self.dispatch_block(ctx, header)? {
                        root.children.push(node);
                    }
                    DispatchState::ReadingHeader
                }
                DispatchState::Done => return Ok(()),
            };
            tracing::trace!(?state, cursor = ctx.cursor(), "dispatcher state");
        }
    }

    /// True when the upcoming tokens form a block header rather than a property.
    ///
    /// Recognized shapes: `kw {`, `kw name {`, `kw extends`, `kw name extends`.
    pub fn starts_block(ctx: &ParserContext) -> bool {
        if !ctx.peek().is(TokenKind::Identifier) {
            return false;
        }
        match (ctx.peek_nth(1).kind, ctx.peek_nth(2).kind) {
            (TokenKind::LBrace, _) | (TokenKind::Keyword, _) => true,
            (TokenKind::Identifier, TokenKind::LBrace)
            | (TokenKind::Identifier, TokenKind::Keyword) => true,
            _ => false,
        }
    }

    /// Read `keyword [name] [extends parent] {`.
    pub fn read_header(&self, ctx: &mut ParserContext) -> Result<BlockHeader, ParseError> {
        let keyword = ctx.expect(TokenKind::Identifier)?;

        let name = if ctx.peek().is(TokenKind::Identifier) {
            Some(ctx.advance().text)
        } else {
            None
        };

        let extends = if ctx.peek().is(TokenKind::Keyword) {
            ctx.advance();
            if !ctx.peek().is(TokenKind::Identifier) {
                return Err(ctx.unexpected("parent name after 'extends'"));
            }
            Some(ctx.advance().text)
        } else {
            None
        };

        if !ctx.peek().is(TokenKind::LBrace) {
            return Err(ctx.unexpected(format!("'{{' to open '{}' block", keyword.text)));
        }
        let open_brace = ctx.advance().range;

        Ok(BlockHeader {
            keyword: keyword.text,
            name,
            extends,
            range: keyword.range,
            open_brace,
        })
    }

    /// Hand one block to its sub-parser. Returns `None` when an unknown block was skipped.
    pub fn dispatch_block(
        &self,
        ctx: &mut ParserContext,
        header: BlockHeader,
    ) -> Result<Option<Node>, ParseError> {
        let Some(factory) = self.registry.lookup(&header.keyword) else {
            return self.handle_unknown(ctx, header).map(|_| None);
        };

        tracing::debug!(
            keyword = %header.keyword,
            name = header.name.as_deref().unwrap_or(""),
            line = header.range.start.line,
            "dispatching block"
        );

        ctx.enter_block(&header.keyword, header.name.as_deref(), &header.range)?;
        let result = {
            let mut parser = factory.create(ctx);
            parser.consume_block(header, self)
        };
        ctx.exit_block();

        result.map(Some)
    }

    fn handle_unknown(
        &self,
        ctx: &mut ParserContext,
        header: BlockHeader,
    ) -> Result<(), ParseError> {
        match self.unknown_blocks {
            UnknownBlockPolicy::Error => Err(ParseError::UnknownBlockType {
                keyword: header.keyword,
                range: header.range,
            }),
            UnknownBlockPolicy::Skip => {
                tracing::debug!(keyword = %header.keyword, "skipping unknown block");
                skip_balanced(ctx, &header)?;
                ctx.report_diagnostic(
                    Diagnostic::warning(
                        header.range.clone(),
                        format!("Unknown block type '{}' skipped", header.keyword),
                    )
                    .with_code("unknown-block"),
                );
                Ok(())
            }
        }
    }
}

/// Consume tokens up to and including the brace that closes `header`'s block.
fn skip_balanced(ctx: &mut ParserContext, header: &BlockHeader) -> Result<(), ParseError> {
    let mut depth = 1usize;
    loop {
        match ctx.advance().kind {
            TokenKind::LBrace => depth += 1,
            TokenKind::RBrace => {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
            TokenKind::Eof => return Err(header.unterminated()),
            _ => {}
        }
    }
}
