//! Block body grammar shared by every built-in sub-parser
//!
//!     body     := entry* '}'
//!     entry    := header '{' body        nested block, handed to the dispatcher
//!               | IDENT value             property
//!     value    := STRING | NUMBER | IDENT
//!
//! Variants differ only in what they do with a property once it is read and in the
//! checks they run after the closing brace, so the loop itself lives here.

use super::super::context::ParserContext;
use super::super::dispatcher::{BlockHeader, Dispatcher};
use crate::script::ast::diagnostics::Diagnostic;
use crate::script::ast::error::ParseError;
use crate::script::ast::node::{Node, Value};
use crate::script::ast::range::Range;
use crate::script::lexing::TokenKind;

/// A `key value` entry read from a block body.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: String,
    pub value: Value,
    /// From the start of the key to the end of the value
    pub range: Range,
}

/// Consume a block body up to and including its closing brace.
///
/// Nested blocks are dispatched and attached to `node` as children; properties go to
/// `on_property`. On return `node.range` ends at the closing brace.
///
/// On error the block built so far is moved into the context's unwound chain and `node`
/// is left as a bare header node.
pub fn consume_body<F>(
    ctx: &mut ParserContext,
    dispatcher: &Dispatcher<'_>,
    header: &BlockHeader,
    node: &mut Node,
    on_property: F,
) -> Result<(), ParseError>
where
    F: FnMut(&mut ParserContext, &mut Node, Property),
{
    let result = consume_entries(ctx, dispatcher, header, node, on_property);
    if result.is_err() {
        let open = std::mem::replace(node, header.to_node());
        ctx.record_unwound(open);
    }
    result
}

fn consume_entries<F>(
    ctx: &mut ParserContext,
    dispatcher: &Dispatcher<'_>,
    header: &BlockHeader,
    node: &mut Node,
    mut on_property: F,
) -> Result<(), ParseError>
where
    F: FnMut(&mut ParserContext, &mut Node, Property),
{
    loop {
        match ctx.peek_kind() {
            TokenKind::RBrace => {
                let close = ctx.advance();
                node.range.extend_to(&close.range);
                return Ok(());
            }
            TokenKind::Eof => return Err(header.unterminated()),
            TokenKind::Identifier if Dispatcher::starts_block(ctx) => {
                let nested = dispatcher
                    .read_header(ctx)
                    .map_err(|err| inside(header, err))?;
                if let Some(child) = dispatcher.dispatch_block(ctx, nested)? {
                    node.children.push(child);
                }
            }
            TokenKind::Identifier => {
                let property = read_property(ctx, header)?;
                on_property(ctx, node, property);
            }
            _ => return Err(ctx.unexpected("property or nested block")),
        }
    }
}

/// Running out of input anywhere inside a body means the body was never closed.
fn inside(header: &BlockHeader, err: ParseError) -> ParseError {
    match err {
        ParseError::UnexpectedEof { .. } => header.unterminated(),
        other => other,
    }
}

/// Read `IDENT value`.
pub fn read_property(
    ctx: &mut ParserContext,
    header: &BlockHeader,
) -> Result<Property, ParseError> {
    let key = ctx.expect(TokenKind::Identifier).map_err(|err| inside(header, err))?;

    let token = ctx.peek();
    if token.is(TokenKind::Eof) {
        return Err(header.unterminated());
    }
    if !token.kind.is_value() {
        return Err(ctx.unexpected(format!("value for property '{}'", key.text)));
    }

    let token = ctx.advance();
    let value = match token.kind {
        TokenKind::String => Value::Str(token.string_value()),
        TokenKind::Number => token
            .text
            .parse::<f64>()
            .map(Value::Number)
            .unwrap_or_else(|_| Value::Ident(token.text.clone())),
        _ => Value::Ident(token.text.clone()),
    };

    let mut range = key.range;
    range.extend_to(&token.range);
    Ok(Property {
        key: key.text,
        value,
        range,
    })
}

/// Store a property, warning when it replaces an earlier value for the same key.
pub fn insert_property(ctx: &mut ParserContext, node: &mut Node, property: Property) {
    if node
        .attributes
        .insert(property.key.clone(), property.value)
        .is_some()
    {
        ctx.report_diagnostic(
            Diagnostic::warning(
                property.range,
                format!(
                    "Duplicate property '{}' in '{}' block, last value wins",
                    property.key, node.kind
                ),
            )
            .with_code("duplicate-property"),
        );
    }
}

/// Store a property, collecting repeated keys into a list.
pub fn append_property(_ctx: &mut ParserContext, node: &mut Node, property: Property) {
    match node.attributes.get_mut(&property.key) {
        Some(existing) => existing.push(property.value),
        None => {
            node.attributes.insert(property.key, property.value);
        }
    }
}
