//! `window` and `component` blocks
//!
//! Windows are the roots of the UI tree. The engine addresses them by name, so an unnamed
//! window is reported, as is a window opened inside another block.

use super::body::{consume_body, insert_property};
use super::super::context::ParserContext;
use super::super::dispatcher::{BlockHeader, Dispatcher};
use super::super::registry::{SubParser, SubParserFactory};
use crate::script::ast::diagnostics::Diagnostic;
use crate::script::ast::error::ParseError;
use crate::script::ast::node::Node;

pub const WINDOW_KEYWORDS: &[&str] = &["window", "component"];

pub struct WindowParser<'c> {
    ctx: &'c mut ParserContext,
}

impl SubParser for WindowParser<'_> {
    fn consume_block(
        &mut self,
        header: BlockHeader,
        dispatcher: &Dispatcher<'_>,
    ) -> Result<Node, ParseError> {
        if header.name.is_none() {
            self.ctx.report_diagnostic(
                Diagnostic::warning(
                    header.range.clone(),
                    format!("'{}' block has no name", header.keyword),
                )
                .with_code("unnamed-window"),
            );
        }
        if self.ctx.depth() > 1 {
            self.ctx.report_diagnostic(
                Diagnostic::warning(
                    header.range.clone(),
                    format!("'{}' block should only appear at top level", header.keyword),
                )
                .with_code("nested-window"),
            );
        }

        let mut node = header.to_node();
        consume_body(self.ctx, dispatcher, &header, &mut node, insert_property)?;
        Ok(node)
    }
}

pub struct WindowFactory {
    id: String,
}

impl WindowFactory {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl SubParserFactory for WindowFactory {
    fn id(&self) -> &str {
        &self.id
    }

    fn create<'c>(&self, ctx: &'c mut ParserContext) -> Box<dyn SubParser + 'c> {
        Box::new(WindowParser { ctx })
    }

    fn description(&self) -> &str {
        "Top-level named container of UI nodes"
    }
}
