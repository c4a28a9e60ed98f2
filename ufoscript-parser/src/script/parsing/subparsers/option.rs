//! `option` entries inside option containers

use super::body::{consume_body, insert_property};
use super::super::context::ParserContext;
use super::super::dispatcher::{BlockHeader, Dispatcher};
use super::super::registry::{SubParser, SubParserFactory};
use crate::script::ast::diagnostics::Diagnostic;
use crate::script::ast::error::ParseError;
use crate::script::ast::node::Node;

pub const OPTION_KEYWORD: &str = "option";

pub struct OptionParser<'c> {
    ctx: &'c mut ParserContext,
}

impl SubParser for OptionParser<'_> {
    fn consume_block(
        &mut self,
        header: BlockHeader,
        dispatcher: &Dispatcher<'_>,
    ) -> Result<Node, ParseError> {
        let mut node = header.to_node();
        consume_body(self.ctx, dispatcher, &header, &mut node, insert_property)?;

        for (key, code) in [
            ("label", "option-missing-label"),
            ("value", "option-missing-value"),
        ] {
            if !node.attributes.contains_key(key) {
                self.ctx.report_diagnostic(
                    Diagnostic::warning(
                        header.range.clone(),
                        format!("Option has no '{}'", key),
                    )
                    .with_code(code),
                );
            }
        }
        Ok(node)
    }
}

pub struct OptionFactory;

impl SubParserFactory for OptionFactory {
    fn id(&self) -> &str {
        OPTION_KEYWORD
    }

    fn create<'c>(&self, ctx: &'c mut ParserContext) -> Box<dyn SubParser + 'c> {
        Box::new(OptionParser { ctx })
    }

    fn description(&self) -> &str {
        "Single choice with a label and a value"
    }
}
