//! Plain UI node blocks (`button`, `string`, `panel`, ...)
//!
//! A node body is properties and nested blocks. Setting a property twice is legal in the
//! engine (the later value overwrites the earlier one) but is almost always a copy-paste
//! slip, so it is reported.

use super::body::{consume_body, insert_property};
use super::super::context::ParserContext;
use super::super::dispatcher::{BlockHeader, Dispatcher};
use super::super::registry::{SubParser, SubParserFactory};
use crate::script::ast::error::ParseError;
use crate::script::ast::node::Node;

pub const NODE_KEYWORDS: &[&str] = &[
    "button",
    "checkbox",
    "string",
    "text",
    "image",
    "pic",
    "panel",
    "textentry",
    "spinner",
    "bar",
    "model",
    "container",
    "zone",
    "radiobutton",
    "vscrollbar",
    "linechart",
    "item",
];

pub struct NodeParser<'c> {
    ctx: &'c mut ParserContext,
}

impl SubParser for NodeParser<'_> {
    fn consume_block(
        &mut self,
        header: BlockHeader,
        dispatcher: &Dispatcher<'_>,
    ) -> Result<Node, ParseError> {
        let mut node = header.to_node();
        consume_body(self.ctx, dispatcher, &header, &mut node, insert_property)?;
        Ok(node)
    }
}

pub struct NodeFactory {
    id: String,
}

impl NodeFactory {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl SubParserFactory for NodeFactory {
    fn id(&self) -> &str {
        &self.id
    }

    fn create<'c>(&self, ctx: &'c mut ParserContext) -> Box<dyn SubParser + 'c> {
        Box::new(NodeParser { ctx })
    }

    fn description(&self) -> &str {
        "UI node with properties and nested blocks"
    }
}
