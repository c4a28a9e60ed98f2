//! Event handler blocks (`onClick`, `confunc`, ...)
//!
//! Handlers are command sequences, so the same key legitimately appears many times
//! (`cmd "a;" cmd "b;"`). Repeats are collected into a list in source order.

use super::body::{append_property, consume_body};
use super::super::context::ParserContext;
use super::super::dispatcher::{BlockHeader, Dispatcher};
use super::super::registry::{SubParser, SubParserFactory};
use crate::script::ast::error::ParseError;
use crate::script::ast::node::Node;

pub const EVENT_KEYWORDS: &[&str] = &[
    "onClick",
    "onRClick",
    "onMClick",
    "onWheelUp",
    "onWheelDown",
    "onMouseEnter",
    "onMouseLeave",
    "onChange",
    "onLoad",
    "onClose",
    "confunc",
    "func",
];

pub struct EventParser<'c> {
    ctx: &'c mut ParserContext,
}

impl SubParser for EventParser<'_> {
    fn consume_block(
        &mut self,
        header: BlockHeader,
        dispatcher: &Dispatcher<'_>,
    ) -> Result<Node, ParseError> {
        let mut node = header.to_node();
        consume_body(self.ctx, dispatcher, &header, &mut node, append_property)?;
        Ok(node)
    }
}

pub struct EventFactory {
    id: String,
}

impl EventFactory {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl SubParserFactory for EventFactory {
    fn id(&self) -> &str {
        &self.id
    }

    fn create<'c>(&self, ctx: &'c mut ParserContext) -> Box<dyn SubParser + 'c> {
        Box::new(EventParser { ctx })
    }

    fn description(&self) -> &str {
        "Event handler; repeated keys accumulate in order"
    }
}
