//! Option containers (`optionlist`, `selectbox`, `tab`, `optiontree`)
//!
//! A container lists its choices either inline, as `option` child blocks, or by
//! reference, through a `dataid` property naming an option list filled in by game code.
//! A container with neither shows nothing, which is worth an Info diagnostic.
//!
//! ```text
//! optionlist resolutions {
//!     size "200 80"
//!     cvar "*cvar:vid_mode"
//!     option opt_800 { label "800x600" value 0 }
//!     option opt_1024 { label "1024x768" value 1 }
//! }
//! ```

use super::body::{consume_body, insert_property};
use super::super::context::ParserContext;
use super::super::dispatcher::{BlockHeader, Dispatcher};
use super::super::registry::{SubParser, SubParserFactory};
use super::option::OPTION_KEYWORD;
use crate::script::ast::diagnostics::Diagnostic;
use crate::script::ast::error::ParseError;
use crate::script::ast::node::Node;

pub const OPTION_CONTAINER_KEYWORDS: &[&str] = &["optionlist", "selectbox", "tab", "optiontree"];

/// Property that binds a container to an externally provided option list
pub const DATA_ID_KEY: &str = "dataid";

pub struct OptionListParser<'c> {
    ctx: &'c mut ParserContext,
}

impl SubParser for OptionListParser<'_> {
    fn consume_block(
        &mut self,
        header: BlockHeader,
        dispatcher: &Dispatcher<'_>,
    ) -> Result<Node, ParseError> {
        let mut node = header.to_node();
        consume_body(self.ctx, dispatcher, &header, &mut node, insert_property)?;

        let has_options = node.children_of_kind(OPTION_KEYWORD).next().is_some();
        if !has_options && !node.attributes.contains_key(DATA_ID_KEY) {
            self.ctx.report_diagnostic(
                Diagnostic::info(
                    header.range.clone(),
                    format!(
                        "'{}' block has no options and no '{}'",
                        header.keyword, DATA_ID_KEY
                    ),
                )
                .with_code("empty-option-list"),
            );
        }
        Ok(node)
    }
}

pub struct OptionListFactory {
    id: String,
}

impl OptionListFactory {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl SubParserFactory for OptionListFactory {
    fn id(&self) -> &str {
        &self.id
    }

    fn create<'c>(&self, ctx: &'c mut ParserContext) -> Box<dyn SubParser + 'c> {
        Box::new(OptionListParser { ctx })
    }

    fn description(&self) -> &str {
        "Container of option entries, inline or bound through dataid"
    }
}
