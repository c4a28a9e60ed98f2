//! Testing utilities for parsed trees
//!
//!     Tests should assert on the tree the way a reader thinks about a script: this block
//!     is an `optionlist` named `res`, its second child is an `option` whose `value` is 1.
//!     Poking at `children[0].children[1].attributes` by hand hides that intent and gives
//!     poor failure messages, so use the fluent API instead:
//!
//!     ```rust,ignore
//!     use ufoscript_parser::script::testing::{assert_tree, parse_with_defaults};
//!
//!     let output = parse_with_defaults("optionlist res { option a { label \"A\" value 1 } }");
//!     assert_tree(&output.root)
//!         .child_count(1)
//!         .child(0, |list| {
//!             list.kind("optionlist")
//!                 .name("res")
//!                 .child(0, |opt| {
//!                     opt.kind("option").attribute_number("value", 1.0);
//!                 });
//!         });
//!     ```
//!
//!     Every assertion carries a path (`root.children[0].children[0]`) in its panic
//!     message, so a failure deep in a tree points at the exact node.

pub mod tree_assertions;

pub use tree_assertions::{assert_tree, NodeAssertion};

use crate::script::parsing::{ParseOutput, ScriptParser, SubParserRegistry};

/// Parse with the built-in registry and default options, panicking on failure.
pub fn parse_with_defaults(source: &str) -> ParseOutput {
    let registry = SubParserRegistry::with_defaults();
    match ScriptParser::new(&registry).parse(source, "test.ufo") {
        Ok(output) => output,
        Err(failure) => panic!("{}\n{}", failure, failure_context(source, &failure)),
    }
}

fn failure_context(source: &str, failure: &crate::script::ast::ParseFailure) -> String {
    crate::script::ast::format_source_context(source, failure.error.range())
}
