//! Built-in sub-parsers
//!
//!     Every block keyword of the stock UI scripts maps to one of five block grammars:
//!
//!         window       window, component
//!         node         button, string, panel, ... (see [node::NODE_KEYWORDS])
//!         optionlist   optionlist, selectbox, tab, optiontree
//!         option       option
//!         event        onClick, confunc, func, ... (see [event::EVENT_KEYWORDS])
//!
//!     They share the body loop in [body] and differ in how properties are stored and which
//!     checks run once the block is closed.

pub mod body;
pub mod event;
pub mod node;
pub mod option;
pub mod optionlist;
pub mod window;

use super::registry::SubParserFactory;
use std::sync::Arc;

pub use event::EventFactory;
pub use node::NodeFactory;
pub use option::OptionFactory;
pub use optionlist::OptionListFactory;
pub use window::WindowFactory;

/// One factory per built-in block keyword.
pub fn builtin_factories() -> Vec<Arc<dyn SubParserFactory>> {
    let mut factories: Vec<Arc<dyn SubParserFactory>> = Vec::new();
    for keyword in window::WINDOW_KEYWORDS {
        factories.push(Arc::new(WindowFactory::new(*keyword)));
    }
    for keyword in node::NODE_KEYWORDS {
        factories.push(Arc::new(NodeFactory::new(*keyword)));
    }
    for keyword in optionlist::OPTION_CONTAINER_KEYWORDS {
        factories.push(Arc::new(OptionListFactory::new(*keyword)));
    }
    factories.push(Arc::new(OptionFactory));
    for keyword in event::EVENT_KEYWORDS {
        factories.push(Arc::new(EventFactory::new(*keyword)));
    }
    factories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::ast::diagnostics::Diagnostic;
    use crate::script::ast::node::Value;
    use crate::script::parsing::registry::SubParserRegistry;
    use crate::script::parsing::{ParseOutput, ScriptParser};

    fn parse(source: &str) -> ParseOutput {
        let registry = SubParserRegistry::with_defaults();
        ScriptParser::new(&registry)
            .parse(source, "test.ufo")
            .unwrap()
    }

    fn codes(diagnostics: &[Diagnostic]) -> Vec<&str> {
        diagnostics
            .iter()
            .filter_map(|d| d.code.as_deref())
            .collect()
    }

    #[test]
    fn test_builtin_ids_are_unique() {
        let factories = builtin_factories();
        let mut ids: Vec<&str> = factories.iter().map(|f| f.id()).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_window_checks() {
        let output = parse("window { } window outer { window inner { } }");
        assert_eq!(codes(&output.diagnostics), vec!["unnamed-window", "nested-window"]);
    }

    #[test]
    fn test_node_duplicate_property() {
        let output = parse("window w { button b { pos \"1 1\" pos \"2 2\" } }");
        let button = output.root.find_by_path("w.b").unwrap();
        assert_eq!(button.attribute("pos"), Some(&Value::Str("2 2".into())));
        assert_eq!(codes(&output.diagnostics), vec!["duplicate-property"]);
    }

    #[test]
    fn test_empty_option_list_info() {
        let output = parse("optionlist a { } optionlist b { dataid OPTION_LANGUAGES }");
        assert_eq!(codes(&output.diagnostics), vec!["empty-option-list"]);
        assert_eq!(output.diagnostics[0].range.start.column, 0);
    }

    #[test]
    fn test_option_missing_fields() {
        let output = parse("selectbox s { option o { label \"x\" } }");
        assert_eq!(codes(&output.diagnostics), vec!["option-missing-value"]);
    }

    #[test]
    fn test_event_accumulates_commands() {
        let output = parse("button b { onClick { cmd \"a;\" cmd \"b;\" } }");
        let click = &output.root.children[0].children[0];
        assert_eq!(click.kind, "onClick");
        assert_eq!(
            click.attribute("cmd"),
            Some(&Value::List(vec![
                Value::Str("a;".into()),
                Value::Str("b;".into())
            ]))
        );
        assert!(output.diagnostics.is_empty());
    }
}
