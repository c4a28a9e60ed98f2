//! Treeviz formatter for parsed trees
//!
//! One line per node, nesting drawn with box connectors, which makes it quick to eyeball
//! the shape of a UI script. Attributes are listed as leaves before a node's child blocks.
//!
//! Example:
//!
//!     ⧉ document
//!     └─ ▣ window options
//!       ├─ ≔ size "1024 768"
//!       └─ ☰ optionlist res
//!         └─ • option opt_800
//!           ├─ ≔ label "800x600"
//!           └─ ≔ value 0
//!
//! Icons
//!     Document: ⧉
//!     Window, component: ▣
//!     Option containers: ☰
//!     Option: •
//!     Event handlers: ⚡
//!     Other nodes: ○
//!     Attribute: ≔
//!
//! With line numbers on, each node line is prefixed by the 1-based line its block starts on.

use super::registry::{FormatError, Formatter, RenderOptions};
use crate::script::ast::{Node, Value, DOCUMENT_KIND};
use crate::script::parsing::subparsers::{event, option, optionlist, window};

const LABEL_WIDTH: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn get_icon(kind: &str) -> &'static str {
    if kind == DOCUMENT_KIND {
        "⧉"
    } else if window::WINDOW_KEYWORDS.contains(&kind) {
        "▣"
    } else if optionlist::OPTION_CONTAINER_KEYWORDS.contains(&kind) {
        "☰"
    } else if kind == option::OPTION_KEYWORD {
        "•"
    } else if event::EVENT_KEYWORDS.contains(&kind) {
        "⚡"
    } else {
        "○"
    }
}

struct Treeviz {
    show_linum: bool,
    out: String,
}

impl Treeviz {
    fn linum(&self, line: Option<usize>) -> String {
        match (self.show_linum, line) {
            (false, _) => String::new(),
            (true, Some(line)) => format!("{:02} ", line + 1),
            (true, None) => "   ".to_string(),
        }
    }

    fn attribute(&mut self, prefix: &str, is_last: bool, key: &str, value: &Value) {
        let connector = if is_last { "└─" } else { "├─" };
        let linum = self.linum(None);
        let label = truncate(&format!("{} {}", key, value), LABEL_WIDTH);
        self.out
            .push_str(&format!("{}{}{} ≔ {}\n", linum, prefix, connector, label));
    }

    fn node(&mut self, node: &Node, prefix: &str, is_last: bool) {
        let connector = if is_last { "└─" } else { "├─" };
        let linum = self.linum(Some(node.range.start.line));
        self.out.push_str(&format!(
            "{}{}{} {} {}\n",
            linum,
            prefix,
            connector,
            get_icon(&node.kind),
            truncate(&node.display_label(), LABEL_WIDTH)
        ));

        let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
        self.items(node, &child_prefix);
    }

    fn items(&mut self, node: &Node, prefix: &str) {
        let total = node.attributes.len() + node.children.len();
        for (i, (key, value)) in node.attributes.iter().enumerate() {
            self.attribute(prefix, i + 1 == total, key, value);
        }
        let offset = node.attributes.len();
        for (i, child) in node.children.iter().enumerate() {
            self.node(child, prefix, offset + i + 1 == total);
        }
    }
}

fn render(node: &Node, show_linum: bool) -> String {
    let mut viz = Treeviz {
        show_linum,
        out: String::new(),
    };
    if node.is_document() {
        viz.out.push_str(&format!(
            "{} {}\n",
            get_icon(&node.kind),
            truncate(&node.display_label(), LABEL_WIDTH)
        ));
        viz.items(node, "");
    } else {
        viz.node(node, "", true);
    }
    viz.out
}

pub fn to_treeviz_str(node: &Node) -> String {
    render(node, false)
}

pub fn to_treeviz_str_with_line_numbers(node: &Node) -> String {
    render(node, true)
}

/// The `treeviz` format. Line numbers come from [RenderOptions].
#[derive(Debug, Clone, Copy, Default)]
pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &'static str {
        "treeviz"
    }

    fn description(&self) -> &'static str {
        "Visual tree representation with box connectors and icons"
    }

    fn render(&self, node: &Node, options: &RenderOptions) -> Result<String, FormatError> {
        Ok(render(node, options.show_line_numbers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icons() {
        assert_eq!(get_icon("document"), "⧉");
        assert_eq!(get_icon("component"), "▣");
        assert_eq!(get_icon("selectbox"), "☰");
        assert_eq!(get_icon("option"), "•");
        assert_eq!(get_icon("onClick"), "⚡");
        assert_eq!(get_icon("button"), "○");
    }

    #[test]
    fn test_connectors() {
        let tree = Node::document()
            .with_child(
                Node::new("window")
                    .with_name("main")
                    .with_attribute("size", Value::Str("10 10".into()))
                    .with_child(Node::new("button").with_name("ok")),
            )
            .with_child(Node::new("window").with_name("other"));

        let expected = "\
⧉ document
├─ ▣ window main
│ ├─ ≔ size \"10 10\"
│ └─ ○ button ok
└─ ▣ window other
";
        assert_eq!(to_treeviz_str(&tree), expected);
    }

    #[test]
    fn test_truncates_long_labels() {
        let long = "x".repeat(40);
        let tree = Node::document().with_child(Node::new("button").with_name(long));
        let output = to_treeviz_str(&tree);
        assert!(output.lines().nth(1).unwrap().ends_with("..."));
    }
}
