//! JSON and YAML output
//!
//! Both are straight serde dumps of the tree. Attributes serialize as a map in source
//! order, event lists as arrays, and each node carries its line:column range.

use super::registry::{FormatError, Formatter, RenderOptions};
use crate::script::ast::Node;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn description(&self) -> &'static str {
        "Tree as pretty-printed JSON"
    }

    fn render(&self, node: &Node, _options: &RenderOptions) -> Result<String, FormatError> {
        serde_json::to_string_pretty(node).map_err(|err| FormatError::Encoding {
            format: "json",
            message: err.to_string(),
        })
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn description(&self) -> &'static str {
        "Tree as YAML"
    }

    fn render(&self, node: &Node, _options: &RenderOptions) -> Result<String, FormatError> {
        serde_yaml::to_string(node).map_err(|err| FormatError::Encoding {
            format: "yaml",
            message: err.to_string(),
        })
    }
}
