//! Script serializer: tree back to `.ufo` source
//!
//!     Output is canonical rather than faithful: comments and original spacing are gone,
//!     bodies are indented with tabs, attributes come before child blocks, and list values
//!     are written back as one `key value` line per item. Parsing the output yields a tree
//!     equal to the input.
//!
//!     Identifier values are written bare, strings are quoted and escaped. Values that
//!     cannot be written so that they read back the same (non-finite numbers, nested lists,
//!     names that are not identifiers) are serialization errors.

use super::registry::{FormatError, Formatter, RenderOptions};
use crate::script::ast::{Node, Value};
use crate::script::lexing::escape;
use once_cell::sync::Lazy;
use regex::Regex;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.:\-]*$").unwrap());

const RESERVED: &[&str] = &["extends"];

fn is_identifier(text: &str) -> bool {
    IDENTIFIER.is_match(text) && !RESERVED.contains(&text)
}

fn identifier<'a>(text: &'a str, what: &str) -> Result<&'a str, FormatError> {
    if is_identifier(text) {
        Ok(text)
    } else {
        Err(FormatError::Unrepresentable(format!(
            "{} '{}' is not a valid identifier",
            what, text
        )))
    }
}

fn scalar(value: &Value) -> Result<String, FormatError> {
    match value {
        Value::Str(s) => Ok(format!("\"{}\"", escape(s))),
        Value::Number(n) if n.is_finite() => Ok(n.to_string()),
        Value::Number(n) => Err(FormatError::Unrepresentable(format!(
            "number {} has no script representation",
            n
        ))),
        Value::Ident(s) if is_identifier(s) => Ok(s.clone()),
        Value::Ident(s) => Ok(format!("\"{}\"", escape(s))),
        Value::List(_) => Err(FormatError::Unrepresentable(
            "nested lists have no script representation".to_string(),
        )),
    }
}

fn write_block(out: &mut String, node: &Node, depth: usize) -> Result<(), FormatError> {
    let indent = "\t".repeat(depth);

    out.push_str(&indent);
    out.push_str(identifier(&node.kind, "block keyword")?);
    if let Some(name) = &node.name {
        out.push(' ');
        out.push_str(identifier(name, "block name")?);
    }
    if let Some(parent) = &node.extends {
        out.push_str(" extends ");
        out.push_str(identifier(parent, "parent name")?);
    }
    out.push_str(" {\n");

    for (key, value) in node.attributes.iter() {
        let key = identifier(key, "property key")?;
        let values = match value {
            Value::List(items) => items.iter().collect::<Vec<_>>(),
            single => vec![single],
        };
        for value in values {
            out.push_str(&format!("{}\t{} {}\n", indent, key, scalar(value)?));
        }
    }
    for child in &node.children {
        write_block(out, child, depth + 1)?;
    }

    out.push_str(&indent);
    out.push_str("}\n");
    Ok(())
}

/// Serialize a tree to script source. A document root writes its blocks one after
/// another; any other node is written as a single block.
pub fn to_ufo_string(node: &Node) -> Result<String, FormatError> {
    let mut out = String::new();
    if node.is_document() {
        for (i, block) in node.children.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            write_block(&mut out, block, 0)?;
        }
    } else {
        write_block(&mut out, node, 0)?;
    }
    Ok(out)
}

pub struct UfoFormatter;

impl Formatter for UfoFormatter {
    fn name(&self) -> &'static str {
        "ufo"
    }

    fn description(&self) -> &'static str {
        "UFO script source"
    }

    fn render(&self, node: &Node, _options: &RenderOptions) -> Result<String, FormatError> {
        to_ufo_string(node)
    }
}
