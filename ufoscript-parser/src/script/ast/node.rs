//! Node tree produced by the parser
//!
//!     A script is a tree of blocks. Every block becomes a [Node]: its keyword is the node
//!     kind, the optional identifier after it is the node name, and `extends parent` is kept
//!     as the parent name. Properties inside the block become attributes, nested blocks
//!     become children in source order.
//!
//!     Attributes keep their first-seen order so serialized output follows the source. A
//!     repeated key replaces the value in place (or, for event blocks, accumulates into a
//!     [Value::List]).
//!
//!     Equality is structural: the source range is ignored, so a tree re-parsed from
//!     serialized output compares equal to the original.

use super::range::Range;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// A property value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Double-quoted string, stored unescaped
    Str(String),
    Number(f64),
    /// Bare identifier such as `ul` or `cvar:mn_active`
    Ident(String),
    /// Repeated entries of the same key (event blocks)
    List(Vec<Value>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) | Value::Ident(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Append `value`, turning a scalar into a list on first repetition.
    pub fn push(&mut self, value: Value) {
        match self {
            Value::List(items) => items.push(value),
            scalar => {
                let first = std::mem::replace(scalar, Value::List(Vec::with_capacity(2)));
                if let Value::List(items) = scalar {
                    items.push(first);
                    items.push(value);
                }
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "\"{}\"", s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Ident(s) => write!(f, "{}", s),
            Value::List(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}

/// Insertion-ordered attribute map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    entries: Vec<(String, Value)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert or replace, returning the previous value. A replaced key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        match self.get_mut(&key) {
            Some(slot) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Kind of the synthetic root node that owns every top-level block.
pub const DOCUMENT_KIND: &str = "document";

#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    #[serde(skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
    pub range: Range,
}

impl Node {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: None,
            extends: None,
            attributes: Attributes::new(),
            children: Vec::new(),
            range: Range::default(),
        }
    }

    /// The root of a parsed file.
    pub fn document() -> Self {
        Self::new(DOCUMENT_KIND)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_extends(mut self, parent: impl Into<String>) -> Self {
        self.extends = Some(parent.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key, value);
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn at(mut self, range: Range) -> Self {
        self.range = range;
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn is_document(&self) -> bool {
        self.kind == DOCUMENT_KIND
    }

    /// Label used by tree views: `kind name`, or just `kind` for anonymous blocks.
    pub fn display_label(&self) -> String {
        match (&self.name, &self.extends) {
            (Some(name), Some(parent)) => format!("{} {} extends {}", self.kind, name, parent),
            (Some(name), None) => format!("{} {}", self.kind, name),
            (None, Some(parent)) => format!("{} extends {}", self.kind, parent),
            (None, None) => self.kind.clone(),
        }
    }

    /// Children of the given kind.
    pub fn children_of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children.iter().filter(move |child| child.kind == kind)
    }

    /// First child with the given name.
    pub fn child_named(&self, name: &str) -> Option<&Node> {
        self.children
            .iter()
            .find(|child| child.name.as_deref() == Some(name))
    }

    /// Resolve a dotted path (`window.node.option`) against named descendants.
    pub fn find_by_path(&self, path: &str) -> Option<&Node> {
        path.split('.')
            .try_fold(self, |node, segment| node.child_named(segment))
    }

    /// Depth-first iterator over this node and all descendants with their depth.
    pub fn iter_with_depth(&self) -> impl Iterator<Item = (&Node, usize)> {
        let mut stack = vec![(self, 0usize)];
        std::iter::from_fn(move || {
            let (node, depth) = stack.pop()?;
            stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
            Some((node, depth))
        })
    }

    /// Total number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        self.iter_with_depth().count()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.name == other.name
            && self.extends == other.extends
            && self.attributes == other.attributes
            && self.children == other.children
    }
}
