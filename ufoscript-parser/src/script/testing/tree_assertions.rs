//! Fluent assertion API for tree nodes

use crate::script::ast::{Node, Value};

/// Create an assertion builder for a tree root
pub fn assert_tree(node: &Node) -> NodeAssertion<'_> {
    NodeAssertion {
        node,
        context: "root".to_string(),
    }
}

pub struct NodeAssertion<'a> {
    pub(crate) node: &'a Node,
    pub(crate) context: String,
}

fn summarize_children(node: &Node) -> String {
    node.children
        .iter()
        .map(|c| c.display_label())
        .collect::<Vec<_>>()
        .join(", ")
}

impl<'a> NodeAssertion<'a> {
    pub fn node(&self) -> &'a Node {
        self.node
    }

    /// Assert the node kind (block keyword)
    pub fn kind(self, expected: &str) -> Self {
        assert_eq!(
            self.node.kind, expected,
            "{}: Expected kind '{}', found '{}'",
            self.context, expected, self.node.kind
        );
        self
    }

    pub fn name(self, expected: &str) -> Self {
        assert_eq!(
            self.node.name.as_deref(),
            Some(expected),
            "{}: Expected name '{}', found {:?}",
            self.context,
            expected,
            self.node.name
        );
        self
    }

    pub fn anonymous(self) -> Self {
        assert!(
            self.node.name.is_none(),
            "{}: Expected anonymous block, found name {:?}",
            self.context,
            self.node.name
        );
        self
    }

    pub fn extends(self, expected: &str) -> Self {
        assert_eq!(
            self.node.extends.as_deref(),
            Some(expected),
            "{}: Expected parent '{}', found {:?}",
            self.context,
            expected,
            self.node.extends
        );
        self
    }

    /// Assert an attribute is present with the given value
    pub fn attribute(self, key: &str, expected: Value) -> Self {
        let actual = self.node.attribute(key);
        assert_eq!(
            actual,
            Some(&expected),
            "{}: Expected attribute '{}' = {}, found {:?}",
            self.context,
            key,
            expected,
            actual
        );
        self
    }

    pub fn attribute_str(self, key: &str, expected: &str) -> Self {
        self.attribute(key, Value::Str(expected.to_string()))
    }

    pub fn attribute_number(self, key: &str, expected: f64) -> Self {
        self.attribute(key, Value::Number(expected))
    }

    pub fn no_attribute(self, key: &str) -> Self {
        assert!(
            self.node.attribute(key).is_none(),
            "{}: Expected no attribute '{}', found {:?}",
            self.context,
            key,
            self.node.attribute(key)
        );
        self
    }

    pub fn attribute_count(self, expected: usize) -> Self {
        let keys: Vec<&str> = self.node.attributes.keys().collect();
        assert_eq!(
            keys.len(),
            expected,
            "{}: Expected {} attributes, found {}: {:?}",
            self.context,
            expected,
            keys.len(),
            keys
        );
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        let actual = self.node.children.len();
        assert_eq!(
            actual,
            expected,
            "{}: Expected {} children, found {}: [{}]",
            self.context,
            expected,
            actual,
            summarize_children(self.node)
        );
        self
    }

    /// Assert on a specific child by index
    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        assert!(
            index < self.node.children.len(),
            "{}: Child index {} out of bounds (node has {} children)",
            self.context,
            index,
            self.node.children.len()
        );
        assertion(NodeAssertion {
            node: &self.node.children[index],
            context: format!("{}.children[{}]", self.context, index),
        });
        self
    }

    /// Assert the block starts at the given 0-based line and column
    pub fn starts_at(self, line: usize, column: usize) -> Self {
        let start = self.node.range.start;
        assert_eq!(
            (start.line, start.column),
            (line, column),
            "{}: Expected start {}:{}, found {}",
            self.context,
            line,
            column,
            start
        );
        self
    }
}
