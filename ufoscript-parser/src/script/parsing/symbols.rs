//! Symbol table for named blocks
//!
//! Named blocks declare a symbol at their dotted path, the same `window.node.option`
//! naming the game engine uses to address nodes. Anonymous blocks declare nothing and add
//! no path segment, so their named descendants are addressed through the nearest named
//! ancestor.

use crate::script::ast::range::Range;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SymbolTable {
    declarations: BTreeMap<String, Range>,
    #[serde(skip)]
    scope: Vec<Option<String>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dotted path of the innermost open named scope (empty at top level).
    pub fn current_path(&self) -> String {
        self.scope
            .iter()
            .flatten()
            .cloned()
            .collect::<Vec<_>>()
            .join(".")
    }

    fn qualify(&self, name: &str) -> String {
        let parent = self.current_path();
        if parent.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", parent, name)
        }
    }

    /// Open a block scope, declaring `name` if present.
    ///
    /// Returns the earlier declaration site when the qualified path is already taken; the
    /// first declaration is kept.
    pub fn enter(&mut self, name: Option<&str>, site: &Range) -> Option<Range> {
        let mut previous = None;
        if let Some(name) = name {
            let path = self.qualify(name);
            match self.declarations.get(&path) {
                Some(existing) => previous = Some(existing.clone()),
                None => {
                    self.declarations.insert(path, site.clone());
                }
            }
        }
        self.scope.push(name.map(str::to_string));
        previous
    }

    pub fn exit(&mut self) {
        self.scope.pop();
    }

    pub fn get(&self, path: &str) -> Option<&Range> {
        self.declarations.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.declarations.contains_key(path)
    }

    /// Declarations sorted by path.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Range)> {
        self.declarations.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}
