//! Sub-parser registry
//!
//! Maps block keywords to the factories that build their sub-parsers. Each block grammar
//! implements [SubParserFactory] (an id plus a `create` that binds a fresh sub-parser to
//! the parse context) and is registered under its id.
//!
//! The registry is an ordinary owned value: build it once at startup, register every
//! keyword, then hand out `&SubParserRegistry` to parsers. Mutation requires `&mut`, so
//! once it is shared across parser threads no registration can race a lookup.

use super::context::ParserContext;
use super::dispatcher::{BlockHeader, Dispatcher};
use crate::script::ast::error::{ParseError, RegistryError};
use crate::script::ast::node::Node;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A block grammar bound to one parse context.
///
/// `consume_block` is called with the context positioned just after the block's opening
/// brace and must consume everything up to and including the matching closing brace.
/// Nested blocks are handed back to the dispatcher.
pub trait SubParser {
    fn consume_block(
        &mut self,
        header: BlockHeader,
        dispatcher: &Dispatcher<'_>,
    ) -> Result<Node, ParseError>;
}

/// Builds sub-parsers for one block keyword.
pub trait SubParserFactory: Send + Sync {
    /// The block keyword this factory handles (e.g. "optionlist")
    fn id(&self) -> &str;

    /// Create a sub-parser for one occurrence of the block
    fn create<'c>(&self, ctx: &'c mut ParserContext) -> Box<dyn SubParser + 'c>;

    /// Optional description of the block grammar
    fn description(&self) -> &str {
        ""
    }
}

/// What `register` does when the keyword is already taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegistrationPolicy {
    /// Reject the second registration with [RegistryError::DuplicateRegistration]
    #[default]
    Strict,
    /// Replace the existing factory
    Permissive,
}

pub struct SubParserRegistry {
    factories: HashMap<String, Arc<dyn SubParserFactory>>,
    policy: RegistrationPolicy,
}

impl SubParserRegistry {
    /// Create an empty registry with the strict registration policy
    pub fn new() -> Self {
        Self::with_policy(RegistrationPolicy::Strict)
    }

    pub fn with_policy(policy: RegistrationPolicy) -> Self {
        SubParserRegistry {
            factories: HashMap::new(),
            policy,
        }
    }

    /// Create a strict registry holding every built-in block grammar
    pub fn with_defaults() -> Self {
        Self::with_defaults_and_policy(RegistrationPolicy::Strict)
    }

    pub fn with_defaults_and_policy(policy: RegistrationPolicy) -> Self {
        let mut registry = Self::with_policy(policy);
        for factory in super::subparsers::builtin_factories() {
            registry
                .factories
                .insert(factory.id().to_string(), factory);
        }
        registry
    }

    pub fn policy(&self) -> RegistrationPolicy {
        self.policy
    }

    /// Register a factory under its id
    pub fn register<F: SubParserFactory + 'static>(
        &mut self,
        factory: F,
    ) -> Result<(), RegistryError> {
        self.register_shared(Arc::new(factory))
    }

    /// Register an already shared factory under its id
    pub fn register_shared(
        &mut self,
        factory: Arc<dyn SubParserFactory>,
    ) -> Result<(), RegistryError> {
        let id = factory.id().to_string();
        if self.factories.contains_key(&id) {
            match self.policy {
                RegistrationPolicy::Strict => {
                    return Err(RegistryError::DuplicateRegistration { id });
                }
                RegistrationPolicy::Permissive => {
                    tracing::warn!(keyword = %id, "replacing registered sub-parser");
                }
            }
        }
        tracing::debug!(keyword = %id, "registered sub-parser");
        self.factories.insert(id, factory);
        Ok(())
    }

    /// Find the factory for a block keyword
    pub fn lookup(&self, keyword: &str) -> Option<&dyn SubParserFactory> {
        self.factories.get(keyword).map(|f| f.as_ref())
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.factories.contains_key(keyword)
    }

    /// All registered keywords, sorted
    pub fn keywords(&self) -> Vec<String> {
        let mut names: Vec<_> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl Default for SubParserRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for SubParserRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubParserRegistry")
            .field("policy", &self.policy)
            .field("keywords", &self.keywords())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EmptyBlock;

    impl SubParser for EmptyBlock {
        fn consume_block(
            &mut self,
            header: BlockHeader,
            _dispatcher: &Dispatcher<'_>,
        ) -> Result<Node, ParseError> {
            Ok(header.to_node())
        }
    }

    struct TestFactory(&'static str, &'static str);

    impl SubParserFactory for TestFactory {
        fn id(&self) -> &str {
            self.0
        }
        fn create<'c>(&self, _ctx: &'c mut ParserContext) -> Box<dyn SubParser + 'c> {
            Box::new(EmptyBlock)
        }
        fn description(&self) -> &str {
            self.1
        }
    }

    #[test]
    fn test_registry_creation() {
        let registry = SubParserRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.policy(), RegistrationPolicy::Strict);
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = SubParserRegistry::new();
        registry.register(TestFactory("optionlist", "first")).unwrap();

        assert!(registry.contains("optionlist"));
        assert_eq!(registry.lookup("optionlist").unwrap().id(), "optionlist");
        assert!(registry.lookup("selectbox").is_none());
    }

    #[test]
    fn test_strict_rejects_duplicates() {
        let mut registry = SubParserRegistry::new();
        registry.register(TestFactory("optionlist", "first")).unwrap();

        let err = registry
            .register(TestFactory("optionlist", "second"))
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateRegistration {
                id: "optionlist".to_string()
            }
        );
        assert_eq!(
            registry.lookup("optionlist").unwrap().description(),
            "first"
        );
    }

    #[test]
    fn test_permissive_replaces() {
        let mut registry = SubParserRegistry::with_policy(RegistrationPolicy::Permissive);
        registry.register(TestFactory("optionlist", "first")).unwrap();
        registry.register(TestFactory("optionlist", "second")).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.lookup("optionlist").unwrap().description(),
            "second"
        );
    }

    #[test]
    fn test_with_defaults_covers_builtins() {
        let registry = SubParserRegistry::with_defaults();
        for keyword in ["window", "optionlist", "option", "onClick", "button"] {
            assert!(registry.contains(keyword), "missing {}", keyword);
        }
    }

    #[test]
    fn test_builtins_register_cleanly_under_strict_policy() {
        let mut registry = SubParserRegistry::new();
        for factory in super::super::subparsers::builtin_factories() {
            registry.register_shared(factory).unwrap();
        }
        assert_eq!(registry.len(), SubParserRegistry::with_defaults().len());
    }

    #[test]
    fn test_keywords_sorted() {
        let mut registry = SubParserRegistry::new();
        registry.register(TestFactory("zone", "")).unwrap();
        registry.register(TestFactory("button", "")).unwrap();
        assert_eq!(registry.keywords(), vec!["button", "zone"]);
    }

    #[test]
    fn test_registry_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SubParserRegistry>();
    }
}
