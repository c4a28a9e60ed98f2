//! Output format lookup
//!
//! Every output format is a [Formatter] registered under a fixed name. Presentation
//! choices travel with each call as [RenderOptions], so a single registry (usually
//! [FormatRegistry::with_defaults]) serves callers with different settings and a
//! formatter never needs re-registering to change how it renders.

use crate::script::ast::Node;
use std::collections::BTreeMap;
use std::fmt;

/// Per-call presentation settings. Formats ignore options that do not apply to them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Prefix tree lines with the source line of the block they show
    pub show_line_numbers: bool,
}

impl RenderOptions {
    pub fn with_line_numbers(mut self, show: bool) -> Self {
        self.show_line_numbers = show;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// No formatter is registered under `name`
    UnknownFormat {
        name: String,
        available: Vec<&'static str>,
    },
    /// The tree holds something the target format cannot express
    Unrepresentable(String),
    /// The serde backend of a data format failed
    Encoding {
        format: &'static str,
        message: String,
    },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::UnknownFormat { name, available } => write!(
                f,
                "Format '{}' not found (available: {})",
                name,
                available.join(", ")
            ),
            FormatError::Unrepresentable(msg) => write!(f, "Cannot render tree: {}", msg),
            FormatError::Encoding { format, message } => {
                write!(f, "{} encoding failed: {}", format, message)
            }
        }
    }
}

impl std::error::Error for FormatError {}

pub trait Formatter: Send + Sync {
    /// Name the format is selected by, e.g. "treeviz"
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn render(&self, node: &Node, options: &RenderOptions) -> Result<String, FormatError>;
}

pub struct FormatRegistry {
    formats: BTreeMap<&'static str, Box<dyn Formatter>>,
}

impl FormatRegistry {
    pub fn empty() -> Self {
        Self {
            formats: BTreeMap::new(),
        }
    }

    /// treeviz, json, yaml and ufo
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.add(super::TreevizFormatter);
        registry.add(super::JsonFormatter);
        registry.add(super::YamlFormatter);
        registry.add(super::UfoFormatter);
        registry
    }

    /// Add a format, returning the one it displaced, if any.
    pub fn add<F: Formatter + 'static>(&mut self, formatter: F) -> Option<Box<dyn Formatter>> {
        self.formats.insert(formatter.name(), Box::new(formatter))
    }

    pub fn get(&self, name: &str) -> Result<&dyn Formatter, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::UnknownFormat {
                name: name.to_string(),
                available: self.formats.keys().copied().collect(),
            })
    }

    pub fn render(
        &self,
        node: &Node,
        format: &str,
        options: &RenderOptions,
    ) -> Result<String, FormatError> {
        let formatter = self.get(format)?;
        tracing::debug!(format = formatter.name(), ?options, "rendering tree");
        formatter.render(node, options)
    }

    /// `(name, description)` pairs in name order
    pub fn formats(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.formats.values().map(|f| (f.name(), f.description()))
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
