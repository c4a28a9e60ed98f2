//! Parse tree, source locations, diagnostics and errors
//!
//!     The tree is deliberately generic: a [Node] is a kind, an optional name, attributes
//!     and children. Which kinds exist and what their bodies may contain is decided by the
//!     sub-parsers registered at runtime, not by this module.

pub mod diagnostics;
pub mod error;
pub mod node;
pub mod range;

pub use diagnostics::{count_severity, Diagnostic, DiagnosticSeverity};
pub use error::{format_source_context, ParseError, ParseFailure, RegistryError};
pub use node::{Attributes, Node, Value, DOCUMENT_KIND};
pub use range::{Position, Range, SourceLocation};
