//! Output format implementations for parsed trees
//!
//! This module contains the formats a [Node](crate::script::ast::Node) tree can be
//! serialized to:
//! - treeviz: one line per node, for humans
//! - json / yaml: the tree as data, via serde
//! - ufo: back to script source, for round-tripping

pub mod registry;
pub mod serde_formats;
pub mod serializer;
pub mod treeviz;

pub use registry::{FormatError, FormatRegistry, Formatter, RenderOptions};
pub use serde_formats::{JsonFormatter, YamlFormatter};
pub use serializer::{to_ufo_string, UfoFormatter};
pub use treeviz::{to_treeviz_str, to_treeviz_str_with_line_numbers, TreevizFormatter};
