//! # ufoscript
//!
//! A parser core for the UFO:AI UI script language (`.ufo` files).
//!
//! File Layout
//!
//!     src/script
//!       ├── lexing     logos tokenizer producing the full token stream up front
//!       ├── ast        Node tree, source ranges, diagnostics and error types
//!       ├── parsing    ParserContext, SubParserRegistry, Dispatcher and the sub-parser variants
//!       ├── formats    Output formats (treeviz, json, yaml, and the ufo script serializer)
//!       └── testing    Fluent assertions over parsed trees
//!
//! The contract is simple: raw source text in, a [Node](script::ast::Node) tree plus an
//! ordered list of diagnostics out. Block grammars are pluggable: every block keyword maps
//! to a factory in a [SubParserRegistry](script::parsing::SubParserRegistry), and the
//! dispatcher delegates to whichever sub-parser the registry returns.

pub mod script;

pub use script::parsing::{parse_script, ParseOptions, ScriptParser};
