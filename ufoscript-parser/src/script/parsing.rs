//! Parsing
//!
//!     Parsing turns the token stream into a [Node] tree. The work is split between a
//!     generic driver and pluggable block grammars:
//!
//!         1. Lexing: the whole file is tokenized up front (see [crate::script::lexing]).
//!         2. [ParserContext]: owns tokens, cursor, diagnostics and symbol table for one file.
//!         3. [Dispatcher]: reads block headers and hands each block to the sub-parser the
//!            [SubParserRegistry] returns for its keyword.
//!         4. Sub-parsers ([subparsers]): consume one block body each, recursing into the
//!            dispatcher for nested blocks.
//!
//!     The registry is built once and passed by reference; any number of [ScriptParser]s,
//!     on any number of threads, may share it.
//!
//!     A parse either succeeds with a [ParseOutput] (which may still carry Error
//!     diagnostics from lexing) or fails with a [ParseFailure] holding the fatal error, the
//!     partial tree (completed blocks plus the chain of blocks still open at the error) and
//!     every diagnostic reported so far.
//!
//!     Nesting depth is capped by [ParseOptions::max_depth] so that hostile or generated
//!     input fails with `NestingTooDeep` instead of exhausting the stack.

pub mod context;
pub mod dispatcher;
pub mod registry;
pub mod subparsers;
pub mod symbols;

pub use context::{ParserContext, DEFAULT_MAX_DEPTH};
pub use dispatcher::{BlockHeader, DispatchState, Dispatcher, UnknownBlockPolicy};
pub use registry::{RegistrationPolicy, SubParser, SubParserFactory, SubParserRegistry};
pub use symbols::SymbolTable;

use crate::script::ast::diagnostics::{Diagnostic, DiagnosticSeverity};
use crate::script::ast::error::ParseFailure;
use crate::script::ast::node::Node;
use crate::script::ast::range::SourceLocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub unknown_blocks: UnknownBlockPolicy,
    /// Deepest block nesting accepted; a block past it fails the parse
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            unknown_blocks: UnknownBlockPolicy::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Result of a successful parse
#[derive(Debug, Clone)]
pub struct ParseOutput {
    pub root: Node,
    /// Lexer and sub-parser diagnostics in the order they were reported
    pub diagnostics: Vec<Diagnostic>,
    pub symbols: SymbolTable,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == DiagnosticSeverity::Error)
    }
}

/// Parses source files against a shared registry.
#[derive(Debug, Clone, Copy)]
pub struct ScriptParser<'r> {
    registry: &'r SubParserRegistry,
    options: ParseOptions,
}

impl<'r> ScriptParser<'r> {
    pub fn new(registry: &'r SubParserRegistry) -> Self {
        Self {
            registry,
            options: ParseOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_unknown_blocks(mut self, policy: UnknownBlockPolicy) -> Self {
        self.options.unknown_blocks = policy;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.options.max_depth = max_depth;
        self
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// Parse one file. `file` identifies the source in diagnostics.
    pub fn parse(&self, source: &str, file: &str) -> Result<ParseOutput, ParseFailure> {
        let _span = tracing::debug_span!("parse", file).entered();

        let mut ctx =
            ParserContext::from_source(file, source).with_max_depth(self.options.max_depth);
        let mut root = Node::document().at(SourceLocation::new(source).full_range());
        let dispatcher = Dispatcher::new(self.registry, self.options.unknown_blocks);

        let result = dispatcher.parse_document(&mut ctx, &mut root);
        let (mut diagnostics, symbols) = ctx.into_parts();

        match result {
            Ok(()) => {
                tracing::debug!(
                    blocks = root.children.len(),
                    diagnostics = diagnostics.len(),
                    "parse complete"
                );
                Ok(ParseOutput {
                    root,
                    diagnostics,
                    symbols,
                })
            }
            Err(error) => {
                tracing::debug!(%error, "parse failed");
                diagnostics.push(error.to_diagnostic().with_file(file));
                Err(ParseFailure {
                    error,
                    partial: root,
                    diagnostics,
                })
            }
        }
    }
}

/// Parse `source` with default options.
pub fn parse_script(
    source: &str,
    file: &str,
    registry: &SubParserRegistry,
) -> Result<ParseOutput, ParseFailure> {
    ScriptParser::new(registry).parse(source, file)
}
