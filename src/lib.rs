//! csz: transpile a CoffeeScript node tree into JavaScript source.
//!
//! ```no_run
//! let js = csz::compile(r#"{"type": "Block", "expressions": []}"#, &csz::CompileOptions::default())?;
//! # Ok::<(), csz::TranspileError>(())
//! ```
//!
//! The member crates are re-exported as modules for callers that need the
//! node model, the target IR or a custom fallback compiler.

// Common types - options, errors, limits
pub use csz_common as common;
pub use csz_common::limits;
pub use csz_common::{CompileOptions, QuoteStyle, TranspileError, TranspileResult};

// Input node model and front-ends
pub use csz_ast as ast;
pub use csz_ast::{Frontend, JsonFrontend, Node};

// Rewriting engine, IR and printer
pub use csz_emitter as emitter;
pub use csz_emitter::{
    BuiltinLegacyCompiler, IrPrinter, JsNode, LegacyCompiler, compile, compile_with, lower,
    transpile, transpile_with,
};
