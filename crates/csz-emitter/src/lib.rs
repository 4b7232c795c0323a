//! AST rewriting engine for the csz transpiler.
//!
//! This crate turns an input tree (`csz_ast::Node`) into target source text:
//! - `classify` - picks the mapping rule for a node in expression position
//! - `lowering` - the expression/statement mapper building the target IR
//! - `legacy` - fallback compiler for constructs the mapper delegates
//! - `passes` - structural rewrites over the finished tree
//! - `ir` / `ir_printer` - the target tree and its printer
//! - `pipeline` - the end-to-end entry points

// Rule selection
pub mod classify;

// Per-call mapping context
pub mod context;

// Runtime helper registry
pub mod helpers;

// Target IR and printer
pub mod ir;
pub mod ir_printer;

// Fallback compiler for delegated constructs
pub mod legacy;

// Expression/statement mapper
pub mod lowering;

// Post-passes
pub mod passes;

// End-to-end entry points
pub mod pipeline;
pub use pipeline::{compile, compile_with, lower, transpile, transpile_with};

// Scope tracking and name generation
pub mod scope;

pub use ir::JsNode;
pub use ir_printer::IrPrinter;
pub use legacy::{BuiltinLegacyCompiler, LegacyCompiler};
