//! Common types and utilities for the csz transpiler.
//!
//! This crate provides foundational types used across all csz crates:
//! - Compile options (`CompileOptions`, `QuoteStyle`)
//! - The error taxonomy shared by the front-end, mapper and fallback compiler
//! - Recursion and expansion limits

// Options threaded from the caller down to the printer and fallback compiler
pub mod options;
pub use options::{CompileOptions, QuoteStyle};

// Error taxonomy
pub mod diagnostics;
pub use diagnostics::{TranspileError, TranspileResult};

// Centralized limits and thresholds
pub mod limits;
