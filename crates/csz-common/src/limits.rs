//! Centralized limits and thresholds for the transpiler.
//!
//! Recursion limits keep a hostile or machine-generated input tree from
//! overflowing the stack; expansion limits bound how much literal output a
//! single source construct may produce.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum nesting depth of input nodes the mapper will descend into.
///
/// Every nested expression or block adds frames to the call stack of the
/// mutually recursive expression/statement mappers. Past this depth the
/// compilation aborts with `TranspileError::DepthLimit`.
///
/// ```coffee
/// x = ((((((((((((((((((((1))))))))))))))))))))  # ... 500 levels ...
/// ```
///
/// Unoptimised builds spend tens of kilobytes of stack per level, more than
/// a 2 MiB thread has room for at this depth. The input scan, mappers,
/// passes and printer therefore grow the stack on demand (see
/// [`STACK_RED_ZONE`]), so the limit holds on any thread.
pub const MAX_AST_DEPTH: u32 = 500;

/// Remaining stack below which a recursive walk switches to a new segment.
pub const STACK_RED_ZONE: usize = 256 * 1024;

/// Size of each stack segment allocated once the red zone is reached.
pub const STACK_SEGMENT_SIZE: usize = 4 * 1024 * 1024;

// =============================================================================
// Expansion Limits
// =============================================================================

/// Largest literal range that is expanded into an array literal.
///
/// `[1...10]` becomes `[1, 2, 3, 4, 5, 6, 7, 8, 9]`. Ranges whose literal
/// bounds span more elements than this are compiled through the fallback
/// compiler's collecting closure instead, the same threshold the legacy
/// compiler uses for inlining.
pub const MAX_RANGE_EXPANSION: i64 = 20;

/// Sentinel upper bound used for inclusive slices with a dynamic end.
///
/// `xs[a..b]` compiles to `xs.slice(a, +b + 1 || 9e9)`: when `b` is `-1` the
/// sum is `0`, which is falsy, and the slice runs to the end.
pub const SLICE_END_SENTINEL: &str = "9e9";
