//! Input node model for the csz transpiler.
//!
//! The front-end parser hands the engine a tree of typed nodes. This crate
//! models that tree as a closed tagged union (`Node`) so every mapping rule is
//! an exhaustive `match`, and provides:
//! - `Frontend`, the seam between source text and the node tree
//! - `JsonFrontend`, which reads a JSON dump of the front-end's tree
//! - `build`, constructors for assembling trees in code

pub mod node;
pub use node::*;

pub mod frontend;
pub use frontend::{Frontend, JsonFrontend};

pub mod build;

pub mod visit;
