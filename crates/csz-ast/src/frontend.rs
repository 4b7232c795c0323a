//! Front-end seam.
//!
//! The engine never parses source text itself; a `Frontend` turns text into
//! an input tree. `JsonFrontend` reads the front-end parser's node tree
//! serialized as JSON, which lets tests and external tooling drive the
//! engine without linking a parser.

use csz_common::{TranspileError, TranspileResult};
use tracing::debug;

use crate::node::{Block, Node};

/// Source text to input tree.
pub trait Frontend {
    fn parse(&self, source: &str) -> TranspileResult<Node>;
}

/// Deserializes a JSON node dump (`{"type": "Block", "expressions": [...]}`).
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonFrontend;

impl Frontend for JsonFrontend {
    fn parse(&self, source: &str) -> TranspileResult<Node> {
        let node: Node = serde_json::from_str(source)
            .map_err(|err| TranspileError::frontend(err.to_string()))?;
        debug!(root = node.kind(), "parsed json node dump");
        Ok(into_program(node))
    }
}

impl<F> Frontend for F
where
    F: Fn(&str) -> TranspileResult<Node>,
{
    fn parse(&self, source: &str) -> TranspileResult<Node> {
        self(source)
    }
}

/// The program root is always a block; a bare expression dump is wrapped.
pub fn into_program(node: Node) -> Node {
    match node {
        Node::Block(_) => node,
        other => Node::Block(Block::new(vec![other])),
    }
}

#[cfg(test)]
#[path = "../tests/frontend.rs"]
mod tests;
