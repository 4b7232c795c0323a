//! `break` insertion for switch cases.
//!
//! Source cases never fall through. Every case except the last gets a
//! trailing `break` unless it is an extra label of a multi-value case or
//! already ends in a `return`, `throw`, `break` or `continue`. Empty and
//! comment-only cases still get one.

use csz_common::limits::{STACK_RED_ZONE, STACK_SEGMENT_SIZE};
use tracing::trace;

use crate::ir::JsNode;

#[tracing::instrument(level = "trace", skip_all, fields(statements = statements.len()))]
pub fn insert_switch_breaks(statements: &mut [JsNode]) {
    for statement in statements {
        insert_switch_breaks_in(statement);
    }
}

/// Insert breaks in every `switch` inside `node`, including `node` itself.
pub fn insert_switch_breaks_in(node: &mut JsNode) {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT_SIZE, || {
        node.for_each_child_mut(&mut |child| insert_switch_breaks_in(child));
    });
    let JsNode::SwitchStatement { cases, .. } = node else {
        return;
    };
    let last = cases.len().saturating_sub(1);
    for case in cases[..last].iter_mut().filter(|case| !case.shares_body) {
        let needs_break = case
            .consequent
            .iter()
            .rev()
            .find(|statement| !matches!(statement, JsNode::Comment(_)))
            .is_none_or(|tail| !tail.is_terminator());
        if needs_break {
            case.consequent.push(JsNode::BreakStatement);
        }
    }
    trace!(cases = cases.len(), "[switch_breaks] switch visited");
}

#[cfg(test)]
#[path = "../../tests/switch_breaks.rs"]
mod tests;
