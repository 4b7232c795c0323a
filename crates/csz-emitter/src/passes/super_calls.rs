//! `super` calls for derived constructors.
//!
//! A derived class constructor must call `super(...)` before it touches
//! `this`; source constructors may leave the call out. A derived
//! constructor without one gets `super(...arguments);` as its first
//! statement.

use csz_common::limits::{STACK_RED_ZONE, STACK_SEGMENT_SIZE};
use tracing::debug;

use crate::ir::{JsClass, JsNode};

#[tracing::instrument(level = "trace", skip_all)]
pub fn insert_super_calls(statements: &mut [JsNode]) {
    for statement in statements {
        visit(statement);
    }
}

fn visit(node: &mut JsNode) {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT_SIZE, || {
        node.for_each_child_mut(&mut |child| visit(child));
    });
    if let JsNode::ClassDecl(class) | JsNode::ClassExpr(class) = node {
        insert_super_call(class);
    }
}

fn insert_super_call(class: &mut JsClass) {
    if class.superclass.is_none() {
        return;
    }
    let name = class.name.clone();
    let Some(body) = class.constructor_mut() else {
        return;
    };
    if body.iter_mut().any(contains_super_call) {
        return;
    }
    debug!(class = ?name, "[super_calls] inserted super call");
    body.insert(
        0,
        JsNode::expr_stmt(JsNode::call(
            JsNode::Super,
            vec![JsNode::id("arguments").spread()],
        )),
    );
}

/// True when `node` calls `super(...)` outside nested functions and
/// classes.
pub fn contains_super_call(node: &mut JsNode) -> bool {
    match node {
        JsNode::CallExpr { callee, .. } if matches!(callee.as_ref(), JsNode::Super) => true,
        JsNode::FunctionExpr { .. } | JsNode::ClassExpr(_) | JsNode::ClassDecl(_) => false,
        other => {
            let mut found = false;
            other.for_each_child_mut(&mut |child| {
                if !found {
                    found = contains_super_call(child);
                }
            });
            found
        }
    }
}

#[cfg(test)]
#[path = "../../tests/super_calls.rs"]
mod tests;
