//! Implicit returns.
//!
//! The value of a source function is the value of its last expression. The
//! last expression statement in every terminal position becomes a `return`:
//! both arms of an `if`, every `switch` case, and the `try` and `catch`
//! blocks of a `try` (never `finally`). Statements without a value, such as
//! declarations and loops, are left alone.

use crate::ir::JsNode;

pub fn add_implicit_returns(body: &mut [JsNode]) {
    let Some(last) = body
        .iter_mut()
        .rev()
        .find(|statement| !matches!(statement, JsNode::Comment(_)))
    else {
        return;
    };
    match last {
        JsNode::ExpressionStatement(expr) if !matches!(expr.as_ref(), JsNode::Raw(_)) => {
            let value = expr.take();
            *last = JsNode::ret(Some(value));
        }
        JsNode::IfStatement {
            then_branch,
            else_branch,
            ..
        } => {
            add_implicit_returns(then_branch);
            if let Some(else_branch) = else_branch {
                add_implicit_returns(std::slice::from_mut(else_branch.as_mut()));
            }
        }
        JsNode::Block(statements) => add_implicit_returns(statements),
        JsNode::SwitchStatement { cases, .. } => {
            for case in cases {
                add_implicit_returns(&mut case.consequent);
            }
        }
        JsNode::TryStatement { block, handler, .. } => {
            add_implicit_returns(block);
            if let Some(handler) = handler {
                add_implicit_returns(&mut handler.body);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
#[path = "../../tests/returns.rs"]
mod tests;
