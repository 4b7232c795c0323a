//! Declaration insertion and hoisting.
//!
//! Source assignments never declare; the first assignment to a name makes it
//! a local of the enclosing function. This pass decides, for every `=`
//! assignment to a bare name (or a pattern of bare names):
//!
//! - the name is already bound: plain assignment
//! - first binding, statement position: `var name = value;` in place
//! - first binding, nested in an expression: `var name;` hoisted to the top
//!   of the enclosing function body, assignment left in place
//!
//! A name is bound when the current function declares it (parameter, earlier
//! declaration, loop or catch binding), or when an enclosing function
//! declares it or assigns it anywhere in its body. The outer scan is order
//! independent, so a function assigned to `b` that itself assigns `b` does
//! not shadow it:
//!
//! ```javascript
//! var b = function() { b = null; };
//! ```
//!
//! Member targets (`this.x`, `o.x`) are never declared. Temporaries carried
//! by legacy fragments are hoisted like any nested assignment.

use indexmap::IndexSet;
use rustc_hash::FxHashSet;
use csz_common::limits::{STACK_RED_ZONE, STACK_SEGMENT_SIZE};
use tracing::trace;

use crate::ir::{JsClass, JsClassMember, JsNode, JsPropertyKey};

/// Bindings of one function body, loop head or catch clause.
#[derive(Debug, Default)]
struct Frame {
    declared: FxHashSet<String>,
    /// Names assigned anywhere in the body, outside nested functions.
    claimed: FxHashSet<String>,
    /// Pre-declarations to insert at the top of the body, first hoisted first.
    hoisted: IndexSet<String>,
    /// Function-level frame; receives `var` declarations.
    hoisting: bool,
}

impl Frame {
    fn function() -> Self {
        Self {
            hoisting: true,
            ..Self::default()
        }
    }
}

struct Declarations<'o> {
    frames: Vec<Frame>,
    /// Bindings of the code around a detached subtree.
    outer: Option<&'o dyn Fn(&str) -> bool>,
}

#[tracing::instrument(level = "trace", skip_all, fields(statements = program.len()))]
pub fn insert_declarations(program: &mut Vec<JsNode>) {
    let mut pass = Declarations {
        frames: Vec::new(),
        outer: None,
    };
    pass.visit_body(&[], program);
}

/// Declare the locals of every function inside `node`, a subtree that is
/// printed before the program-wide pass runs. `outer` answers whether a name
/// is bound around the subtree; names assigned at the subtree's own level are
/// left to the caller.
pub fn declare_in_functions(node: &mut JsNode, outer: &dyn Fn(&str) -> bool) {
    let mut pass = Declarations {
        frames: vec![Frame::function()],
        outer: Some(outer),
    };
    pass.visit(node);
}

impl Declarations<'_> {
    /// Index of the innermost function-level frame.
    fn function_frame(&self) -> usize {
        self.frames.iter().rposition(|frame| frame.hoisting).unwrap_or(0)
    }

    fn is_bound(&self, name: &str) -> bool {
        let current = self.function_frame();
        let local = self.frames.iter().enumerate().rev().any(|(index, frame)| {
            frame.declared.contains(name) || (index < current && frame.claimed.contains(name))
        });
        local || self.outer.is_some_and(|outer| outer(name))
    }

    /// Bind `name` in the innermost frame (`let`-scoped loop and catch
    /// bindings).
    fn bind(&mut self, name: String) {
        if let Some(frame) = self.frames.last_mut() {
            frame.declared.insert(name);
        }
    }

    /// Bind `name` in the current function.
    fn declare_var(&mut self, name: String) {
        let index = self.function_frame();
        if let Some(frame) = self.frames.get_mut(index) {
            frame.declared.insert(name);
        }
    }

    /// Pre-declare `name` at the top of the current function.
    fn hoist(&mut self, name: String) {
        let index = self.function_frame();
        if let Some(frame) = self.frames.get_mut(index) {
            trace!(name = %name, "[declarations] hoisted");
            frame.declared.insert(name.clone());
            frame.hoisted.insert(name);
        }
    }

    /// Names a statement-position assignment may declare: every target is a
    /// bare, unbound name.
    fn declarable(&self, target: &JsNode) -> Option<Vec<String>> {
        let mut names = Vec::new();
        let has_member = target.pattern_bindings(&mut names);
        let declarable =
            !has_member && !names.is_empty() && names.iter().all(|name| !self.is_bound(name));
        declarable.then_some(names)
    }

    /// Visit a function body in a fresh function frame and insert its
    /// hoisted declarations.
    fn visit_body(&mut self, params: &[JsNode], body: &mut Vec<JsNode>) {
        let mut frame = Frame::function();
        let mut names = Vec::new();
        for param in params {
            param.pattern_bindings(&mut names);
        }
        for statement in body.iter_mut() {
            match statement {
                JsNode::VarDecl { target, .. } => {
                    target.pattern_bindings(&mut names);
                }
                JsNode::ClassDecl(JsClass {
                    name: Some(name), ..
                }) => names.push(name.clone()),
                _ => {}
            }
            collect_claims(statement, &mut frame.claimed);
        }
        frame.declared.extend(names);

        self.frames.push(frame);
        for statement in body.iter_mut() {
            self.visit(statement);
        }
        let Some(frame) = self.frames.pop() else {
            return;
        };
        for name in frame.hoisted {
            body.insert(0, JsNode::var_decl(JsNode::id(name), None));
        }
    }

    fn visit_function(&mut self, params: &mut [JsNode], body: &mut Vec<JsNode>) {
        // Defaults are evaluated in the function's own scope.
        let mut frame = Frame::function();
        let mut names = Vec::new();
        for param in params.iter() {
            param.pattern_bindings(&mut names);
        }
        frame.declared.extend(names);
        self.frames.push(frame);
        for param in params.iter_mut() {
            self.visit(param);
        }
        self.frames.pop();
        self.visit_body(params, body);
    }

    fn visit_class(&mut self, class: &mut JsClass) {
        if let Some(superclass) = &mut class.superclass {
            self.visit(superclass);
        }
        for member in &mut class.members {
            match member {
                JsClassMember::Method {
                    key, params, body, ..
                } => {
                    if let JsPropertyKey::Computed(key) = key {
                        self.visit(key);
                    }
                    self.visit_function(params, body);
                }
                JsClassMember::Field { key, value, .. } => {
                    if let JsPropertyKey::Computed(key) = key {
                        self.visit(key);
                    }
                    self.visit(value);
                }
            }
        }
    }

    /// Visit a nested block scope with `binding`'s names bound in it.
    fn visit_block_scope(&mut self, binding: Option<&mut JsNode>, body: &mut [JsNode]) {
        self.frames.push(Frame::default());
        if let Some(binding) = binding {
            let mut names = Vec::new();
            binding.pattern_bindings(&mut names);
            for name in names {
                self.bind(name);
            }
            self.visit(binding);
        }
        for statement in body {
            self.visit(statement);
        }
        self.frames.pop();
    }

    fn visit(&mut self, node: &mut JsNode) {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT_SIZE, || self.visit_node(node));
    }

    fn visit_node(&mut self, node: &mut JsNode) {
        match node {
            JsNode::ExpressionStatement(expr) => {
                if let JsNode::AssignExpr {
                    target,
                    operator,
                    value,
                } = expr.as_mut()
                    && operator == "="
                    && let Some(names) = self.declarable(target)
                {
                    let target = target.take();
                    let mut value = value.take();
                    for name in names {
                        self.declare_var(name);
                    }
                    self.visit(&mut value);
                    *node = JsNode::var_decl(target, Some(value));
                    return;
                }
                self.visit(expr);
            }
            JsNode::AssignExpr {
                target,
                operator,
                value,
            } => {
                if operator == "=" {
                    let mut names = Vec::new();
                    target.pattern_bindings(&mut names);
                    for name in names {
                        if !self.is_bound(&name) {
                            self.hoist(name);
                        }
                    }
                }
                self.visit(target);
                self.visit(value);
            }
            JsNode::VarDecl {
                target,
                initializer,
            } => {
                let mut names = Vec::new();
                target.pattern_bindings(&mut names);
                for name in names {
                    self.declare_var(name);
                }
                self.visit(target);
                if let Some(initializer) = initializer {
                    self.visit(initializer);
                }
            }
            JsNode::Fragment { temps, .. } => {
                for temp in temps.iter() {
                    if !self.is_bound(temp) {
                        self.hoist(temp.clone());
                    }
                }
            }
            JsNode::FunctionExpr { params, body, .. } | JsNode::ArrowFunction { params, body } => {
                self.visit_function(params, body);
            }
            JsNode::ClassDecl(class) => {
                if let Some(name) = &class.name {
                    self.declare_var(name.clone());
                }
                self.visit_class(class);
            }
            JsNode::ClassExpr(class) => self.visit_class(class),
            JsNode::ForOfStatement {
                binding,
                iterable: source,
                body,
            }
            | JsNode::ForInStatement {
                binding,
                object: source,
                body,
            } => {
                self.visit(source);
                self.visit_block_scope(Some(binding.as_mut()), body);
            }
            JsNode::TryStatement {
                block,
                handler,
                finalizer,
            } => {
                for statement in block.iter_mut() {
                    self.visit(statement);
                }
                if let Some(handler) = handler {
                    self.visit_block_scope(handler.param.as_mut(), &mut handler.body);
                }
                if let Some(finalizer) = finalizer {
                    for statement in finalizer.iter_mut() {
                        self.visit(statement);
                    }
                }
            }
            other => other.for_each_child_mut(&mut |child| self.visit(child)),
        }
    }
}

/// Names assigned or declared in `node` outside nested functions and
/// classes.
fn collect_claims(node: &mut JsNode, claims: &mut FxHashSet<String>) {
    match node {
        JsNode::FunctionExpr { .. }
        | JsNode::ArrowFunction { .. }
        | JsNode::ClassExpr(_)
        | JsNode::ClassDecl(_) => return,
        JsNode::AssignExpr {
            target, operator, ..
        } if operator == "=" => {
            let mut names = Vec::new();
            target.pattern_bindings(&mut names);
            claims.extend(names);
        }
        JsNode::VarDecl { target, .. } => {
            let mut names = Vec::new();
            target.pattern_bindings(&mut names);
            claims.extend(names);
        }
        _ => {}
    }
    node.for_each_child_mut(&mut |child| collect_claims(child, claims));
}

#[cfg(test)]
#[path = "../../tests/declarations.rs"]
mod tests;
