//! Read-only traversal of input trees.

use csz_common::limits::{STACK_RED_ZONE, STACK_SEGMENT_SIZE};
use rustc_hash::FxHashSet;

use crate::node::{Block, Node, Parens, Property, Range, is_identifier};

impl Node {
    /// Call `f` on every direct child node.
    pub fn for_each_child<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        match self {
            Node::Block(block) | Node::Parens(Parens { body: block }) => {
                visit_block(block, f);
            }
            Node::Literal(_)
            | Node::PassthroughLiteral(_)
            | Node::Bool(_)
            | Node::Undefined
            | Node::Null
            | Node::Expansion
            | Node::Comment(_) => {}
            Node::Value(value) => {
                f(&value.base);
                for property in &value.properties {
                    match property {
                        Property::Access(_) => {}
                        Property::Index(index) => f(&index.index),
                        Property::Slice(slice) => {
                            visit_range(&slice.range, f);
                        }
                    }
                }
            }
            Node::Call(call) => {
                if let Some(variable) = &call.variable {
                    f(variable);
                }
                call.args.iter().for_each(|arg| f(arg));
            }
            Node::Op(op) => {
                f(&op.first);
                if let Some(second) = &op.second {
                    f(second);
                }
            }
            Node::In(test) => {
                f(&test.object);
                f(&test.array);
            }
            Node::Existence(existence) => f(&existence.expression),
            Node::Assign(assign) => {
                f(&assign.variable);
                f(&assign.value);
            }
            Node::Code(code) => {
                code.params.iter().for_each(|param| f(param));
                visit_block(&code.body, f);
            }
            Node::Param(param) => {
                f(&param.name);
                if let Some(value) = &param.value {
                    f(value);
                }
            }
            Node::Splat(splat) => f(&splat.name),
            Node::Class(class) => {
                if let Some(variable) = &class.variable {
                    f(variable);
                }
                if let Some(parent) = &class.parent {
                    f(parent);
                }
                visit_block(&class.body, f);
            }
            Node::Obj(obj) => obj.properties.iter().for_each(|prop| f(prop)),
            Node::Arr(arr) => arr.objects.iter().for_each(|item| f(item)),
            Node::Range(range) => visit_range(range, f),
            Node::Extends(extends) => {
                f(&extends.child);
                f(&extends.parent);
            }
            Node::If(branch) => {
                f(&branch.condition);
                visit_block(&branch.body, f);
                if let Some(else_body) = &branch.else_body {
                    visit_block(else_body, f);
                }
            }
            Node::While(lp) => {
                if let Some(condition) = &lp.condition {
                    f(condition);
                }
                if let Some(guard) = &lp.guard {
                    f(guard);
                }
                visit_block(&lp.body, f);
            }
            Node::For(lp) => {
                f(&lp.source);
                for binding in [&lp.name, &lp.index, &lp.step, &lp.guard]
                    .into_iter()
                    .flatten()
                {
                    f(binding);
                }
                visit_block(&lp.body, f);
            }
            Node::Switch(switch) => {
                if let Some(subject) = &switch.subject {
                    f(subject);
                }
                for case in &switch.cases {
                    case.conditions.iter().for_each(|cond| f(cond));
                    visit_block(&case.block, f);
                }
                if let Some(otherwise) = &switch.otherwise {
                    visit_block(otherwise, f);
                }
            }
            Node::Try(attempt) => {
                visit_block(&attempt.attempt, f);
                if let Some(error_variable) = &attempt.error_variable {
                    f(error_variable);
                }
                for block in [&attempt.recovery, &attempt.ensure].into_iter().flatten() {
                    visit_block(block, f);
                }
            }
            Node::Throw(throw) => f(&throw.expression),
            Node::Return(ret) => {
                if let Some(expression) = &ret.expression {
                    f(expression);
                }
            }
        }
    }

    /// Every identifier-shaped token in the tree.
    ///
    /// Seeds name generation: a synthesized helper or temporary never takes a
    /// name that appears anywhere in the input.
    pub fn collect_names(&self, names: &mut FxHashSet<String>) {
        if let Node::Literal(literal) = self
            && is_identifier(&literal.value)
        {
            names.insert(literal.value.clone());
        }
        stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT_SIZE, || {
            self.for_each_child(&mut |child| child.collect_names(names));
        });
    }
}

fn visit_block<'a>(block: &'a Block, f: &mut impl FnMut(&'a Node)) {
    block.expressions.iter().for_each(|expr| f(expr));
}

fn visit_range<'a>(range: &'a Range, f: &mut impl FnMut(&'a Node)) {
    if let Some(from) = &range.from {
        f(from);
    }
    if let Some(to) = &range.to {
        f(to);
    }
}

#[cfg(test)]
#[path = "../tests/visit.rs"]
mod tests;
