//! Assignments: plain, compound and splice.

use csz_ast::{Assign, Node, Range};
use csz_common::limits::SLICE_END_SENTINEL;
use csz_common::TranspileResult;

use super::Lowerer;
use super::expressions::integer;
use super::members::trailing_slice;
use super::operators::math;
use crate::classify::literal_int;
use crate::context::MapContext;
use crate::ir::JsNode;

impl Lowerer<'_> {
    pub(super) fn map_assign(
        &mut self,
        assign: &Assign,
        cx: MapContext<'_>,
    ) -> TranspileResult<JsNode> {
        match assign.context.as_deref() {
            None | Some("object") => {}
            Some(operator) => return self.map_compound(operator, assign, cx),
        }
        if let Some((object, range)) = trailing_slice(&assign.variable) {
            return self.map_splice(&Node::Value(object), range, &assign.value, cx);
        }

        self.declare_target(&assign.variable);
        let target = self.map_pattern_target(&assign.variable, cx)?;
        let value = match &*assign.value {
            Node::Class(class) if class.variable.is_none() => {
                let hint = assign.variable.identifier_name();
                self.map_class_expression(class, hint, cx.value())?
            }
            value => self.map_expression(value, cx.value())?,
        };
        Ok(JsNode::assign(target, value))
    }

    /// Bind the names an assignment target introduces before its value is
    /// mapped, so the value sees them (`f = -> f()`).
    fn declare_target(&mut self, target: &Node) {
        match target.unwrapped() {
            Node::Literal(_) => {
                if let Some(name) = target.identifier_name() {
                    self.declare(name);
                }
            }
            Node::Arr(_) | Node::Obj(_) => {
                let mut names = Vec::new();
                pattern_names(target, &mut names);
                for name in names {
                    self.declare(name);
                }
            }
            _ => {}
        }
    }

    fn map_compound(
        &mut self,
        operator: &str,
        assign: &Assign,
        cx: MapContext<'_>,
    ) -> TranspileResult<JsNode> {
        let target = self.map_pattern_target(&assign.variable, cx)?;
        let value = self.map_expression(&assign.value, cx.value())?;
        Ok(match operator {
            "||=" | "&&=" => JsNode::logical(
                target.clone(),
                &operator[..2],
                JsNode::assign(target, value),
            ),
            "?=" => JsNode::conditional(
                JsNode::binary(target.clone(), "!=", JsNode::NullLiteral),
                target.clone(),
                JsNode::assign(target, value),
            ),
            "**=" => JsNode::assign(target.clone(), math("pow", vec![target, value])),
            "//=" => JsNode::assign(
                target.clone(),
                math("floor", vec![JsNode::binary(target, "/", value)]),
            ),
            "%%=" => {
                let modulo = self.modulo(target.clone(), value, false);
                JsNode::assign(target, modulo)
            }
            _ => JsNode::assign_op(target, operator, value),
        })
    }

    /// `xs[a..b] = v` -> `xs.splice(a, b - a + 1, ...v)`
    fn map_splice(
        &mut self,
        object: &Node,
        range: &Range,
        value: &Node,
        cx: MapContext<'_>,
    ) -> TranspileResult<JsNode> {
        let object = self.map_expression(object, cx.value())?;
        let from_literal = range.from.as_deref().map_or(Some(0), literal_int);
        let from = match &range.from {
            Some(from) => self.map_expression(from, cx.value())?,
            None => JsNode::number("0"),
        };
        let inclusive = i64::from(!range.exclusive);
        let count = match &range.to {
            None => JsNode::number(SLICE_END_SENTINEL),
            Some(to) => match (from_literal, literal_int(to)) {
                (Some(start), Some(end)) => integer(end - start + inclusive),
                _ => {
                    let to = self.map_expression(to, cx.value())?;
                    let span = JsNode::binary(to, "-", from.clone());
                    if range.exclusive {
                        span
                    } else {
                        JsNode::binary(span, "+", JsNode::number("1"))
                    }
                }
            },
        };
        let value = self.map_expression(value, cx.value())?;
        Ok(JsNode::method_call(
            object,
            "splice",
            vec![from, count, value.spread()],
        ))
    }
}

/// Identifier names bound by a source destructuring target.
pub(super) fn pattern_names<'n>(node: &'n Node, names: &mut Vec<&'n str>) {
    if let Some(name) = node.identifier_name() {
        names.push(name);
        return;
    }
    match node.unwrapped() {
        Node::Arr(arr) => arr.objects.iter().for_each(|item| pattern_names(item, names)),
        Node::Obj(obj) => {
            for property in &obj.properties {
                match property {
                    Node::Assign(entry) if entry.context.as_deref() == Some("object") => {
                        pattern_names(&entry.value, names);
                    }
                    other => pattern_names(other, names),
                }
            }
        }
        Node::Assign(default) => pattern_names(&default.variable, names),
        Node::Splat(splat) => pattern_names(&splat.name, names),
        Node::Param(param) => pattern_names(&param.name, names),
        _ => {}
    }
}
