//! Member chains, calls and `super`.

use csz_ast::{Call, Node, Property, Range, Value};
use csz_common::limits::SLICE_END_SENTINEL;
use csz_common::{TranspileError, TranspileResult};

use super::Lowerer;
use super::expressions::integer;
use crate::classify::literal_int;
use crate::context::MapContext;
use crate::ir::JsNode;

impl Lowerer<'_> {
    pub(super) fn map_member_chain(
        &mut self,
        value: &Value,
        cx: MapContext<'_>,
    ) -> TranspileResult<JsNode> {
        let mut object = self.map_expression(&value.base, cx.value())?;
        for property in &value.properties {
            object = self.map_property(object, property, cx)?;
        }
        Ok(object)
    }

    fn map_property(
        &mut self,
        object: JsNode,
        property: &Property,
        cx: MapContext<'_>,
    ) -> TranspileResult<JsNode> {
        Ok(match property {
            Property::Access(access) if access.proto => {
                let prototype = JsNode::prop(object, "prototype");
                if access.name.is_empty() {
                    prototype
                } else {
                    JsNode::prop(prototype, access.name.as_str())
                }
            }
            Property::Access(access) => JsNode::prop(object, access.name.as_str()),
            Property::Index(index) => {
                let index = self.map_expression(&index.index, cx.value())?;
                JsNode::elem(object, index)
            }
            Property::Slice(slice) => {
                let arguments = self.slice_arguments(&slice.range, cx)?;
                JsNode::method_call(object, "slice", arguments)
            }
        })
    }

    /// `xs[a...b]` -> `(a, b)`, `xs[a..b]` -> `(a, b + 1)`.
    ///
    /// An inclusive end that is not a literal becomes `+b + 1 || 9e9`, so an
    /// end of `-1` still slices to the end of the array.
    fn slice_arguments(
        &mut self,
        range: &Range,
        cx: MapContext<'_>,
    ) -> TranspileResult<Vec<JsNode>> {
        let from = match &range.from {
            Some(from) => self.map_expression(from, cx.value())?,
            None => JsNode::number("0"),
        };
        let Some(to) = &range.to else {
            return Ok(vec![from]);
        };
        if range.exclusive {
            return Ok(vec![from, self.map_expression(to, cx.value())?]);
        }
        Ok(match literal_int(to) {
            Some(-1) => vec![from],
            Some(end) => vec![from, integer(end + 1)],
            None => {
                let end = self.map_expression(to, cx.value())?;
                vec![from, inclusive_end(end)]
            }
        })
    }

    pub(super) fn map_call(&mut self, call: &Call, cx: MapContext<'_>) -> TranspileResult<JsNode> {
        let callee = self.map_callee(call, cx)?;
        let arguments = self.map_elements(&call.args, cx)?;
        Ok(JsNode::call(callee, arguments))
    }

    pub(super) fn map_new(&mut self, call: &Call, cx: MapContext<'_>) -> TranspileResult<JsNode> {
        let callee = self.map_callee(call, cx)?;
        let arguments = self.map_elements(&call.args, cx)?;
        Ok(JsNode::new_expr(callee, arguments))
    }

    fn map_callee(&mut self, call: &Call, cx: MapContext<'_>) -> TranspileResult<JsNode> {
        match &call.variable {
            Some(variable) => self.map_expression(variable, cx.value()),
            None => Err(TranspileError::unsupported("Call", "value")),
        }
    }

    /// `super(...)` inside a constructor, `super.<method>(...)` inside any
    /// other method.
    ///
    /// Inside an arrow, forwarding `arguments` would pass the method's
    /// arguments rather than the arrow's, so a bare `super` there is
    /// rejected. Explicit arguments are fine.
    pub(super) fn map_super_call(
        &mut self,
        call: &Call,
        cx: MapContext<'_>,
    ) -> TranspileResult<JsNode> {
        if cx.in_arrow && call.args.iter().any(forwards_arguments) {
            return Err(TranspileError::illegal(
                "cannot forward arguments with super inside a bound function; pass them explicitly",
            ));
        }
        let callee = match cx.method {
            Some("constructor") => JsNode::Super,
            Some(method) => JsNode::prop(JsNode::Super, method),
            None => {
                return Err(TranspileError::illegal(
                    "cannot call super outside of an instance method",
                ));
            }
        };
        let arguments = self.map_elements(&call.args, cx)?;
        Ok(JsNode::call(callee, arguments))
    }
}

/// `arguments...`
fn forwards_arguments(arg: &Node) -> bool {
    matches!(arg, Node::Splat(splat) if splat.name.identifier_name() == Some("arguments"))
}

/// `+end + 1 || 9e9`
pub(super) fn inclusive_end(end: JsNode) -> JsNode {
    JsNode::logical(
        JsNode::binary(JsNode::unary("+", end), "+", JsNode::number("1")),
        "||",
        JsNode::number(SLICE_END_SENTINEL),
    )
}

/// The slice of a member chain whose last link is a slice: the object it
/// applies to and the range.
pub(super) fn trailing_slice(node: &Node) -> Option<(Value, &Range)> {
    let Node::Value(value) = node else {
        return None;
    };
    let Some(Property::Slice(slice)) = value.properties.last() else {
        return None;
    };
    let object = Value {
        base: value.base.clone(),
        properties: value.properties[..value.properties.len() - 1].to_vec(),
        this_shorthand: value.this_shorthand,
    };
    Some((object, &slice.range))
}
