//! Destructuring targets.

use csz_ast::{Arr, Node, Obj};
use csz_common::{TranspileError, TranspileResult};

use super::Lowerer;
use crate::context::MapContext;
use crate::ir::{JsNode, JsProperty, JsPropertyKey};

impl Lowerer<'_> {
    /// Map an assignment, parameter or loop target.
    pub(super) fn map_pattern_target(
        &mut self,
        node: &Node,
        cx: MapContext<'_>,
    ) -> TranspileResult<JsNode> {
        match node {
            Node::Assign(default) if default.context.is_none() => {
                let target = self.map_pattern_target(&default.variable, cx)?;
                let default = self.map_expression(&default.value, cx.value())?;
                Ok(JsNode::DefaultPattern {
                    target: Box::new(target),
                    default: Box::new(default),
                })
            }
            Node::Splat(splat) => Ok(JsNode::RestElement(Box::new(
                self.map_pattern_target(&splat.name, cx)?,
            ))),
            other => self.map_expression(other, cx.with_left()),
        }
    }

    pub(super) fn map_array_pattern(
        &mut self,
        arr: &Arr,
        cx: MapContext<'_>,
    ) -> TranspileResult<JsNode> {
        let last = arr.objects.len().saturating_sub(1);
        let mut elements = Vec::with_capacity(arr.objects.len());
        for (i, item) in arr.objects.iter().enumerate() {
            match item {
                Node::Comment(_) => {}
                Node::Splat(_) if i != last => {
                    return Err(TranspileError::unsupported("Splat", "ArrayPatternItem"));
                }
                Node::Expansion if i == last => {}
                Node::Expansion => {
                    return Err(TranspileError::unsupported("Expansion", "ArrayPatternItem"));
                }
                other if is_value_literal(other) => {
                    return Err(TranspileError::unsupported(
                        other.unwrapped().kind(),
                        "ArrayPatternItem",
                    ));
                }
                other => elements.push(self.map_pattern_target(other, cx)?),
            }
        }
        Ok(JsNode::ArrayPattern(elements))
    }

    pub(super) fn map_object_pattern(
        &mut self,
        obj: &Obj,
        cx: MapContext<'_>,
    ) -> TranspileResult<JsNode> {
        let mut properties = Vec::with_capacity(obj.properties.len());
        for property in &obj.properties {
            match property {
                Node::Comment(_) => {}
                Node::Assign(entry) if entry.context.as_deref() == Some("object") => {
                    let key = self.property_key(&entry.variable, cx)?;
                    let value = self.map_pattern_target(&entry.value, cx)?;
                    properties.push(JsProperty::init(key, value));
                }
                Node::Assign(default) if default.context.is_none() => {
                    let value = self.map_pattern_target(property, cx)?;
                    properties.push(self.pattern_entry(&default.variable, value)?);
                }
                Node::Splat(splat) => {
                    let target = self.map_pattern_target(&splat.name, cx)?;
                    properties.push(JsProperty {
                        key: JsPropertyKey::Identifier(String::new()),
                        value: JsNode::RestElement(Box::new(target)),
                        shorthand: true,
                    });
                }
                other => {
                    let value = self.map_pattern_target(other, cx)?;
                    properties.push(self.pattern_entry(other, value)?);
                }
            }
        }
        Ok(JsNode::ObjectPattern(properties))
    }

    /// Entry for a shorthand pattern property: `{a}`, `{a = 1}`, `{@a}`.
    fn pattern_entry(&self, name_node: &Node, value: JsNode) -> TranspileResult<JsProperty> {
        if let Some(name) = name_node.this_member_name() {
            return Ok(JsProperty::init(
                JsPropertyKey::Identifier(name.to_string()),
                value,
            ));
        }
        match name_node.identifier_name() {
            Some(name) => Ok(JsProperty {
                key: JsPropertyKey::Identifier(name.to_string()),
                value,
                shorthand: true,
            }),
            None => Err(TranspileError::unsupported(
                name_node.unwrapped().kind(),
                "ObjectPatternItem",
            )),
        }
    }
}

/// Literal that can never be a binding target.
fn is_value_literal(node: &Node) -> bool {
    match node.unwrapped() {
        Node::Literal(_) => node.identifier_name().is_none() && !node.is_this(),
        Node::Bool(_) | Node::Null | Node::Undefined => true,
        _ => false,
    }
}
