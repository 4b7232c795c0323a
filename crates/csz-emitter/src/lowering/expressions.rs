//! Expression position: rule dispatch and the structural literals.

use csz_ast::{Arr, Block, Node, Obj};
use csz_common::{TranspileError, TranspileResult};

use super::Lowerer;
use crate::classify::{LiteralKind, Rule, classify, literal_kind};
use crate::context::MapContext;
use crate::ir::{JsNode, JsProperty, JsPropertyKey};

impl Lowerer<'_> {
    pub(super) fn map_expression_inner(
        &mut self,
        node: &Node,
        cx: MapContext<'_>,
    ) -> TranspileResult<JsNode> {
        match classify(node, &cx)? {
            Rule::Fallback(reason) => self.fallback(node, reason, cx),
            Rule::MemberChain(value) => self.map_member_chain(value, cx),
            Rule::Literal(raw) => Ok(self.map_literal(raw)),
            Rule::Bool(val) => Ok(JsNode::BooleanLiteral(matches!(val, "true" | "yes" | "on"))),
            Rule::Undefined => Ok(JsNode::undefined()),
            Rule::Null => Ok(JsNode::NullLiteral),
            Rule::Range {
                from,
                to,
                exclusive,
            } => Ok(expand_range(from, to, exclusive)),
            Rule::Call(call) => self.map_call(call, cx),
            Rule::New(call) => self.map_new(call, cx),
            Rule::SuperCall(call) => self.map_super_call(call, cx),
            Rule::ArrayPattern(arr) => self.map_array_pattern(arr, cx),
            Rule::ObjectPattern(obj) => self.map_object_pattern(obj, cx),
            Rule::Array(arr) => self.map_array(arr, cx),
            Rule::Object(obj) => self.map_object(obj, cx),
            Rule::Parens(block) => self.map_parens(block, cx),
            Rule::Operator(op) => self.map_operator(op, cx),
            Rule::Membership(test) => self.map_membership(test, cx),
            Rule::Existence(expression) => self.map_existence(expression, cx),
            Rule::Assign(assign) => self.map_assign(assign, cx),
            Rule::Function(code) => self.map_function(code, cx),
            Rule::Class(class) => self.map_class_expression(class, None, cx),
            Rule::Conditional(branch) => self.map_conditional_expression(branch, cx),
            Rule::Try(_) | Rule::Switch(_) => {
                self.in_iife(|lowerer| Ok(lowerer.map_statement(node, cx.value())?.into_vec()))
            }
            Rule::Comprehension(lp) => self.map_comprehension(lp, cx),
            Rule::WhileExpression(lp) => self.map_while_expression(lp, cx),
            Rule::Splat(inner) => Ok(self.map_expression(inner, cx.value())?.spread()),
            Rule::Passthrough(code) => Ok(JsNode::Raw(code.to_string())),
            Rule::Throw(throw) => {
                let argument = self.map_expression(&throw.expression, cx.value())?;
                Ok(JsNode::iife(vec![JsNode::ThrowStatement(Box::new(argument))]))
            }
        }
    }

    /// Call arguments and array elements: splats become spread elements.
    pub(super) fn map_elements(
        &mut self,
        nodes: &[Node],
        cx: MapContext<'_>,
    ) -> TranspileResult<Vec<JsNode>> {
        let mut elements = Vec::with_capacity(nodes.len());
        for node in nodes {
            match node {
                Node::Comment(_) => {}
                Node::Expansion => return Err(TranspileError::unsupported("Expansion", "value")),
                other => elements.push(self.map_expression(other, cx.value())?),
            }
        }
        Ok(elements)
    }

    fn map_array(&mut self, arr: &Arr, cx: MapContext<'_>) -> TranspileResult<JsNode> {
        Ok(JsNode::ArrayLiteral(self.map_elements(&arr.objects, cx)?))
    }

    fn map_object(&mut self, obj: &Obj, cx: MapContext<'_>) -> TranspileResult<JsNode> {
        let mut properties = Vec::with_capacity(obj.properties.len());
        for property in &obj.properties {
            match property {
                Node::Comment(_) => {}
                Node::Assign(entry) if entry.context.as_deref() == Some("object") => {
                    let key = self.property_key(&entry.variable, cx)?;
                    let value = self.map_expression(&entry.value, cx.value())?;
                    properties.push(JsProperty::init(key, value));
                }
                Node::Splat(splat) => {
                    let value = self.map_expression(&splat.name, cx.value())?;
                    properties.push(JsProperty {
                        key: JsPropertyKey::Identifier(String::new()),
                        value: value.spread(),
                        shorthand: true,
                    });
                }
                other => {
                    if let Some(name) = other.this_member_name() {
                        properties.push(JsProperty::init(
                            JsPropertyKey::Identifier(name.to_string()),
                            JsNode::prop(JsNode::This, name),
                        ));
                    } else if let Some(name) = other.identifier_name() {
                        properties.push(JsProperty::shorthand(name));
                    } else {
                        return Err(TranspileError::unsupported(
                            other.unwrapped().kind(),
                            "ObjectProperty",
                        ));
                    }
                }
            }
        }
        Ok(JsNode::ObjectLiteral(properties))
    }

    /// Key of an object entry, object pattern entry or class member.
    pub(super) fn property_key(
        &mut self,
        node: &Node,
        cx: MapContext<'_>,
    ) -> TranspileResult<JsPropertyKey> {
        if let Some(raw) = node.literal_text() {
            match literal_kind(raw) {
                LiteralKind::Identifier | LiteralKind::NaN | LiteralKind::This => {
                    return Ok(JsPropertyKey::Identifier(raw.to_string()));
                }
                LiteralKind::String => return Ok(JsPropertyKey::StringLiteral(string_body(raw))),
                LiteralKind::Number => return Ok(JsPropertyKey::NumericLiteral(raw.to_string())),
                LiteralKind::Regex | LiteralKind::StatementKeyword => {}
            }
        }
        let key = self.map_expression(node, cx.value())?;
        Ok(JsPropertyKey::Computed(Box::new(key)))
    }

    /// Source parentheses are kept unless the content never needs them.
    fn map_parens(&mut self, block: &Block, cx: MapContext<'_>) -> TranspileResult<JsNode> {
        match block.expressions.as_slice() {
            [] => Ok(JsNode::undefined()),
            [only] => {
                let inner = self.map_expression(only, cx.value())?;
                if inner.is_simple()
                    || matches!(
                        inner,
                        JsNode::ConditionalExpr { .. } | JsNode::Parenthesized(_)
                    )
                {
                    Ok(inner)
                } else {
                    Ok(inner.paren())
                }
            }
            expressions => {
                let mut items = Vec::with_capacity(expressions.len());
                for expression in expressions {
                    items.push(self.map_expression(expression, cx.value())?);
                }
                Ok(JsNode::CommaExpr(items).paren())
            }
        }
    }
}

/// `[from..to]` / `[from...to]` with literal bounds, counting down when
/// `from > to`.
fn expand_range(from: i64, to: i64, exclusive: bool) -> JsNode {
    let values: Vec<i64> = match (from <= to, exclusive) {
        (true, true) => (from..to).collect(),
        (true, false) => (from..=to).collect(),
        (false, true) => ((to + 1)..=from).rev().collect(),
        (false, false) => (to..=from).rev().collect(),
    };
    JsNode::ArrayLiteral(values.into_iter().map(integer).collect())
}

pub(super) fn integer(value: i64) -> JsNode {
    if value < 0 {
        JsNode::unary("-", JsNode::number(value.unsigned_abs().to_string()))
    } else {
        JsNode::number(value.to_string())
    }
}

/// Body of a quoted string token with quote escapes removed; the printer
/// re-quotes it in the configured style.
pub(super) fn string_body(raw: &str) -> String {
    let inner = raw
        .get(1..raw.len().saturating_sub(1))
        .unwrap_or_default();
    let mut body = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            body.push(c);
            continue;
        }
        match chars.next() {
            Some(quote @ ('\'' | '"')) => body.push(quote),
            Some(escaped) => {
                body.push('\\');
                body.push(escaped);
            }
            None => body.push('\\'),
        }
    }
    body
}
