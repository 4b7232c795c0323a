//! Operators, membership tests and existence checks.
//!
//! Most operators map one to one. The rewritten ones:
//!
//! | source | target |
//! |---|---|
//! | `a ** b` | `Math.pow(a, b)` |
//! | `a // b` | `Math.floor(a / b)` |
//! | `a %% b` | `(a % b + b) % b`, or the `modulo` helper |
//! | `a < b < c` | `a < b && b < c` |
//! | `a in xs` | `xs.includes(a)` |
//! | `a?` | `typeof a !== "undefined" && a !== null` |

use csz_ast::{In, Node, Op};
use csz_common::{TranspileError, TranspileResult};

use super::Lowerer;
use crate::context::MapContext;
use crate::helpers::Helper;
use crate::ir::JsNode;

/// Source aliases for target operators.
fn normalize(operator: &str) -> &str {
    match operator {
        "is" | "==" => "===",
        "isnt" | "!=" => "!==",
        "and" => "&&",
        "or" => "||",
        other => other,
    }
}

fn is_chainable(operator: &str) -> bool {
    matches!(operator, "<" | ">" | "<=" | ">=" | "===" | "!==")
}

/// The comparison `node` when it is itself a chainable comparison, i.e. the
/// left part of `a < b < c`.
fn chained_comparison(node: &Node) -> Option<(&Op, &str)> {
    match node {
        Node::Op(op) if op.second.is_some() && is_chainable(normalize(&op.operator)) => {
            Some((op, normalize(&op.operator)))
        }
        _ => None,
    }
}

fn is_modulo(node: &Node) -> Option<&Op> {
    match node.unwrapped() {
        Node::Op(op) if op.operator == "%%" && op.second.is_some() => Some(op),
        _ => None,
    }
}

/// `Math.<function>(args)`
pub(super) fn math(function: &str, args: Vec<JsNode>) -> JsNode {
    JsNode::method_call(JsNode::id("Math"), function, args)
}

impl Lowerer<'_> {
    pub(super) fn map_operator(&mut self, op: &Op, cx: MapContext<'_>) -> TranspileResult<JsNode> {
        match &op.second {
            None => self.map_unary(op, cx),
            Some(second) => self.map_binary(op, second, cx),
        }
    }

    fn map_unary(&mut self, op: &Op, cx: MapContext<'_>) -> TranspileResult<JsNode> {
        let operand = self.map_expression(&op.first, cx.value())?;
        Ok(match op.operator.as_str() {
            "++" | "--" => JsNode::UpdateExpr {
                operator: op.operator.clone(),
                operand: Box::new(operand),
                prefix: !op.flip,
            },
            "!" | "not" => JsNode::not(operand),
            "-" | "+" | "~" | "typeof" | "delete" | "void" | "await" => {
                JsNode::unary(op.operator.as_str(), operand)
            }
            "new" => match operand {
                JsNode::CallExpr { callee, arguments } => JsNode::NewExpr { callee, arguments },
                other => JsNode::new_expr(other, Vec::new()),
            },
            "yield" => JsNode::YieldExpr {
                argument: Some(Box::new(operand)),
                delegate: false,
            },
            "yield*" | "yieldfrom" | "yield from" => JsNode::YieldExpr {
                argument: Some(Box::new(operand)),
                delegate: true,
            },
            _ => return Err(TranspileError::unsupported("Op", "Expression")),
        })
    }

    fn map_binary(
        &mut self,
        op: &Op,
        second: &Node,
        cx: MapContext<'_>,
    ) -> TranspileResult<JsNode> {
        let operator = normalize(&op.operator);
        if is_chainable(operator) && chained_comparison(&op.first).is_some() {
            let (chain, _) = self.map_comparison(op, operator, second, false, cx)?;
            return Ok(chain);
        }
        if operator == "%%" {
            return self.map_modulo(op, second, false, cx);
        }

        let left = self.map_expression(&op.first, cx.value())?;
        let right = self.map_expression(second, cx.value())?;
        Ok(match operator {
            "&&" | "||" => JsNode::logical(left, operator, right),
            "**" => math("pow", vec![left, right]),
            "//" => math("floor", vec![JsNode::binary(left, "/", right)]),
            "!instanceof" => JsNode::not(JsNode::binary(left, "instanceof", right)),
            "!in" => JsNode::not(JsNode::binary(left, "in", right)),
            _ => JsNode::binary(left, operator, right),
        })
    }

    /// `a < b < c` -> `a < b && b < c`.
    ///
    /// With `share_right`, the right operand is also the left operand of the
    /// next comparison in the chain; a non-simple one is evaluated once into
    /// a temporary. Returns the chain and the shared operand.
    fn map_comparison(
        &mut self,
        op: &Op,
        operator: &str,
        second: &Node,
        share_right: bool,
        cx: MapContext<'_>,
    ) -> TranspileResult<(JsNode, Option<JsNode>)> {
        let (prefix, left) = match chained_comparison(&op.first) {
            Some((inner, inner_operator)) => {
                let inner_second = inner
                    .second
                    .as_deref()
                    .ok_or_else(|| TranspileError::unsupported("Op", "Expression"))?;
                let (chain, shared) =
                    self.map_comparison(inner, inner_operator, inner_second, true, cx)?;
                let shared =
                    shared.ok_or_else(|| TranspileError::unsupported("Op", "Expression"))?;
                (Some(chain), shared)
            }
            None => (None, self.map_expression(&op.first, cx.value())?),
        };

        let right = self.map_expression(second, cx.value())?;
        let (right, shared) = if !share_right {
            (right, None)
        } else if right.is_simple() {
            let shared = right.clone();
            (right, Some(shared))
        } else {
            let temp = self.fresh("ref");
            (JsNode::assign(JsNode::id(temp.clone()), right), Some(JsNode::id(temp)))
        };

        let comparison = JsNode::binary(left, operator, right);
        let chain = match prefix {
            Some(chain) => JsNode::logical(chain, "&&", comparison),
            None => comparison,
        };
        Ok((chain, shared))
    }

    /// Floored modulo. A single `%%` with a simple divisor is inlined; chains
    /// and complex divisors call the helper, which evaluates each operand
    /// once.
    fn map_modulo(
        &mut self,
        op: &Op,
        second: &Node,
        in_chain: bool,
        cx: MapContext<'_>,
    ) -> TranspileResult<JsNode> {
        let chained = in_chain || is_modulo(&op.first).is_some() || is_modulo(second).is_some();
        let left = self.map_modulo_operand(&op.first, chained, cx)?;
        let right = self.map_modulo_operand(second, chained, cx)?;
        Ok(self.modulo(left, right, chained))
    }

    fn map_modulo_operand(
        &mut self,
        node: &Node,
        chained: bool,
        cx: MapContext<'_>,
    ) -> TranspileResult<JsNode> {
        match is_modulo(node) {
            Some(inner) if chained => {
                let second = inner
                    .second
                    .as_deref()
                    .ok_or_else(|| TranspileError::unsupported("Op", "Expression"))?;
                self.map_modulo(inner, second, true, cx)
            }
            _ => self.map_expression(node, cx.value()),
        }
    }

    pub(super) fn modulo(&mut self, left: JsNode, right: JsNode, force_helper: bool) -> JsNode {
        if !force_helper && right.is_simple() {
            let remainder = JsNode::binary(left, "%", right.clone());
            let shifted = JsNode::binary(remainder, "+", right.clone());
            return JsNode::binary(shifted, "%", right);
        }
        let helper = self.require_helper(Helper::Modulo);
        JsNode::call(JsNode::id(helper), vec![left, right])
    }

    /// `a in xs` -> `xs.includes(a)`
    pub(super) fn map_membership(
        &mut self,
        test: &In,
        cx: MapContext<'_>,
    ) -> TranspileResult<JsNode> {
        let needle = self.map_expression(&test.object, cx.value())?;
        let haystack = self.map_expression(&test.array, cx.value())?;
        let includes = JsNode::method_call(haystack, "includes", vec![needle]);
        Ok(if test.negated {
            JsNode::not(includes)
        } else {
            includes
        })
    }

    /// `x?` over a plain expression.
    pub(super) fn map_existence(
        &mut self,
        expression: &Node,
        cx: MapContext<'_>,
    ) -> TranspileResult<JsNode> {
        if let Some(name) = expression.identifier_name()
            && !self.is_bound(name)
        {
            return Ok(JsNode::logical(
                JsNode::binary(
                    JsNode::unary("typeof", JsNode::id(name)),
                    "!==",
                    JsNode::string("undefined"),
                ),
                "&&",
                JsNode::binary(JsNode::id(name), "!==", JsNode::NullLiteral),
            ));
        }
        let value = self.map_expression(expression, cx.value())?;
        Ok(JsNode::binary(value, "!=", JsNode::NullLiteral))
    }
}
