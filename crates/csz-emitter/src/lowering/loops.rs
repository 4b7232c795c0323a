//! Loops and comprehensions.
//!
//! Statement loops become `for…of`, `for…in` or `while` statements. A loop
//! used as a value becomes an array method chain (comprehensions) or a
//! collecting arrow (`while`/`until`/`loop`).

use csz_ast::{For, Node, While};
use csz_common::TranspileResult;

use super::Lowerer;
use crate::context::MapContext;
use crate::ir::JsNode;

impl Lowerer<'_> {
    pub(super) fn map_while_statement(
        &mut self,
        lp: &While,
        cx: MapContext<'_>,
    ) -> TranspileResult<JsNode> {
        let condition = match &lp.condition {
            Some(condition) => self.map_condition(condition, cx)?,
            None => JsNode::BooleanLiteral(true),
        };
        let body = self.map_block(&lp.body, cx)?;
        let body = self.guarded(lp.guard.as_deref(), body, cx)?;
        Ok(JsNode::WhileStatement {
            condition: Box::new(condition),
            body,
        })
    }

    /// `while` used as a value: collect the last value of every iteration.
    pub(super) fn map_while_expression(
        &mut self,
        lp: &While,
        cx: MapContext<'_>,
    ) -> TranspileResult<JsNode> {
        let results = self.names.unused("results");
        self.in_iife(|lowerer| {
            let mut statement = lowerer.map_while_statement(lp, cx)?;
            if let JsNode::WhileStatement { body, .. } = &mut statement {
                push_results(body, &results);
            }
            Ok(vec![
                JsNode::var_decl(JsNode::id(results.clone()), Some(JsNode::ArrayLiteral(Vec::new()))),
                statement,
                JsNode::ret(Some(JsNode::id(results.clone()))),
            ])
        })
    }

    /// Wrap `body` in `if (guard)`.
    fn guarded(
        &mut self,
        guard: Option<&Node>,
        body: Vec<JsNode>,
        cx: MapContext<'_>,
    ) -> TranspileResult<Vec<JsNode>> {
        let Some(guard) = guard else {
            return Ok(body);
        };
        Ok(vec![JsNode::IfStatement {
            condition: Box::new(self.map_condition(guard, cx)?),
            then_branch: body,
            else_branch: None,
        }])
    }

    pub(super) fn map_for_statement(
        &mut self,
        lp: &For,
        cx: MapContext<'_>,
    ) -> TranspileResult<JsNode> {
        let source = self.map_expression(&lp.source, cx.value())?;
        self.scopes.push(false);
        let result = if lp.object {
            self.map_for_of_object(lp, source, cx)
        } else {
            self.map_for_in_array(lp, source, cx)
        };
        self.scopes.pop();
        result
    }

    /// `for x, i in xs` -> `for (let [i, x] of xs.entries())`
    fn map_for_in_array(
        &mut self,
        lp: &For,
        source: JsNode,
        cx: MapContext<'_>,
    ) -> TranspileResult<JsNode> {
        let source = match &lp.step {
            Some(step) => self.stepped(source, step, cx)?,
            None => source,
        };
        let name = self.loop_binding(lp.name.as_deref(), "_", cx)?;
        let (binding, iterable) = match &lp.index {
            Some(index) => {
                let index = self.loop_binding(Some(index), "i", cx)?;
                (
                    JsNode::ArrayPattern(vec![index, name]),
                    JsNode::method_call(source, "entries", Vec::new()),
                )
            }
            None => (name, source),
        };
        let body = self.map_block(&lp.body, cx)?;
        let body = self.guarded(lp.guard.as_deref(), body, cx)?;
        Ok(JsNode::ForOfStatement {
            binding: Box::new(binding),
            iterable: Box::new(iterable),
            body,
        })
    }

    /// `for k of o` -> `for (let k in o)`; `for own k of o` iterates
    /// `Object.keys(o)`; `for k, v of o` iterates `Object.entries(o)`.
    fn map_for_of_object(
        &mut self,
        lp: &For,
        source: JsNode,
        cx: MapContext<'_>,
    ) -> TranspileResult<JsNode> {
        let key = self.loop_binding(lp.index.as_deref(), "key", cx)?;
        let value = match &lp.name {
            Some(name) => Some(self.loop_binding(Some(name), "value", cx)?),
            None => None,
        };
        let body = self.map_block(&lp.body, cx)?;
        let body = self.guarded(lp.guard.as_deref(), body, cx)?;
        Ok(match value {
            Some(value) => JsNode::ForOfStatement {
                binding: Box::new(JsNode::ArrayPattern(vec![key, value])),
                iterable: Box::new(object_call("entries", source)),
                body,
            },
            None if lp.own => JsNode::ForOfStatement {
                binding: Box::new(key),
                iterable: Box::new(object_call("keys", source)),
                body,
            },
            None => JsNode::ForInStatement {
                binding: Box::new(key),
                object: Box::new(source),
                body,
            },
        })
    }

    /// Loop variable, declared in the innermost scope. A missing one gets an
    /// unused placeholder name.
    fn loop_binding(
        &mut self,
        node: Option<&Node>,
        placeholder: &str,
        cx: MapContext<'_>,
    ) -> TranspileResult<JsNode> {
        let binding = match node {
            Some(node) => self.map_pattern_target(node, cx)?,
            None => JsNode::id(self.names.unused(placeholder)),
        };
        let mut names = Vec::new();
        binding.pattern_bindings(&mut names);
        for name in names {
            self.scopes.declare(name);
        }
        Ok(binding)
    }

    /// `xs.filter((_, _i) => { return _i === 0 || _i % (step + 1) === 0; })`
    fn stepped(&mut self, source: JsNode, step: &Node, cx: MapContext<'_>) -> TranspileResult<JsNode> {
        let step = self.map_expression(step, cx.value())?;
        let element = self.names.unused("_");
        let index = self.names.unused("_i");
        let position = || JsNode::id(index.clone());
        let period = JsNode::binary(step, "+", JsNode::number("1"));
        let predicate = JsNode::logical(
            JsNode::binary(position(), "===", JsNode::number("0")),
            "||",
            JsNode::binary(
                JsNode::binary(position(), "%", period),
                "===",
                JsNode::number("0"),
            ),
        );
        Ok(JsNode::method_call(
            source,
            "filter",
            vec![JsNode::arrow(
                vec![JsNode::id(element), position()],
                vec![JsNode::ret(Some(predicate))],
            )],
        ))
    }

    /// `for` used as a value: `source[.filter(step)][.filter(guard)].map(body)`
    pub(super) fn map_comprehension(
        &mut self,
        lp: &For,
        cx: MapContext<'_>,
    ) -> TranspileResult<JsNode> {
        let source = self.map_expression(&lp.source, cx.value())?;
        let source = match (&lp.step, lp.object) {
            (Some(step), false) => self.stepped(source, step, cx)?,
            _ => source,
        };
        let source = match (lp.object, &lp.name) {
            (true, Some(_)) => object_call("entries", source),
            (true, None) => object_call("keys", source),
            (false, _) => source,
        };

        let source = match &lp.guard {
            Some(guard) => {
                let predicate = self.callback(lp, cx, |lowerer| {
                    let guard = lowerer.map_expression(guard, cx.value())?;
                    Ok(vec![JsNode::ret(Some(guard))])
                })?;
                JsNode::method_call(source, "filter", vec![predicate])
            }
            None => source,
        };
        let mapper = self.callback(lp, cx, |lowerer| {
            let mut body = lowerer.map_block(&lp.body, cx.value())?;
            crate::passes::returns::add_implicit_returns(&mut body);
            Ok(body)
        })?;
        Ok(JsNode::method_call(source, "map", vec![mapper]))
    }

    /// Arrow taking the loop variables of a comprehension, in a fresh
    /// function scope.
    fn callback(
        &mut self,
        lp: &For,
        cx: MapContext<'_>,
        body: impl FnOnce(&mut Self) -> TranspileResult<Vec<JsNode>>,
    ) -> TranspileResult<JsNode> {
        self.scopes.push(true);
        let result = self.callback_params(lp, cx).and_then(|params| Ok((params, body(self)?)));
        self.scopes.pop();
        let (params, body) = result?;
        Ok(JsNode::arrow(params, body))
    }

    fn callback_params(&mut self, lp: &For, cx: MapContext<'_>) -> TranspileResult<Vec<JsNode>> {
        if lp.object {
            let key = self.loop_binding(lp.index.as_deref(), "key", cx)?;
            return Ok(match &lp.name {
                Some(name) => {
                    let value = self.loop_binding(Some(name), "value", cx)?;
                    vec![JsNode::ArrayPattern(vec![key, value])]
                }
                None => vec![key],
            });
        }
        let mut params = vec![self.loop_binding(lp.name.as_deref(), "_", cx)?];
        if let Some(index) = &lp.index {
            params.push(self.loop_binding(Some(index), "i", cx)?);
        }
        Ok(params)
    }
}

/// `Object.<function>(source)`
fn object_call(function: &str, source: JsNode) -> JsNode {
    JsNode::method_call(JsNode::id("Object"), function, vec![source])
}

/// Turn the trailing expression of a loop body into `results.push(expr)`,
/// through nested `if` branches.
fn push_results(body: &mut [JsNode], results: &str) {
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
            *last = JsNode::expr_stmt(JsNode::method_call(
                JsNode::id(results),
                "push",
                vec![value],
            ));
        }
        JsNode::IfStatement {
            then_branch,
            else_branch,
            ..
        } => {
            push_results(then_branch, results);
            if let Some(else_branch) = else_branch {
                push_results(std::slice::from_mut(else_branch.as_mut()), results);
            }
        }
        JsNode::Block(statements) => push_results(statements, results),
        _ => {}
    }
}
