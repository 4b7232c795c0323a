//! Function literals and parameter lists.
//!
//! A parameter list maps directly when its splat (if any) is last:
//!
//! ```coffee
//! (a, b = 1, rest...) ->
//! ```
//!
//! ```javascript
//! function(a, b = 1, ...rest) {}
//! ```
//!
//! The target has no form for parameters after a rest capture, so a list
//! with a non-final splat or expansion is rewritten to a single rest
//! parameter and positional reads from it:
//!
//! ```coffee
//! (first, middle..., last) ->
//! ```
//!
//! ```javascript
//! function(...args) {
//!   var first = args[0];
//!   var middle = args.slice(1, args.length - 1);
//!   var last = args[args.length - 1];
//! }
//! ```

use csz_ast::{Code, Node, Param};
use csz_common::{TranspileError, TranspileResult};

use super::Lowerer;
use super::expressions::integer;
use crate::context::MapContext;
use crate::ir::JsNode;
use crate::passes::returns::add_implicit_returns;

/// Parameters and body of a mapped function.
pub(super) struct FunctionParts {
    pub params: Vec<JsNode>,
    pub body: Vec<JsNode>,
}

impl Lowerer<'_> {
    pub(super) fn map_function(&mut self, code: &Code, cx: MapContext<'_>) -> TranspileResult<JsNode> {
        // A bound generator is still a `function*`, where `super` is invalid.
        let body_cx = if code.bound && !code.is_generator {
            cx.for_arrow()
        } else {
            cx.for_plain_function()
        };
        let FunctionParts { params, body } = self.map_function_parts(code, body_cx, true)?;
        Ok(match (code.bound, code.is_generator) {
            (true, false) => JsNode::arrow(params, body),
            (true, true) => JsNode::method_call(
                JsNode::FunctionExpr {
                    name: None,
                    params,
                    body,
                    generator: true,
                },
                "bind",
                vec![JsNode::This],
            ),
            (false, generator) => JsNode::FunctionExpr {
                name: None,
                params,
                body,
                generator,
            },
        })
    }

    /// Map parameters and body in a fresh function scope.
    ///
    /// `body_cx` is the context the body is mapped in; implicit returns are
    /// added when `add_returns` is set and the function is not a generator.
    pub(super) fn map_function_parts(
        &mut self,
        code: &Code,
        body_cx: MapContext<'_>,
        add_returns: bool,
    ) -> TranspileResult<FunctionParts> {
        self.scopes.push(true);
        let result = self.map_function_scope(code, body_cx, add_returns && !code.is_generator);
        self.scopes.pop();
        result
    }

    /// Parameter setup (`@name` assignments, tail reads) precedes the body
    /// and never receives the implicit return.
    fn map_function_scope(
        &mut self,
        code: &Code,
        body_cx: MapContext<'_>,
        add_returns: bool,
    ) -> TranspileResult<FunctionParts> {
        let last = code.params.len().saturating_sub(1);
        let needs_tail_rewrite = code.params.iter().enumerate().any(|(i, param)| {
            i != last && matches!(param, Node::Expansion | Node::Param(Param { splat: true, .. }))
        });
        let (params, mut body) = if needs_tail_rewrite {
            self.map_params_from_rest(&code.params, body_cx)?
        } else {
            self.map_params(&code.params, body_cx)?
        };
        let mut statements = self.map_block(&code.body, body_cx)?;
        if add_returns {
            add_implicit_returns(&mut statements);
        }
        body.extend(statements);
        Ok(FunctionParts { params, body })
    }

    /// Parameters in place; `@name` parameters add `this.name = name`.
    fn map_params(
        &mut self,
        nodes: &[Node],
        cx: MapContext<'_>,
    ) -> TranspileResult<(Vec<JsNode>, Vec<JsNode>)> {
        let mut params = Vec::with_capacity(nodes.len());
        let mut setup = Vec::new();
        for node in nodes {
            let param = match node {
                Node::Param(param) => param,
                Node::Expansion => continue,
                other => return Err(TranspileError::unsupported(other.kind(), "Param")),
            };
            let binding = self.param_binding(param, &mut setup, cx)?;
            let binding = match &param.value {
                Some(default) => JsNode::DefaultPattern {
                    target: Box::new(binding),
                    default: Box::new(self.map_expression(default, cx.value())?),
                },
                None => binding,
            };
            params.push(if param.splat {
                JsNode::RestElement(Box::new(binding))
            } else {
                binding
            });
        }
        Ok((params, setup))
    }

    /// Single `...args` parameter with positional reads.
    fn map_params_from_rest(
        &mut self,
        nodes: &[Node],
        cx: MapContext<'_>,
    ) -> TranspileResult<(Vec<JsNode>, Vec<JsNode>)> {
        let args = self.names.unused("args");
        self.scopes.declare(args.as_str());
        let args_node = || JsNode::id(args.clone());
        let length = || JsNode::prop(JsNode::id(args.clone()), "length");

        let splat_at = nodes
            .iter()
            .position(|node| matches!(node, Node::Expansion | Node::Param(Param { splat: true, .. })))
            .unwrap_or(nodes.len());
        let after_splat = nodes.len() - splat_at - 1;

        let mut reads = Vec::new();
        let mut defaults = Vec::new();
        let mut this_setup = Vec::new();
        for (i, node) in nodes.iter().enumerate() {
            let param = match node {
                Node::Param(param) => param,
                Node::Expansion => continue,
                other => return Err(TranspileError::unsupported(other.kind(), "Param")),
            };
            let binding = self.param_binding(param, &mut this_setup, cx)?;
            let read = if i < splat_at {
                JsNode::elem(args_node(), integer(i as i64))
            } else if i == splat_at {
                JsNode::method_call(
                    args_node(),
                    "slice",
                    vec![
                        integer(i as i64),
                        JsNode::binary(length(), "-", integer(after_splat as i64)),
                    ],
                )
            } else {
                let from_end = nodes.len() - i;
                JsNode::elem(
                    args_node(),
                    JsNode::binary(length(), "-", integer(from_end as i64)),
                )
            };
            if let Some(default) = &param.value {
                let default = self.map_expression(default, cx.value())?;
                if binding.as_identifier().is_some() {
                    defaults.push(JsNode::IfStatement {
                        condition: Box::new(JsNode::binary(
                            binding.clone(),
                            "===",
                            JsNode::undefined(),
                        )),
                        then_branch: vec![JsNode::expr_stmt(JsNode::assign(
                            binding.clone(),
                            default,
                        ))],
                        else_branch: None,
                    });
                } else {
                    let fallback = JsNode::conditional(
                        JsNode::binary(read.clone(), "!==", JsNode::undefined()),
                        read,
                        default,
                    );
                    reads.push(JsNode::var_decl(binding, Some(fallback)));
                    continue;
                }
            }
            reads.push(JsNode::var_decl(binding, Some(read)));
        }

        let params = vec![JsNode::RestElement(Box::new(args_node()))];
        reads.extend(defaults);
        reads.extend(this_setup);
        Ok((params, reads))
    }

    /// Binding target of one parameter. Declares its names in the function
    /// scope; an `@name` parameter binds `name` and queues the field
    /// assignment.
    fn param_binding(
        &mut self,
        param: &Param,
        setup: &mut Vec<JsNode>,
        cx: MapContext<'_>,
    ) -> TranspileResult<JsNode> {
        if let Some(name) = param.name.this_member_name() {
            self.scopes.declare(name);
            setup.push(JsNode::expr_stmt(JsNode::assign(
                JsNode::prop(JsNode::This, name),
                JsNode::id(name),
            )));
            return Ok(JsNode::id(name));
        }
        let binding = self.map_pattern_target(&param.name, cx.with_left())?;
        let mut names = Vec::new();
        binding.pattern_bindings(&mut names);
        for name in names {
            self.scopes.declare(name);
        }
        Ok(binding)
    }
}
