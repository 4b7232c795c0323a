//! Statement position.

use smallvec::smallvec;

use csz_ast::{Block, If, Node, Switch, Try};
use csz_common::TranspileResult;

use super::{Lowerer, Statements};
use crate::context::MapContext;
use crate::ir::{JsCatchClause, JsNode, JsSwitchCase};

/// Nodes that have no expression form and force an `if` into statement
/// form.
fn is_statement_only(node: &Node) -> bool {
    match node {
        Node::If(_)
        | Node::Return(_)
        | Node::Throw(_)
        | Node::For(_)
        | Node::While(_)
        | Node::Switch(_)
        | Node::Try(_)
        | Node::Comment(_) => true,
        Node::Class(class) => class.variable.is_some(),
        other => other.is_statement_keyword(),
    }
}

/// One-expression branch that maps to an expression without a wrapper.
fn is_expression_branch(block: &Block) -> bool {
    block.single().is_some_and(|only| !is_statement_only(only))
}

/// The `if` of a one-expression else branch: `else if`.
fn else_if(block: &Block) -> Option<&If> {
    match block.single() {
        Some(Node::If(branch)) => Some(branch),
        _ => None,
    }
}

/// Conditions print inside their own parentheses.
fn strip_parens(node: JsNode) -> JsNode {
    match node {
        JsNode::Parenthesized(inner) => *inner,
        other => other,
    }
}

impl Lowerer<'_> {
    pub(super) fn map_statement_inner(
        &mut self,
        node: &Node,
        cx: MapContext<'_>,
    ) -> TranspileResult<Statements> {
        if let Some(keyword) = node.literal_text().filter(|_| node.is_statement_keyword()) {
            return Ok(smallvec![match keyword {
                "break" => JsNode::BreakStatement,
                "continue" => JsNode::ContinueStatement,
                _ => JsNode::DebuggerStatement,
            }]);
        }
        let statement = match node {
            Node::Block(block) => return Ok(self.map_block(block, cx)?.into()),
            Node::Return(ret) => {
                let argument = match &ret.expression {
                    Some(expression) => Some(self.map_expression(expression, cx.value())?),
                    None => None,
                };
                JsNode::ret(argument)
            }
            Node::Throw(throw) => {
                JsNode::ThrowStatement(Box::new(self.map_expression(&throw.expression, cx.value())?))
            }
            Node::Comment(comment) => JsNode::Comment(comment.comment.clone()),
            Node::If(branch) => self.map_if_statement(branch, cx)?,
            Node::Switch(switch) => self.map_switch_statement(switch, cx)?,
            Node::Try(attempt) => self.map_try_statement(attempt, cx)?,
            Node::While(lp) => self.map_while_statement(lp, cx)?,
            Node::For(lp) => self.map_for_statement(lp, cx)?,
            Node::Class(class) if class.variable.is_some() => {
                return self.map_class_statement(class, cx);
            }
            Node::PassthroughLiteral(literal) => JsNode::expr_stmt(JsNode::Raw(literal.value.clone())),
            other => JsNode::expr_stmt(self.map_expression(other, cx.value())?),
        };
        Ok(smallvec![statement])
    }

    /// Condition of an `if`, `while` or `switch`.
    pub(super) fn map_condition(
        &mut self,
        node: &Node,
        cx: MapContext<'_>,
    ) -> TranspileResult<JsNode> {
        Ok(strip_parens(self.map_expression(node, cx.value())?))
    }

    /// `if` in statement position: a ternary statement when both branches are
    /// single expressions, a full `if` statement otherwise.
    fn map_if_statement(&mut self, branch: &If, cx: MapContext<'_>) -> TranspileResult<JsNode> {
        let simple = is_expression_branch(&branch.body)
            && branch.else_body.as_ref().is_none_or(is_expression_branch);
        if simple {
            return Ok(JsNode::expr_stmt(self.map_conditional(branch, cx)?));
        }
        self.map_if_full(branch, cx)
    }

    fn map_if_full(&mut self, branch: &If, cx: MapContext<'_>) -> TranspileResult<JsNode> {
        let condition = self.map_condition(&branch.condition, cx)?;
        let then_branch = self.map_block(&branch.body, cx)?;
        let else_branch = match &branch.else_body {
            None => None,
            Some(block) => Some(Box::new(match else_if(block) {
                Some(nested) => self.map_if_full(nested, cx)?,
                None => JsNode::Block(self.map_block(block, cx)?),
            })),
        };
        Ok(JsNode::IfStatement {
            condition: Box::new(condition),
            then_branch,
            else_branch,
        })
    }

    /// `(cond ? a : b)` for single-expression branches.
    fn map_conditional(&mut self, branch: &If, cx: MapContext<'_>) -> TranspileResult<JsNode> {
        let condition = self.map_condition(&branch.condition, cx)?;
        let when_true = self.map_block_value(&branch.body, cx)?;
        let when_false = match &branch.else_body {
            Some(block) => self.map_block_value(block, cx)?,
            None => JsNode::undefined(),
        };
        Ok(JsNode::conditional(condition, when_true, when_false))
    }

    /// `if` in expression position. Branches that are not a single
    /// expression (or that are themselves `if`s) go through an immediately
    /// invoked arrow around the statement form.
    pub(super) fn map_conditional_expression(
        &mut self,
        branch: &If,
        cx: MapContext<'_>,
    ) -> TranspileResult<JsNode> {
        let compound = |block: &Block| match block.single() {
            Some(only) => {
                matches!(only, Node::If(_) | Node::Return(_) | Node::Comment(_))
                    || only.is_statement_keyword()
            }
            None => true,
        };
        let needs_iife =
            compound(&branch.body) || branch.else_body.as_ref().is_some_and(compound);
        if needs_iife {
            return self.in_iife(|lowerer| Ok(vec![lowerer.map_if_full(branch, cx)?]));
        }
        self.map_conditional(branch, cx)
    }

    /// Cases map one to one; a case with several values becomes consecutive
    /// empty labels sharing the last one's body. Without a subject every
    /// test is negated under `switch (false)`.
    fn map_switch_statement(
        &mut self,
        switch: &Switch,
        cx: MapContext<'_>,
    ) -> TranspileResult<JsNode> {
        let discriminant = match &switch.subject {
            Some(subject) => self.map_condition(subject, cx)?,
            None => JsNode::BooleanLiteral(false),
        };
        let mut cases = Vec::with_capacity(switch.cases.len() + 1);
        for case in &switch.cases {
            let last = case.conditions.len().saturating_sub(1);
            for (i, condition) in case.conditions.iter().enumerate() {
                let test = self.map_expression(condition, cx.value())?;
                let test = if switch.subject.is_some() {
                    test
                } else {
                    JsNode::not(test)
                };
                let consequent = if i == last {
                    self.map_block(&case.block, cx)?
                } else {
                    Vec::new()
                };
                cases.push(JsSwitchCase {
                    test: Some(test),
                    consequent,
                    shares_body: i != last,
                });
            }
        }
        if let Some(otherwise) = &switch.otherwise {
            cases.push(JsSwitchCase {
                test: None,
                consequent: self.map_block(otherwise, cx)?,
                shares_body: false,
            });
        }
        Ok(JsNode::SwitchStatement {
            discriminant: Box::new(discriminant),
            cases,
        })
    }

    /// A `try` with neither `catch` nor `finally` swallows the error with an
    /// empty optional-binding `catch`.
    fn map_try_statement(&mut self, attempt: &Try, cx: MapContext<'_>) -> TranspileResult<JsNode> {
        let block = self.map_block(&attempt.attempt, cx)?;
        let handler = if attempt.recovery.is_some() || attempt.error_variable.is_some() {
            self.scopes.push(false);
            let handler = self.map_catch(attempt, cx);
            self.scopes.pop();
            Some(Box::new(handler?))
        } else if attempt.ensure.is_none() {
            Some(Box::new(JsCatchClause {
                param: None,
                body: Vec::new(),
            }))
        } else {
            None
        };
        let finalizer = match &attempt.ensure {
            Some(ensure) => Some(self.map_block(ensure, cx)?),
            None => None,
        };
        Ok(JsNode::TryStatement {
            block,
            handler,
            finalizer,
        })
    }

    fn map_catch(&mut self, attempt: &Try, cx: MapContext<'_>) -> TranspileResult<JsCatchClause> {
        let param = match &attempt.error_variable {
            Some(variable) => {
                let param = self.map_pattern_target(variable, cx)?;
                let mut names = Vec::new();
                param.pattern_bindings(&mut names);
                for name in names {
                    self.scopes.declare(name);
                }
                Some(param)
            }
            None => None,
        };
        let body = match &attempt.recovery {
            Some(recovery) => self.map_block(recovery, cx)?,
            None => Vec::new(),
        };
        Ok(JsCatchClause { param, body })
    }
}
