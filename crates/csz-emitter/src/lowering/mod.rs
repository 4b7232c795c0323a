//! Lowering - input tree to target IR
//!
//! The `Lowerer` is the expression/statement mapper. It walks the input tree
//! once, top-down, and builds a `JsNode` tree. Every input node is mapped in
//! one of two positions:
//!
//! - **expression position** (`map_expression`): exactly one target
//!   expression. Constructs with no expression form in the target language
//!   (`if` with compound branches, `switch`, `try`, loops) are wrapped in an
//!   immediately invoked arrow function around their statement form.
//! - **statement position** (`map_statement`): zero or more target
//!   statements.
//!
//! # Architecture
//!
//! Dispatch in expression position goes through the classifier
//! (`classify::classify`), which picks a `Rule` for the node. Each rule is
//! implemented in a sub-module:
//!
//! | module | rules |
//! |---|---|
//! | `expressions` | rule dispatch, arrays, objects, parentheses |
//! | `literals` | literal tokens, booleans, literal ranges |
//! | `members` | member chains, slices, calls, `super` |
//! | `operators` | unary/binary operators, membership, existence |
//! | `assignments` | plain, compound and splice assignments |
//! | `destructuring` | array/object patterns |
//! | `functions` | function literals, parameters, parameter-tail rewrite |
//! | `statements` | statement dispatch, `if`, `switch`, `try` |
//! | `loops` | `while`, `for`, comprehensions |
//! | `classes` | class bodies, bound methods, `super` legality |
//!
//! Nodes the mapper does not re-derive are delegated to the legacy fallback
//! compiler through `fallback`, which implements `LegacyHost` on top of the
//! lowerer so the fragment's operands go through the same mapping rules.
//!
//! The lowerer tracks bindings on an explicit `ScopeStack` (pushed for every
//! function, catch clause and loop head). Declarations themselves are
//! inserted later by the declarations pass; the stack here only answers
//! "is this name bound?" for rules whose output depends on it.

mod assignments;
mod classes;
mod destructuring;
mod expressions;
mod functions;
mod literals;
mod loops;
mod members;
mod operators;
mod statements;

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::debug;

use csz_ast::{Block, Node};
use csz_common::limits::{MAX_AST_DEPTH, STACK_RED_ZONE, STACK_SEGMENT_SIZE};
use csz_common::{CompileOptions, TranspileError, TranspileResult};

use crate::classify::FallbackReason;
use crate::context::MapContext;
use crate::helpers::{Helper, HelperRegistry};
use crate::ir::JsNode;
use crate::ir_printer::{IrPrinter, precedence};
use crate::legacy::{LegacyCompiler, LegacyContext, LegacyHost, Operand};
use crate::passes;
use crate::scope::{NameGenerator, ScopeStack};

/// Statements produced for one input node.
pub type Statements = SmallVec<[JsNode; 1]>;

/// Doubly escaped quote produced by round-tripping through the legacy
/// compiler.
static DOUBLE_ESCAPED_QUOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\\\\\\(["'])"#).expect("valid regex"));

/// Input tree to target IR mapper.
pub struct Lowerer<'a> {
    options: &'a CompileOptions,
    legacy: &'a dyn LegacyCompiler,
    scopes: ScopeStack,
    helpers: HelperRegistry,
    names: NameGenerator,
    /// Current recursion depth for stack overflow protection
    depth: u32,
}

impl<'a> Lowerer<'a> {
    /// A lowerer for one compilation of `root`.
    ///
    /// Every identifier of `root` seeds the name generator, so synthesized
    /// names never collide with input names.
    pub fn new(options: &'a CompileOptions, legacy: &'a dyn LegacyCompiler, root: &Node) -> Self {
        let mut taken = FxHashSet::default();
        root.collect_names(&mut taken);
        Self {
            options,
            legacy,
            scopes: ScopeStack::new(),
            helpers: HelperRegistry::new(),
            names: NameGenerator::new(taken),
            depth: 0,
        }
    }

    /// Map the program root to its statement list.
    pub fn lower_program(&mut self, root: &Node) -> TranspileResult<Vec<JsNode>> {
        let cx = MapContext::default();
        match root {
            Node::Block(block) => self.map_block(block, cx),
            other => Ok(self.map_statement(other, cx)?.into_vec()),
        }
    }

    /// Helpers requested while mapping.
    pub fn into_helpers(self) -> HelperRegistry {
        self.helpers
    }

    pub fn helpers(&self) -> &HelperRegistry {
        &self.helpers
    }

    // =========================================================================
    // Recursion guard
    // =========================================================================

    fn enter(&mut self) -> TranspileResult<()> {
        if self.depth >= MAX_AST_DEPTH {
            debug!(depth = self.depth, "[lowering] maximum nesting depth reached");
            return Err(TranspileError::DepthLimit {
                limit: MAX_AST_DEPTH,
            });
        }
        self.depth += 1;
        Ok(())
    }

    const fn leave(&mut self) {
        self.depth -= 1;
    }

    // =========================================================================
    // Entry points
    // =========================================================================

    /// Map a node in expression position.
    pub fn map_expression(&mut self, node: &Node, cx: MapContext<'_>) -> TranspileResult<JsNode> {
        self.enter()?;
        let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT_SIZE, || {
            self.map_expression_inner(node, cx)
        });
        self.leave();
        result
    }

    /// Map a node in statement position.
    pub fn map_statement(&mut self, node: &Node, cx: MapContext<'_>) -> TranspileResult<Statements> {
        self.enter()?;
        let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT_SIZE, || {
            self.map_statement_inner(node, cx)
        });
        self.leave();
        result
    }

    /// Map every expression of a block in statement position.
    pub fn map_block(&mut self, block: &Block, cx: MapContext<'_>) -> TranspileResult<Vec<JsNode>> {
        let mut statements = Vec::with_capacity(block.expressions.len());
        for expression in &block.expressions {
            statements.extend(self.map_statement(expression, cx.value())?);
        }
        Ok(statements)
    }

    /// Map a sequence of expressions that produces a value in expression
    /// position: a single expression maps directly, anything else becomes
    /// an immediately invoked arrow returning the last value.
    fn map_block_value(&mut self, block: &Block, cx: MapContext<'_>) -> TranspileResult<JsNode> {
        match block.single() {
            Some(only) => self.map_expression(only, cx.value()),
            None if block.is_empty() => Ok(JsNode::undefined()),
            None => self.in_iife(|lowerer| lowerer.map_block(block, cx.value())),
        }
    }

    /// `(() => { body })()` with implicit returns added to the body.
    ///
    /// The arrow is a function scope of its own, so the body is mapped in a
    /// fresh hoisting frame.
    fn in_iife(
        &mut self,
        body: impl FnOnce(&mut Self) -> TranspileResult<Vec<JsNode>>,
    ) -> TranspileResult<JsNode> {
        self.scopes.push(true);
        let result = body(self);
        self.scopes.pop();
        let mut statements = result?;
        passes::returns::add_implicit_returns(&mut statements);
        Ok(JsNode::iife(statements))
    }

    // =========================================================================
    // Names and helpers
    // =========================================================================

    /// Bind `name` in the nearest function scope.
    fn declare(&mut self, name: &str) {
        self.scopes.declare_hoisted(name);
    }

    fn is_bound(&self, name: &str) -> bool {
        self.scopes.is_bound(name)
    }

    /// Reserve a fresh temporary; it is declared by the declarations pass
    /// when first assigned.
    fn fresh(&mut self, base: &str) -> String {
        self.names.fresh(base)
    }

    fn require_helper(&mut self, helper: Helper) -> String {
        let registered = self.helpers.name(helper).is_some();
        let name = self.helpers.require(helper, &mut self.names);
        if !registered {
            debug!(helper = helper.base_name(), name = %name, "[lowering] helper registered");
        }
        name
    }

    // =========================================================================
    // Legacy fallback
    // =========================================================================

    /// Delegate `node` to the legacy compiler and splice its output.
    fn fallback(
        &mut self,
        node: &Node,
        reason: FallbackReason,
        cx: MapContext<'_>,
    ) -> TranspileResult<JsNode> {
        let legacy = self.legacy;
        let mut legacy_cx = LegacyContext::new(self, cx);
        let code = legacy.compile_fragment(node, &mut legacy_cx)?;
        let temps = legacy_cx.into_temps();
        let code = DOUBLE_ESCAPED_QUOTE.replace_all(&code, "\\$1").into_owned();
        debug!(
            kind = node.kind(),
            ?reason,
            temps = temps.len(),
            "[lowering] delegated to legacy compiler"
        );
        Ok(JsNode::Fragment {
            code,
            temps,
            atomic: reason.is_atomic(),
        })
    }
}

impl LegacyHost for Lowerer<'_> {
    fn options(&self) -> &CompileOptions {
        self.options
    }

    fn compile_operand(&mut self, node: &Node, cx: MapContext<'_>) -> TranspileResult<Operand> {
        let mut mapped = self.map_expression(node, cx)?;
        passes::declarations::declare_in_functions(&mut mapped, &|name| self.scopes.is_bound(name));
        passes::super_calls::insert_super_calls(std::slice::from_mut(&mut mapped));
        passes::switch_breaks::insert_switch_breaks_in(&mut mapped);
        let mut temps = Vec::new();
        collect_operand_temps(&mut mapped, &mut temps);
        Ok(Operand {
            code: IrPrinter::print(&mapped, self.options),
            precedence: precedence(&mapped),
            temps,
        })
    }

    fn is_bound(&self, name: &str) -> bool {
        self.scopes.is_bound(name)
    }

    fn reserve_temp(&mut self, base: &str) -> String {
        self.names.fresh(base)
    }

    fn local_name(&self, base: &str) -> String {
        self.names.unused(base)
    }

    fn helper(&mut self, helper: Helper) -> String {
        self.require_helper(helper)
    }
}

/// Names an operand assigns outside nested functions: temporaries of nested
/// fragments and plain assignment targets. Once printed into a fragment they
/// are invisible to the declarations pass, so the fragment carries them.
fn collect_operand_temps(node: &mut JsNode, temps: &mut Vec<String>) {
    match node {
        JsNode::Fragment { temps: inner, .. } => {
            temps.extend(inner.iter().cloned());
            return;
        }
        JsNode::AssignExpr {
            target, operator, ..
        } if operator == "=" => {
            let mut names = Vec::new();
            target.pattern_bindings(&mut names);
            temps.extend(names);
        }
        JsNode::FunctionExpr { .. } | JsNode::ArrowFunction { .. } | JsNode::ClassExpr(_) => {
            return;
        }
        _ => {}
    }
    node.for_each_child_mut(&mut |child| collect_operand_temps(child, temps));
}

#[cfg(test)]
#[path = "../../tests/lowering.rs"]
mod tests;
