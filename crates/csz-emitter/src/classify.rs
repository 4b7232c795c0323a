//! Node Classifier
//!
//! Decides which mapping rule applies to an input node in expression
//! position. The variant tag alone is not enough: a `Value` is routed by its
//! base and by whether it carries a member chain, `Arr`/`Obj` depend on the
//! pattern flag of the context, and several shapes are delegated to the
//! legacy fallback compiler.

use once_cell::sync::Lazy;
use regex::Regex;

use csz_ast::{Arr, Assign, Block, Call, Class, Code, For, If, In, Node, Obj, Op, Switch, Throw, Try, Value, While};
use csz_common::limits::MAX_RANGE_EXPANSION;
use csz_common::{TranspileError, TranspileResult};

use crate::context::MapContext;

static IS_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[+-]?(?:0x[\da-f]+|\d*\.?\d+(?:e[+-]?\d+)?)$").expect("valid regex")
});
static IS_STRING: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^['"]"#).expect("valid regex"));
static IS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^/").expect("valid regex"));

/// Shape of a raw literal token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Number,
    String,
    Regex,
    NaN,
    This,
    /// `break`, `continue`, `debugger`
    StatementKeyword,
    Identifier,
}

pub fn literal_kind(raw: &str) -> LiteralKind {
    match raw {
        "NaN" => LiteralKind::NaN,
        "this" => LiteralKind::This,
        "break" | "continue" | "debugger" => LiteralKind::StatementKeyword,
        _ if IS_STRING.is_match(raw) => LiteralKind::String,
        _ if IS_NUMBER.is_match(raw) => LiteralKind::Number,
        _ if IS_REGEX.is_match(raw) => LiteralKind::Regex,
        _ => LiteralKind::Identifier,
    }
}

/// Integer value of a literal (or negated literal) node.
pub fn literal_int(node: &Node) -> Option<i64> {
    match node.unwrapped() {
        Node::Literal(literal) => literal.value.parse().ok(),
        Node::Op(op) if op.second.is_none() && (op.operator == "-" || op.operator == "+") => {
            let value = literal_int(&op.first)?;
            Some(if op.operator == "-" { -value } else { value })
        }
        _ => None,
    }
}

/// Why a node is delegated to the legacy compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// Member chain with a `?.` / `?[]` link.
    SoakedChain,
    /// `f?()` or a call whose callee chain soaks.
    SoakedCall,
    /// Binary `a ? b`.
    ExistentialOperator,
    /// `x?` over a soaked chain.
    SoakedExistence,
    /// Range whose bounds are not small integer literals.
    DynamicRange,
    /// `class` with no name, parent or body.
    AnonymousClass,
    /// `extends` used as an operator.
    ExtendsOperator,
}

impl FallbackReason {
    /// The emitted code is a call or primary expression.
    pub const fn is_atomic(self) -> bool {
        matches!(
            self,
            Self::DynamicRange | Self::AnonymousClass | Self::ExtendsOperator
        )
    }
}

/// Mapping rule for a node in expression position.
#[derive(Debug, Clone, Copy)]
pub enum Rule<'a> {
    Fallback(FallbackReason),
    MemberChain(&'a Value),
    Literal(&'a str),
    Bool(&'a str),
    Undefined,
    Null,
    /// Range with literal integer bounds, expanded in place.
    Range { from: i64, to: i64, exclusive: bool },
    Call(&'a Call),
    New(&'a Call),
    SuperCall(&'a Call),
    ArrayPattern(&'a Arr),
    ObjectPattern(&'a Obj),
    Array(&'a Arr),
    Object(&'a Obj),
    Parens(&'a Block),
    Operator(&'a Op),
    Membership(&'a In),
    Existence(&'a Node),
    Assign(&'a Assign),
    Function(&'a Code),
    Class(&'a Class),
    Conditional(&'a If),
    Try(&'a Try),
    Switch(&'a Switch),
    Comprehension(&'a For),
    WhileExpression(&'a While),
    Splat(&'a Node),
    Passthrough(&'a str),
    Throw(&'a Throw),
}

/// True when evaluating the chain requires a null guard somewhere.
pub fn soaks(node: &Node) -> bool {
    match node {
        Node::Value(value) => value.has_soak() || soaks(&value.base),
        Node::Call(call) => call.soak || call.variable.as_deref().is_some_and(soaks),
        _ => false,
    }
}

pub fn classify<'a>(node: &'a Node, cx: &MapContext<'_>) -> TranspileResult<Rule<'a>> {
    let rule = classify_inner(node, cx)?;
    tracing::trace!(kind = node.kind(), rule = ?RuleName(&rule), "classified");
    Ok(rule)
}

fn classify_inner<'a>(node: &'a Node, cx: &MapContext<'_>) -> TranspileResult<Rule<'a>> {
    Ok(match node {
        Node::Value(value) if !value.properties.is_empty() => {
            if soaks(node) {
                Rule::Fallback(FallbackReason::SoakedChain)
            } else {
                Rule::MemberChain(value)
            }
        }
        Node::Value(value) => classify_inner(&value.base, cx)?,
        Node::Block(block) => match block.single() {
            Some(only) => classify_inner(only, cx)?,
            None => Rule::Parens(block),
        },
        Node::Literal(literal) => {
            if literal_kind(&literal.value) == LiteralKind::StatementKeyword {
                return Err(TranspileError::unsupported("Literal", "Expression"));
            }
            Rule::Literal(&literal.value)
        }
        Node::PassthroughLiteral(literal) => Rule::Passthrough(&literal.value),
        Node::Bool(boolean) => Rule::Bool(&boolean.val),
        Node::Undefined => Rule::Undefined,
        Node::Null => Rule::Null,
        Node::Range(range) => match (
            range.from.as_deref().and_then(literal_int),
            range.to.as_deref().and_then(literal_int),
        ) {
            (Some(from), Some(to)) if (to - from).abs() <= MAX_RANGE_EXPANSION => Rule::Range {
                from,
                to,
                exclusive: range.exclusive,
            },
            _ => Rule::Fallback(FallbackReason::DynamicRange),
        },
        Node::Call(call) => {
            if soaks(node) {
                Rule::Fallback(FallbackReason::SoakedCall)
            } else if call.is_super {
                Rule::SuperCall(call)
            } else if call.is_new {
                Rule::New(call)
            } else {
                Rule::Call(call)
            }
        }
        Node::Arr(arr) if cx.left => Rule::ArrayPattern(arr),
        Node::Obj(obj) if cx.left => Rule::ObjectPattern(obj),
        Node::Arr(arr) => Rule::Array(arr),
        Node::Obj(obj) => Rule::Object(obj),
        Node::Parens(parens) => Rule::Parens(&parens.body),
        Node::Op(op) if op.operator == "?" && op.second.is_some() => {
            Rule::Fallback(FallbackReason::ExistentialOperator)
        }
        Node::Op(op) => Rule::Operator(op),
        Node::In(test) => Rule::Membership(test),
        Node::Existence(existence) => {
            if soaks(&existence.expression) {
                Rule::Fallback(FallbackReason::SoakedExistence)
            } else {
                Rule::Existence(&existence.expression)
            }
        }
        Node::Assign(assign) => Rule::Assign(assign),
        Node::Code(code) => Rule::Function(code),
        Node::Class(class)
            if class.variable.is_none() && class.parent.is_none() && class.body.is_empty() =>
        {
            Rule::Fallback(FallbackReason::AnonymousClass)
        }
        Node::Class(class) => Rule::Class(class),
        Node::Extends(_) => Rule::Fallback(FallbackReason::ExtendsOperator),
        Node::If(branch) => Rule::Conditional(branch),
        Node::Try(attempt) => Rule::Try(attempt),
        Node::Switch(switch) => Rule::Switch(switch),
        Node::For(lp) => Rule::Comprehension(lp),
        Node::While(lp) => Rule::WhileExpression(lp),
        Node::Splat(splat) => Rule::Splat(&splat.name),
        Node::Throw(throw) => Rule::Throw(throw),
        Node::Param(_) | Node::Expansion | Node::Comment(_) | Node::Return(_) => {
            return Err(TranspileError::unsupported(node.kind(), "Expression"));
        }
    })
}

/// Variant name of a rule, for trace output.
struct RuleName<'r, 'a>(&'r Rule<'a>);

impl std::fmt::Debug for RuleName<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self.0 {
            Rule::Fallback(reason) => return write!(f, "Fallback({reason:?})"),
            Rule::MemberChain(_) => "MemberChain",
            Rule::Literal(_) => "Literal",
            Rule::Bool(_) => "Bool",
            Rule::Undefined => "Undefined",
            Rule::Null => "Null",
            Rule::Range { .. } => "Range",
            Rule::Call(_) => "Call",
            Rule::New(_) => "New",
            Rule::SuperCall(_) => "SuperCall",
            Rule::ArrayPattern(_) => "ArrayPattern",
            Rule::ObjectPattern(_) => "ObjectPattern",
            Rule::Array(_) => "Array",
            Rule::Object(_) => "Object",
            Rule::Parens(_) => "Parens",
            Rule::Operator(_) => "Operator",
            Rule::Membership(_) => "Membership",
            Rule::Existence(_) => "Existence",
            Rule::Assign(_) => "Assign",
            Rule::Function(_) => "Function",
            Rule::Class(_) => "Class",
            Rule::Conditional(_) => "Conditional",
            Rule::Try(_) => "Try",
            Rule::Switch(_) => "Switch",
            Rule::Comprehension(_) => "Comprehension",
            Rule::WhileExpression(_) => "WhileExpression",
            Rule::Splat(_) => "Splat",
            Rule::Passthrough(_) => "Passthrough",
            Rule::Throw(_) => "Throw",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
#[path = "../tests/classify.rs"]
mod tests;
