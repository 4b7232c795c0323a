//! Legacy Fallback Compiler
//!
//! A handful of constructs are not re-derived by the mapper: soaked member
//! and call chains, the binary `?` operator, existence checks over soaked
//! chains, ranges with dynamic bounds, anonymous empty classes and the
//! `extends` operator. For those the mapper hands the input node to a
//! `LegacyCompiler`, which returns target source text in the shape the
//! source language's own code generator emits. The text is spliced into the
//! output tree as a `JsNode::Fragment`.
//!
//! ```coffee
//! yo = a?.b?.c?()
//! ```
//!
//! becomes
//!
//! ```javascript
//! var ref;
//! var yo = typeof a !== "undefined" && a !== null ? (ref = a.b) != null ?
//!     typeof ref.c === "function" ? ref.c() : void 0 : void 0 : void 0;
//! ```
//!
//! ## Architecture
//!
//! The compiler never maps ordinary sub-expressions itself. Operands are
//! compiled back through the host (`LegacyHost`, implemented by the
//! `Lowerer`), so a fragment contains exactly the code the mapper would have
//! produced for them. Temporaries the fragment assigns are reserved through
//! the host and collected on the `LegacyContext`; the declarations pass hoists
//! them like any other nested assignment target.

use csz_ast::{Call, Class, Extends, Node, Op, Property, Range, Value};
use csz_common::{CompileOptions, TranspileError, TranspileResult};

use crate::classify::literal_int;
use crate::context::MapContext;
use crate::helpers::Helper;
use crate::ir_printer::{PREC_ASSIGN, PREC_CALL};

/// Compiled operand text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operand {
    pub code: String,
    /// Printer precedence of the operand's outermost expression.
    pub precedence: u8,
    /// Temporaries assigned inside the operand.
    pub temps: Vec<String>,
}

impl Operand {
    /// The code, parenthesized when it binds looser than `min_precedence`.
    pub fn wrapped(&self, min_precedence: u8) -> String {
        if self.precedence < min_precedence {
            format!("({})", self.code)
        } else {
            self.code.clone()
        }
    }
}

/// Services the mapper provides to the fallback compiler.
pub trait LegacyHost {
    fn options(&self) -> &CompileOptions;

    /// Map and print `node` as an expression.
    fn compile_operand(&mut self, node: &Node, cx: MapContext<'_>) -> TranspileResult<Operand>;

    /// True when `name` is bound in an enclosing scope.
    fn is_bound(&self, name: &str) -> bool;

    /// Reserve a temporary that is declared in the enclosing function.
    fn reserve_temp(&mut self, base: &str) -> String;

    /// A name free of input identifiers, for locals of a synthesized
    /// function. Not reserved.
    fn local_name(&self, base: &str) -> String;

    /// Identifier bound to a runtime helper.
    fn helper(&mut self, helper: Helper) -> String;
}

/// Per-fragment state handed to a `LegacyCompiler`.
pub struct LegacyContext<'h, 'c> {
    host: &'h mut dyn LegacyHost,
    cx: MapContext<'c>,
    temps: Vec<String>,
}

impl<'h, 'c> LegacyContext<'h, 'c> {
    pub fn new(host: &'h mut dyn LegacyHost, cx: MapContext<'c>) -> Self {
        Self {
            host,
            cx,
            temps: Vec::new(),
        }
    }

    pub fn options(&self) -> &CompileOptions {
        self.host.options()
    }

    /// Compile a sub-expression in value position.
    pub fn operand(&mut self, node: &Node) -> TranspileResult<Operand> {
        let operand = self.host.compile_operand(node, self.cx.value())?;
        for temp in &operand.temps {
            if !self.temps.contains(temp) {
                self.temps.push(temp.clone());
            }
        }
        Ok(operand)
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.host.is_bound(name)
    }

    /// Reserve a hoisted temporary.
    pub fn temp(&mut self, base: &str) -> String {
        let name = self.host.reserve_temp(base);
        self.temps.push(name.clone());
        name
    }

    pub fn local(&self, base: &str) -> String {
        self.host.local_name(base)
    }

    pub fn helper(&mut self, helper: Helper) -> String {
        self.host.helper(helper)
    }

    /// Temporaries the fragment assigns.
    pub fn into_temps(self) -> Vec<String> {
        self.temps
    }
}

/// Compiles a delegated node to target source text.
pub trait LegacyCompiler {
    fn compile_fragment(
        &self,
        node: &Node,
        cx: &mut LegacyContext<'_, '_>,
    ) -> TranspileResult<String>;
}

/// Built-in fallback compiler reproducing the legacy code generator's output
/// shapes.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinLegacyCompiler;

impl LegacyCompiler for BuiltinLegacyCompiler {
    fn compile_fragment(
        &self,
        node: &Node,
        cx: &mut LegacyContext<'_, '_>,
    ) -> TranspileResult<String> {
        match node {
            Node::Value(value) if value.properties.is_empty() => {
                self.compile_fragment(&value.base, cx)
            }
            Node::Value(_) | Node::Call(_) => compile_chain(node, cx),
            Node::Op(op) if op.operator == "?" => compile_existential_op(op, cx),
            Node::Existence(existence) => {
                let chain = compile_chain(&existence.expression, cx)?;
                Ok(format!("({chain}) != null"))
            }
            Node::Range(range) => compile_range(range, cx),
            Node::Class(class) => compile_anonymous_class(class, cx),
            Node::Extends(extends) => compile_extends(extends, cx),
            other => Err(TranspileError::Fallback {
                kind: other.kind().to_string(),
                message: "no legacy rule for this node".to_string(),
            }),
        }
    }
}

// =========================================================================
// Soaked chains
// =========================================================================

#[derive(Debug, Clone)]
enum Link {
    Property(Property),
    Call { args: Vec<Node>, is_new: bool },
}

/// Split a chain into its root and its links, each flagged with whether it
/// soaks.
fn flatten(node: &Node, links: &mut Vec<(Link, bool)>) -> Node {
    match node {
        Node::Value(value) => {
            let root = flatten(&value.base, links);
            for property in &value.properties {
                links.push((Link::Property(without_soak(property)), property.is_soak()));
            }
            root
        }
        Node::Call(call) if !call.is_super => match &call.variable {
            Some(variable) => {
                let root = flatten(variable, links);
                links.push((
                    Link::Call {
                        args: call.args.clone(),
                        is_new: call.is_new,
                    },
                    call.soak,
                ));
                root
            }
            None => node.clone(),
        },
        other => other.clone(),
    }
}

fn without_soak(property: &Property) -> Property {
    let mut property = property.clone();
    match &mut property {
        Property::Access(access) => access.soak = false,
        Property::Index(index) => index.soak = false,
        Property::Slice(_) => {}
    }
    property
}

fn apply(head: Node, link: &Link) -> Node {
    match link {
        Link::Property(property) => match head {
            Node::Value(mut value) => {
                value.properties.push(property.clone());
                Node::Value(value)
            }
            other => Node::Value(Value {
                base: Box::new(other),
                properties: vec![property.clone()],
                this_shorthand: false,
            }),
        },
        Link::Call { args, is_new } => Node::Call(Call {
            variable: Some(Box::new(head)),
            args: args.clone(),
            soak: false,
            is_new: *is_new,
            is_super: false,
        }),
    }
}

fn identifier(name: &str) -> Node {
    Node::Literal(csz_ast::Literal {
        value: name.to_string(),
    })
}

fn compile_chain(node: &Node, cx: &mut LegacyContext<'_, '_>) -> TranspileResult<String> {
    let mut links = Vec::new();
    let root = flatten(node, &mut links);
    compile_links(root, &links, cx)
}

fn compile_links(
    head: Node,
    links: &[(Link, bool)],
    cx: &mut LegacyContext<'_, '_>,
) -> TranspileResult<String> {
    let Some(first_soak) = links.iter().position(|(_, soak)| *soak) else {
        let node = links.iter().fold(head, |acc, (link, _)| apply(acc, link));
        return Ok(cx.operand(&node)?.wrapped(PREC_ASSIGN));
    };
    let head = links[..first_soak]
        .iter()
        .fold(head, |acc, (link, _)| apply(acc, link));
    let (link, _) = &links[first_soak];
    let rest = &links[first_soak + 1..];

    match link {
        Link::Property(_) => {
            let (guard, base) = null_guard(head, cx)?;
            let inner = compile_links(apply(base, link), rest, cx)?;
            Ok(format!("{guard} ? {inner} : void 0"))
        }
        Link::Call { .. } => {
            let (check, callee) = function_check(head, cx)?;
            let inner = compile_links(apply(callee, link), rest, cx)?;
            Ok(format!("typeof {check} === \"function\" ? {inner} : void 0"))
        }
    }
}

/// Condition that `head` is neither `null` nor `undefined`, and the node to
/// continue the chain from.
fn null_guard(head: Node, cx: &mut LegacyContext<'_, '_>) -> TranspileResult<(String, Node)> {
    if let Some(name) = head.identifier_name() {
        let guard = if cx.is_bound(name) {
            format!("{name} != null")
        } else {
            format!("typeof {name} !== \"undefined\" && {name} !== null")
        };
        return Ok((guard, head));
    }
    if head.is_this() {
        return Ok(("this != null".to_string(), head));
    }
    let operand = cx.operand(&head)?;
    let temp = cx.temp("ref");
    let guard = format!("({temp} = {}) != null", operand.wrapped(PREC_ASSIGN));
    Ok((guard, identifier(&temp)))
}

/// Expression to test with `typeof ... === "function"` and the callee to
/// call when the test passes.
fn function_check(
    head: Node,
    cx: &mut LegacyContext<'_, '_>,
) -> TranspileResult<(String, Node)> {
    if let Node::Value(value) = &head
        && let Some(last) = value.properties.last()
        && !matches!(last, Property::Slice(_))
    {
        let object = Node::Value(Value {
            base: value.base.clone(),
            properties: value.properties[..value.properties.len() - 1].to_vec(),
            this_shorthand: value.this_shorthand,
        });
        if object.identifier_name().is_some() || object.is_this() {
            let check = cx.operand(&head)?.wrapped(PREC_CALL);
            return Ok((check, head));
        }
        let object_code = cx.operand(&object)?.wrapped(PREC_ASSIGN);
        let temp = cx.temp("base");
        let member = apply(identifier(&temp), &Link::Property(last.clone()));
        let member_code = cx.operand(&member)?.code;
        let access = member_code.strip_prefix(temp.as_str()).unwrap_or(&member_code);
        return Ok((format!("({temp} = {object_code}){access}"), member));
    }
    if let Some(name) = head.identifier_name() {
        return Ok((name.to_string(), head));
    }
    let operand = cx.operand(&head)?;
    let temp = cx.temp("ref");
    let check = format!("({temp} = {})", operand.wrapped(PREC_ASSIGN));
    Ok((check, identifier(&temp)))
}

// =========================================================================
// Existential operator
// =========================================================================

/// `a ? b`
fn compile_existential_op(op: &Op, cx: &mut LegacyContext<'_, '_>) -> TranspileResult<String> {
    let Some(second) = &op.second else {
        return Err(TranspileError::Fallback {
            kind: "Op".to_string(),
            message: "existential operator without a right operand".to_string(),
        });
    };
    let (guard, value) = if let Some(name) = op.first.identifier_name() {
        let guard = if cx.is_bound(name) {
            format!("{name} != null")
        } else {
            format!("typeof {name} !== \"undefined\" && {name} !== null")
        };
        (guard, name.to_string())
    } else if op.first.is_this() {
        ("this != null".to_string(), "this".to_string())
    } else {
        let operand = cx.operand(&op.first)?;
        let temp = cx.temp("ref");
        (
            format!("({temp} = {}) != null", operand.wrapped(PREC_ASSIGN)),
            temp,
        )
    };
    let alternate = cx.operand(second)?.wrapped(PREC_ASSIGN);
    Ok(format!("{guard} ? {value} : {alternate}"))
}

// =========================================================================
// Ranges
// =========================================================================

/// Bound of a generated range: literals and names are used in place,
/// anything else is evaluated once into a local.
fn range_bound(
    node: Option<&Node>,
    local: &str,
    cx: &mut LegacyContext<'_, '_>,
    setup: &mut Vec<String>,
) -> TranspileResult<String> {
    let Some(node) = node else {
        return Ok("0".to_string());
    };
    let code = cx.operand(node)?.wrapped(PREC_ASSIGN);
    if literal_int(node).is_some() || node.identifier_name().is_some() {
        return Ok(code);
    }
    let name = cx.local(local);
    setup.push(format!("var {name} = {code};"));
    Ok(name)
}

/// Collecting closure for a range whose bounds are not small literals.
fn compile_range(range: &Range, cx: &mut LegacyContext<'_, '_>) -> TranspileResult<String> {
    let indent = cx.options().indent_unit();
    let index = cx.local("i");
    let results = cx.local("results");
    let mut setup = vec![format!("var {results} = [];")];

    let from = range_bound(range.from.as_deref(), "start", cx, &mut setup)?;
    let to = range_bound(range.to.as_deref(), "end", cx, &mut setup)?;

    let (up, down) = if range.exclusive {
        ("<", ">")
    } else {
        ("<=", ">=")
    };
    let literal_bounds = range
        .from
        .as_deref()
        .and_then(literal_int)
        .zip(range.to.as_deref().and_then(literal_int));
    let (condition, update) = match literal_bounds {
        Some((start, end)) if start <= end => (format!("{index} {up} {to}"), format!("{index}++")),
        Some(_) => (format!("{index} {down} {to}"), format!("{index}--")),
        None => (
            format!("({from} <= {to} ? {index} {up} {to} : {index} {down} {to})"),
            format!("({from} <= {to} ? {index}++ : {index}--)"),
        ),
    };

    let mut lines = vec!["(function() {".to_string()];
    lines.extend(setup.into_iter().map(|line| format!("{indent}{line}")));
    lines.push(String::new());
    lines.push(format!(
        "{indent}for (var {index} = {from}; {condition}; {update}) {{"
    ));
    lines.push(format!("{indent}{indent}{results}.push({index});"));
    lines.push(format!("{indent}}}"));
    lines.push(String::new());
    lines.push(format!("{indent}return {results};"));
    lines.push("}).apply(this)".to_string());
    Ok(lines.join("\n"))
}

// =========================================================================
// Classes and extends
// =========================================================================

fn compile_anonymous_class(
    class: &Class,
    cx: &mut LegacyContext<'_, '_>,
) -> TranspileResult<String> {
    if class.variable.is_some() || class.parent.is_some() || !class.body.is_empty() {
        return Err(TranspileError::Fallback {
            kind: "Class".to_string(),
            message: "only anonymous empty classes are delegated".to_string(),
        });
    }
    let indent = cx.options().indent_unit();
    let name = cx.local("_Class");
    Ok(format!(
        "(function() {{\n{indent}function {name}() {{}}\n\n{indent}return {name};\n}})()"
    ))
}

fn compile_extends(extends: &Extends, cx: &mut LegacyContext<'_, '_>) -> TranspileResult<String> {
    let helper = cx.helper(Helper::Extend);
    let child = cx.operand(&extends.child)?.wrapped(PREC_ASSIGN);
    let parent = cx.operand(&extends.parent)?.wrapped(PREC_ASSIGN);
    Ok(format!("{helper}({child}, {parent})"))
}

#[cfg(test)]
#[path = "../tests/legacy.rs"]
mod tests;
