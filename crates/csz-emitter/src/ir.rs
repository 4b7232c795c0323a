//! Target IR.
//!
//! The mapper produces a tree of `JsNode`s instead of strings; the structural
//! post-passes rewrite that tree and `IrPrinter` turns it into text.
//!
//! # IR Structure
//!
//! One enum covers statements, expressions, declarations and patterns of the
//! target language. `Fragment` is the splice point for code produced by the
//! legacy fallback compiler: its text is printed verbatim and its reserved
//! temporaries are declared by the hoisting pass like any other binding.

/// Intermediate Representation node for emitted JavaScript
#[derive(Debug, Clone, PartialEq)]
pub enum JsNode {
    // =========================================================================
    // Literals
    // =========================================================================
    /// Numeric literal, raw token text: `42`, `0xff`, `1e3`
    NumericLiteral(String),

    /// String literal. Holds the body with quote escapes removed; the printer
    /// re-quotes it in the configured style.
    StringLiteral(String),

    /// Regex literal, raw token text: `/ab+c/gi`
    RegexLiteral(String),

    BooleanLiteral(bool),

    NullLiteral,

    // =========================================================================
    // Identifiers
    // =========================================================================
    Identifier(String),

    This,

    Super,

    // =========================================================================
    // Expressions
    // =========================================================================
    /// Binary expression: `left op right`
    BinaryExpr {
        left: Box<Self>,
        operator: String,
        right: Box<Self>,
    },

    /// `&&` / `||`
    LogicalExpr {
        left: Box<Self>,
        operator: String,
        right: Box<Self>,
    },

    /// Assignment: `target op value` with `=`, `+=`, ...
    AssignExpr {
        target: Box<Self>,
        operator: String,
        value: Box<Self>,
    },

    /// Prefix unary operator: `!x`, `-x`, `typeof x`
    UnaryExpr {
        operator: String,
        operand: Box<Self>,
    },

    /// `++x`, `x--`
    UpdateExpr {
        operator: String,
        operand: Box<Self>,
        prefix: bool,
    },

    CallExpr {
        callee: Box<Self>,
        arguments: Vec<Self>,
    },

    NewExpr {
        callee: Box<Self>,
        arguments: Vec<Self>,
    },

    /// Property access: `object.property`
    PropertyAccess { object: Box<Self>, property: String },

    /// Element access: `object[index]`
    ElementAccess { object: Box<Self>, index: Box<Self> },

    /// Always printed parenthesized: `(cond ? a : b)`
    ConditionalExpr {
        condition: Box<Self>,
        when_true: Box<Self>,
        when_false: Box<Self>,
    },

    /// Parentheses written in the source.
    Parenthesized(Box<Self>),

    /// Comma expression: `a, b, c`
    CommaExpr(Vec<Self>),

    ArrayLiteral(Vec<Self>),

    ObjectLiteral(Vec<JsProperty>),

    /// Spread element: `...expr`
    SpreadElement(Box<Self>),

    FunctionExpr {
        name: Option<String>,
        params: Vec<Self>,
        body: Vec<Self>,
        generator: bool,
    },

    ArrowFunction { params: Vec<Self>, body: Vec<Self> },

    ClassExpr(JsClass),

    YieldExpr {
        argument: Option<Box<Self>>,
        delegate: bool,
    },

    // =========================================================================
    // Patterns
    // =========================================================================
    ObjectPattern(Vec<JsProperty>),

    ArrayPattern(Vec<Self>),

    /// `target = default` inside a pattern or parameter list.
    DefaultPattern { target: Box<Self>, default: Box<Self> },

    /// `...target`
    RestElement(Box<Self>),

    // =========================================================================
    // Statements
    // =========================================================================
    /// `var target = initializer;`
    VarDecl {
        target: Box<Self>,
        initializer: Option<Box<Self>>,
    },

    ExpressionStatement(Box<Self>),

    ReturnStatement(Option<Box<Self>>),

    /// `else_branch` is either a `Block` or a nested `IfStatement`.
    IfStatement {
        condition: Box<Self>,
        then_branch: Vec<Self>,
        else_branch: Option<Box<Self>>,
    },

    Block(Vec<Self>),

    SwitchStatement {
        discriminant: Box<Self>,
        cases: Vec<JsSwitchCase>,
    },

    /// `for (let binding of iterable) { body }`; `binding` is an identifier
    /// or a pattern, the printer supplies `let`.
    ForOfStatement {
        binding: Box<Self>,
        iterable: Box<Self>,
        body: Vec<Self>,
    },

    /// `for (let binding in object) { body }`
    ForInStatement {
        binding: Box<Self>,
        object: Box<Self>,
        body: Vec<Self>,
    },

    WhileStatement { condition: Box<Self>, body: Vec<Self> },

    TryStatement {
        block: Vec<Self>,
        handler: Option<Box<JsCatchClause>>,
        finalizer: Option<Vec<Self>>,
    },

    ThrowStatement(Box<Self>),

    BreakStatement,

    ContinueStatement,

    DebuggerStatement,

    ClassDecl(JsClass),

    /// Block comment: `/* text */`
    Comment(String),

    // =========================================================================
    // Verbatim code
    // =========================================================================
    /// Embedded JavaScript from the source, emitted as-is.
    Raw(String),

    /// Legacy fallback output.
    Fragment {
        code: String,
        /// Temporaries the fragment assigns; declared by the hoisting pass.
        temps: Vec<String>,
        /// True when the code is a primary or call expression that never
        /// needs surrounding parentheses.
        atomic: bool,
    },

    Program(Vec<Self>),
}

/// Property of an object literal or object pattern
#[derive(Debug, Clone, PartialEq)]
pub struct JsProperty {
    pub key: JsPropertyKey,
    pub value: JsNode,
    /// `{ a }` instead of `{ a: a }`
    pub shorthand: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JsPropertyKey {
    Identifier(String),
    StringLiteral(String),
    NumericLiteral(String),
    Computed(Box<JsNode>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct JsClass {
    pub name: Option<String>,
    pub superclass: Option<Box<JsNode>>,
    pub members: Vec<JsClassMember>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JsClassMember {
    Method {
        kind: JsMethodKind,
        key: JsPropertyKey,
        is_static: bool,
        params: Vec<JsNode>,
        body: Vec<JsNode>,
        generator: bool,
    },
    /// Class field: `static b = [1, 2];`
    Field {
        key: JsPropertyKey,
        is_static: bool,
        value: JsNode,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsMethodKind {
    Constructor,
    Method,
}

/// Switch case; `test` is `None` for `default:`
#[derive(Debug, Clone, PartialEq)]
pub struct JsSwitchCase {
    pub test: Option<JsNode>,
    pub consequent: Vec<JsNode>,
    /// Extra label of a multi-value source case. Always empty and always
    /// falls through into the next entry.
    pub shares_body: bool,
}

/// Catch clause; `param` is `None` for an optional binding (`catch {}`)
#[derive(Debug, Clone, PartialEq)]
pub struct JsCatchClause {
    pub param: Option<JsNode>,
    pub body: Vec<JsNode>,
}

// =========================================================================
// Builder helpers for IR construction
// =========================================================================

impl JsNode {
    /// Create an identifier node
    pub fn id(name: impl Into<String>) -> Self {
        Self::Identifier(name.into())
    }

    /// Create a numeric literal
    pub fn number(raw: impl Into<String>) -> Self {
        Self::NumericLiteral(raw.into())
    }

    /// Create a string literal
    pub fn string(body: impl Into<String>) -> Self {
        Self::StringLiteral(body.into())
    }

    /// The identifier `undefined`
    pub fn undefined() -> Self {
        Self::id("undefined")
    }

    /// Create a call expression
    pub fn call(callee: Self, args: Vec<Self>) -> Self {
        Self::CallExpr {
            callee: Box::new(callee),
            arguments: args,
        }
    }

    /// Create a `new` expression
    pub fn new_expr(callee: Self, args: Vec<Self>) -> Self {
        Self::NewExpr {
            callee: Box::new(callee),
            arguments: args,
        }
    }

    /// Create a property access
    pub fn prop(object: Self, property: impl Into<String>) -> Self {
        Self::PropertyAccess {
            object: Box::new(object),
            property: property.into(),
        }
    }

    /// Create an element access
    pub fn elem(object: Self, index: Self) -> Self {
        Self::ElementAccess {
            object: Box::new(object),
            index: Box::new(index),
        }
    }

    /// `object.method(args)`
    pub fn method_call(object: Self, method: &str, args: Vec<Self>) -> Self {
        Self::call(Self::prop(object, method), args)
    }

    /// Create a binary expression
    pub fn binary(left: Self, op: impl Into<String>, right: Self) -> Self {
        Self::BinaryExpr {
            left: Box::new(left),
            operator: op.into(),
            right: Box::new(right),
        }
    }

    /// Create a logical expression
    pub fn logical(left: Self, op: impl Into<String>, right: Self) -> Self {
        Self::LogicalExpr {
            left: Box::new(left),
            operator: op.into(),
            right: Box::new(right),
        }
    }

    /// Create a plain assignment expression
    pub fn assign(target: Self, value: Self) -> Self {
        Self::assign_op(target, "=", value)
    }

    /// Create an assignment with an explicit operator
    pub fn assign_op(target: Self, op: impl Into<String>, value: Self) -> Self {
        Self::AssignExpr {
            target: Box::new(target),
            operator: op.into(),
            value: Box::new(value),
        }
    }

    /// Create a prefix unary expression
    pub fn unary(op: impl Into<String>, operand: Self) -> Self {
        Self::UnaryExpr {
            operator: op.into(),
            operand: Box::new(operand),
        }
    }

    /// `!operand`
    pub fn not(operand: Self) -> Self {
        Self::unary("!", operand)
    }

    /// Create a conditional expression
    pub fn conditional(condition: Self, when_true: Self, when_false: Self) -> Self {
        Self::ConditionalExpr {
            condition: Box::new(condition),
            when_true: Box::new(when_true),
            when_false: Box::new(when_false),
        }
    }

    /// Wrap in parentheses
    pub fn paren(self) -> Self {
        Self::Parenthesized(Box::new(self))
    }

    /// Create a spread element
    pub fn spread(self) -> Self {
        Self::SpreadElement(Box::new(self))
    }

    /// Create an arrow function with a block body
    pub const fn arrow(params: Vec<Self>, body: Vec<Self>) -> Self {
        Self::ArrowFunction { params, body }
    }

    /// Create an anonymous function expression
    pub const fn func(params: Vec<Self>, body: Vec<Self>) -> Self {
        Self::FunctionExpr {
            name: None,
            params,
            body,
            generator: false,
        }
    }

    /// Immediately invoked arrow: `(() => { body })()`
    pub fn iife(body: Vec<Self>) -> Self {
        Self::call(Self::arrow(Vec::new(), body), Vec::new())
    }

    /// Create a `var` declaration
    pub fn var_decl(target: Self, init: Option<Self>) -> Self {
        Self::VarDecl {
            target: Box::new(target),
            initializer: init.map(Box::new),
        }
    }

    /// Create an expression statement
    pub fn expr_stmt(expr: Self) -> Self {
        Self::ExpressionStatement(Box::new(expr))
    }

    /// Create a return statement
    pub fn ret(expr: Option<Self>) -> Self {
        Self::ReturnStatement(expr.map(Box::new))
    }

    /// Move the node out, leaving `null` behind.
    pub fn take(&mut self) -> Self {
        std::mem::replace(self, Self::NullLiteral)
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Cheap, side-effect free expression that may be evaluated twice.
    pub const fn is_simple(&self) -> bool {
        matches!(
            self,
            Self::Identifier(_)
                | Self::This
                | Self::NumericLiteral(_)
                | Self::StringLiteral(_)
                | Self::BooleanLiteral(_)
                | Self::NullLiteral
        )
    }

    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Self::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// Statement after which control never reaches the next sibling.
    pub const fn is_terminator(&self) -> bool {
        matches!(
            self,
            Self::ReturnStatement(_)
                | Self::ThrowStatement(_)
                | Self::BreakStatement
                | Self::ContinueStatement
        )
    }

    /// Names bound by a binding target (identifier or pattern).
    ///
    /// Returns `true` when the target also contains member-expression
    /// targets, which can only be assigned, never declared.
    pub fn pattern_bindings(&self, names: &mut Vec<String>) -> bool {
        match self {
            Self::Identifier(name) => {
                names.push(name.clone());
                false
            }
            Self::ObjectPattern(properties) => properties
                .iter()
                .fold(false, |member, prop| prop.value.pattern_bindings(names) | member),
            Self::ArrayPattern(elements) => elements
                .iter()
                .fold(false, |member, element| element.pattern_bindings(names) | member),
            Self::DefaultPattern { target, .. } | Self::RestElement(target) => {
                target.pattern_bindings(names)
            }
            _ => true,
        }
    }

    /// Visit every direct child node mutably.
    pub fn for_each_child_mut(&mut self, f: &mut impl FnMut(&mut JsNode)) {
        match self {
            Self::NumericLiteral(_)
            | Self::StringLiteral(_)
            | Self::RegexLiteral(_)
            | Self::BooleanLiteral(_)
            | Self::NullLiteral
            | Self::Identifier(_)
            | Self::This
            | Self::Super
            | Self::BreakStatement
            | Self::ContinueStatement
            | Self::DebuggerStatement
            | Self::Comment(_)
            | Self::Raw(_)
            | Self::Fragment { .. } => {}
            Self::BinaryExpr { left, right, .. } | Self::LogicalExpr { left, right, .. } => {
                f(left);
                f(right);
            }
            Self::AssignExpr { target, value, .. } => {
                f(target);
                f(value);
            }
            Self::UnaryExpr { operand, .. } | Self::UpdateExpr { operand, .. } => f(operand),
            Self::CallExpr { callee, arguments } | Self::NewExpr { callee, arguments } => {
                f(callee);
                arguments.iter_mut().for_each(|arg| f(arg));
            }
            Self::PropertyAccess { object, .. } => f(object),
            Self::ElementAccess { object, index } => {
                f(object);
                f(index);
            }
            Self::ConditionalExpr {
                condition,
                when_true,
                when_false,
            } => {
                f(condition);
                f(when_true);
                f(when_false);
            }
            Self::Parenthesized(inner)
            | Self::SpreadElement(inner)
            | Self::RestElement(inner)
            | Self::ExpressionStatement(inner)
            | Self::ThrowStatement(inner) => f(inner),
            Self::CommaExpr(items)
            | Self::ArrayLiteral(items)
            | Self::ArrayPattern(items)
            | Self::Block(items)
            | Self::Program(items) => items.iter_mut().for_each(|item| f(item)),
            Self::ObjectLiteral(properties) | Self::ObjectPattern(properties) => {
                for prop in properties {
                    if let JsPropertyKey::Computed(key) = &mut prop.key {
                        f(key);
                    }
                    f(&mut prop.value);
                }
            }
            Self::FunctionExpr { params, body, .. } | Self::ArrowFunction { params, body } => {
                params.iter_mut().for_each(|param| f(param));
                body.iter_mut().for_each(|stmt| f(stmt));
            }
            Self::ClassExpr(class) | Self::ClassDecl(class) => class.for_each_child_mut(f),
            Self::YieldExpr { argument, .. } | Self::ReturnStatement(argument) => {
                if let Some(argument) = argument {
                    f(argument);
                }
            }
            Self::DefaultPattern { target, default } => {
                f(target);
                f(default);
            }
            Self::VarDecl {
                target,
                initializer,
            } => {
                f(target);
                if let Some(initializer) = initializer {
                    f(initializer);
                }
            }
            Self::IfStatement {
                condition,
                then_branch,
                else_branch,
            } => {
                f(condition);
                then_branch.iter_mut().for_each(|stmt| f(stmt));
                if let Some(else_branch) = else_branch {
                    f(else_branch);
                }
            }
            Self::SwitchStatement {
                discriminant,
                cases,
            } => {
                f(discriminant);
                for case in cases {
                    if let Some(test) = &mut case.test {
                        f(test);
                    }
                    case.consequent.iter_mut().for_each(|stmt| f(stmt));
                }
            }
            Self::ForOfStatement {
                binding,
                iterable: source,
                body,
            }
            | Self::ForInStatement {
                binding,
                object: source,
                body,
            } => {
                f(binding);
                f(source);
                body.iter_mut().for_each(|stmt| f(stmt));
            }
            Self::WhileStatement { condition, body } => {
                f(condition);
                body.iter_mut().for_each(|stmt| f(stmt));
            }
            Self::TryStatement {
                block,
                handler,
                finalizer,
            } => {
                block.iter_mut().for_each(|stmt| f(stmt));
                if let Some(handler) = handler {
                    if let Some(param) = &mut handler.param {
                        f(param);
                    }
                    handler.body.iter_mut().for_each(|stmt| f(stmt));
                }
                if let Some(finalizer) = finalizer {
                    finalizer.iter_mut().for_each(|stmt| f(stmt));
                }
            }
        }
    }
}

impl JsClass {
    pub fn constructor_mut(&mut self) -> Option<&mut Vec<JsNode>> {
        self.members.iter_mut().find_map(|member| match member {
            JsClassMember::Method {
                kind: JsMethodKind::Constructor,
                body,
                ..
            } => Some(body),
            _ => None,
        })
    }

    pub fn for_each_child_mut(&mut self, f: &mut impl FnMut(&mut JsNode)) {
        if let Some(superclass) = &mut self.superclass {
            f(superclass);
        }
        for member in &mut self.members {
            match member {
                JsClassMember::Method {
                    key, params, body, ..
                } => {
                    if let JsPropertyKey::Computed(key) = key {
                        f(key);
                    }
                    params.iter_mut().for_each(|param| f(param));
                    body.iter_mut().for_each(|stmt| f(stmt));
                }
                JsClassMember::Field { value, .. } => f(value),
            }
        }
    }
}

impl JsProperty {
    /// `key: value`
    pub fn init(key: JsPropertyKey, value: JsNode) -> Self {
        Self {
            key,
            value,
            shorthand: false,
        }
    }

    /// `{ name }`
    pub fn shorthand(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            key: JsPropertyKey::Identifier(name.clone()),
            value: JsNode::Identifier(name),
            shorthand: true,
        }
    }
}

#[cfg(test)]
#[path = "../tests/ir.rs"]
mod tests;
