//! Node constructors.
//!
//! Mirrors the shapes the front-end parser produces: identifiers and literals
//! are wrapped in `Value`, member chains extend the wrapping `Value`, calls
//! stay bare `Call` nodes until something is chained onto them.

use crate::node::*;

macro_rules! impl_into_node {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Node {
                fn from(payload: $variant) -> Self {
                    Node::$variant(payload)
                }
            }
        )*
    };
}

impl_into_node!(
    Block, Value, Call, Op, In, Existence, Assign, Code, Param, Splat, Class, Obj, Arr, Range,
    Parens, Extends, If, While, For, Switch, Try, Throw, Return, Comment,
);

fn wrap(base: Node) -> Node {
    Node::Value(Value {
        base: Box::new(base),
        properties: Vec::new(),
        this_shorthand: false,
    })
}

fn chain(base: Node, property: Property) -> Node {
    match base {
        Node::Value(mut value) => {
            value.properties.push(property);
            Node::Value(value)
        }
        other => Node::Value(Value {
            base: Box::new(other),
            properties: vec![property],
            this_shorthand: false,
        }),
    }
}

fn boxed(node: Node) -> Box<Node> {
    Box::new(node)
}

pub fn body(expressions: Vec<Node>) -> Block {
    Block::new(expressions)
}

pub fn block(expressions: Vec<Node>) -> Node {
    Node::Block(Block::new(expressions))
}

// =========================================================================
// Literals
// =========================================================================

/// Literal token exactly as the lexer produced it.
pub fn lit(raw: impl Into<String>) -> Node {
    wrap(Node::Literal(Literal { value: raw.into() }))
}

pub fn ident(name: impl Into<String>) -> Node {
    lit(name)
}

pub fn num(raw: impl Into<String>) -> Node {
    lit(raw)
}

/// Double-quoted string token.
pub fn string(text: &str) -> Node {
    lit(format!("\"{text}\""))
}

/// Single-quoted string token.
pub fn sq_string(text: &str) -> Node {
    lit(format!("'{text}'"))
}

/// Bare keyword literal (`break`, `continue`, `debugger`).
pub fn keyword(word: &str) -> Node {
    Node::Literal(Literal {
        value: word.to_string(),
    })
}

pub fn passthrough(js: impl Into<String>) -> Node {
    Node::PassthroughLiteral(Literal { value: js.into() })
}

pub fn boolean(val: &str) -> Node {
    wrap(Node::Bool(Bool {
        val: val.to_string(),
    }))
}

pub fn undefined() -> Node {
    wrap(Node::Undefined)
}

pub fn null() -> Node {
    wrap(Node::Null)
}

pub fn this() -> Node {
    lit("this")
}

/// `@name`
pub fn this_prop(name: &str) -> Node {
    Node::Value(Value {
        base: boxed(Node::Literal(Literal {
            value: "this".to_string(),
        })),
        properties: vec![Property::Access(Access {
            name: name.to_string(),
            soak: false,
            proto: false,
        })],
        this_shorthand: true,
    })
}

// =========================================================================
// Member chains
// =========================================================================

pub fn access(base: Node, name: &str) -> Node {
    chain(
        base,
        Property::Access(Access {
            name: name.to_string(),
            soak: false,
            proto: false,
        }),
    )
}

/// `base?.name`
pub fn soak_access(base: Node, name: &str) -> Node {
    chain(
        base,
        Property::Access(Access {
            name: name.to_string(),
            soak: true,
            proto: false,
        }),
    )
}

/// `base::name`
pub fn proto_access(base: Node, name: &str) -> Node {
    chain(
        base,
        Property::Access(Access {
            name: name.to_string(),
            soak: false,
            proto: true,
        }),
    )
}

pub fn index(base: Node, index: Node) -> Node {
    chain(
        base,
        Property::Index(Index {
            index: boxed(index),
            soak: false,
        }),
    )
}

pub fn soak_index(base: Node, index: Node) -> Node {
    chain(
        base,
        Property::Index(Index {
            index: boxed(index),
            soak: true,
        }),
    )
}

pub fn slice(base: Node, from: Option<Node>, to: Option<Node>, exclusive: bool) -> Node {
    chain(
        base,
        Property::Slice(Slice {
            range: Range {
                from: from.map(boxed),
                to: to.map(boxed),
                exclusive,
            },
        }),
    )
}

// =========================================================================
// Calls and operators
// =========================================================================

pub fn call(callee: Node, args: Vec<Node>) -> Node {
    Node::Call(Call {
        variable: Some(boxed(callee)),
        args,
        soak: false,
        is_new: false,
        is_super: false,
    })
}

/// `callee?(args)`
pub fn soak_call(callee: Node, args: Vec<Node>) -> Node {
    Node::Call(Call {
        variable: Some(boxed(callee)),
        args,
        soak: true,
        is_new: false,
        is_super: false,
    })
}

pub fn new_call(callee: Node, args: Vec<Node>) -> Node {
    Node::Call(Call {
        variable: Some(boxed(callee)),
        args,
        soak: false,
        is_new: true,
        is_super: false,
    })
}

pub fn super_call(args: Vec<Node>) -> Node {
    Node::Call(Call {
        variable: None,
        args,
        soak: false,
        is_new: false,
        is_super: true,
    })
}

/// Bare `super`, which forwards the caller's arguments.
pub fn bare_super() -> Node {
    super_call(vec![splat(ident("arguments"))])
}

pub fn op(operator: &str, first: Node, second: Node) -> Node {
    Node::Op(Op {
        operator: operator.to_string(),
        first: boxed(first),
        second: Some(boxed(second)),
        flip: false,
    })
}

pub fn unary(operator: &str, operand: Node) -> Node {
    Node::Op(Op {
        operator: operator.to_string(),
        first: boxed(operand),
        second: None,
        flip: false,
    })
}

/// `x++` / `x--`
pub fn postfix(operator: &str, operand: Node) -> Node {
    Node::Op(Op {
        operator: operator.to_string(),
        first: boxed(operand),
        second: None,
        flip: true,
    })
}

pub fn contains(object: Node, array: Node) -> Node {
    Node::In(In {
        object: boxed(object),
        array: boxed(array),
        negated: false,
    })
}

pub fn not_contains(object: Node, array: Node) -> Node {
    Node::In(In {
        object: boxed(object),
        array: boxed(array),
        negated: true,
    })
}

pub fn exists(expression: Node) -> Node {
    Node::Existence(Existence {
        expression: boxed(expression),
    })
}

pub fn extends(child: Node, parent: Node) -> Node {
    Node::Extends(Extends {
        child: boxed(child),
        parent: boxed(parent),
    })
}

// =========================================================================
// Assignment
// =========================================================================

pub fn assign(variable: Node, value: Node) -> Node {
    Node::Assign(Assign {
        variable: boxed(variable),
        value: boxed(value),
        context: None,
    })
}

/// `a += b`, `a ||= b`, `a ?= b`, ...
pub fn compound(operator: &str, variable: Node, value: Node) -> Node {
    Node::Assign(Assign {
        variable: boxed(variable),
        value: boxed(value),
        context: Some(operator.to_string()),
    })
}

/// `key: value` inside an object literal or pattern.
pub fn entry(key: Node, value: Node) -> Node {
    Node::Assign(Assign {
        variable: boxed(key),
        value: boxed(value),
        context: Some("object".to_string()),
    })
}

// =========================================================================
// Functions
// =========================================================================

pub fn func(params: Vec<Node>, body: Vec<Node>) -> Node {
    Node::Code(Code {
        params,
        body: Block::new(body),
        bound: false,
        is_generator: false,
    })
}

/// `=>`
pub fn bound_func(params: Vec<Node>, body: Vec<Node>) -> Node {
    Node::Code(Code {
        params,
        body: Block::new(body),
        bound: true,
        is_generator: false,
    })
}

pub fn generator(params: Vec<Node>, body: Vec<Node>, bound: bool) -> Node {
    Node::Code(Code {
        params,
        body: Block::new(body),
        bound,
        is_generator: true,
    })
}

pub fn param(name: Node) -> Node {
    Node::Param(Param {
        name: boxed(name),
        value: None,
        splat: false,
    })
}

pub fn param_default(name: Node, value: Node) -> Node {
    Node::Param(Param {
        name: boxed(name),
        value: Some(boxed(value)),
        splat: false,
    })
}

/// `name...`
pub fn splat_param(name: Node) -> Node {
    Node::Param(Param {
        name: boxed(name),
        value: None,
        splat: true,
    })
}

pub fn splat(name: Node) -> Node {
    Node::Splat(Splat { name: boxed(name) })
}

pub const fn expansion() -> Node {
    Node::Expansion
}

// =========================================================================
// Literals with structure
// =========================================================================

pub fn obj(properties: Vec<Node>) -> Node {
    wrap(Node::Obj(Obj { properties }))
}

pub fn arr(objects: Vec<Node>) -> Node {
    wrap(Node::Arr(Arr { objects }))
}

pub fn range(from: Node, to: Node, exclusive: bool) -> Node {
    wrap(Node::Range(Range {
        from: Some(boxed(from)),
        to: Some(boxed(to)),
        exclusive,
    }))
}

pub fn parens(expression: Node) -> Node {
    wrap(Node::Parens(Parens {
        body: Block::new(vec![expression]),
    }))
}

// =========================================================================
// Classes
// =========================================================================

pub fn class(variable: Option<Node>, parent: Option<Node>, body: Vec<Node>) -> Node {
    Node::Class(Class {
        variable: variable.map(boxed),
        parent: parent.map(boxed),
        body: Block::new(body),
    })
}

/// Prototype section of a class body: `name: value` entries.
pub fn members(entries: Vec<(&str, Node)>) -> Node {
    obj(entries
        .into_iter()
        .map(|(name, value)| entry(ident(name), value))
        .collect())
}

/// `@name = value` inside a class body.
pub fn static_member(name: &str, value: Node) -> Node {
    assign(this_prop(name), value)
}

// =========================================================================
// Control flow
// =========================================================================

pub fn if_(condition: Node, then: Vec<Node>) -> Node {
    Node::If(If {
        condition: boxed(condition),
        body: Block::new(then),
        else_body: None,
    })
}

pub fn if_else(condition: Node, then: Vec<Node>, otherwise: Vec<Node>) -> Node {
    Node::If(If {
        condition: boxed(condition),
        body: Block::new(then),
        else_body: Some(Block::new(otherwise)),
    })
}

/// `unless cond`. Comparisons are inverted in place, anything else is
/// negated, matching what the parser does for `unless`.
pub fn unless(condition: Node, then: Vec<Node>) -> Node {
    if_(invert(condition), then)
}

fn invert(condition: Node) -> Node {
    const INVERSES: [(&str, &str); 8] = [
        ("==", "!="),
        ("!=", "=="),
        ("===", "!=="),
        ("!==", "==="),
        ("is", "isnt"),
        ("isnt", "is"),
        ("<", ">="),
        (">", "<="),
    ];
    match condition {
        Node::Op(mut op) if op.second.is_some() => {
            match INVERSES.iter().find(|(from, _)| *from == op.operator) {
                Some((_, to)) => {
                    op.operator = (*to).to_string();
                    Node::Op(op)
                }
                None => unary("!", parens(Node::Op(op))),
            }
        }
        other => unary("!", parens(other)),
    }
}

pub fn while_(condition: Node, body: Vec<Node>) -> Node {
    Node::While(While {
        condition: Some(boxed(condition)),
        guard: None,
        body: Block::new(body),
    })
}

pub fn while_guarded(condition: Node, guard: Node, body: Vec<Node>) -> Node {
    Node::While(While {
        condition: Some(boxed(condition)),
        guard: Some(boxed(guard)),
        body: Block::new(body),
    })
}

/// `loop`
pub fn loop_(body: Vec<Node>) -> Node {
    Node::While(While {
        condition: None,
        guard: None,
        body: Block::new(body),
    })
}

/// `for name in source`
pub fn for_in(name: Node, source: Node, body: Vec<Node>) -> For {
    For {
        body: Block::new(body),
        source: boxed(source),
        name: Some(boxed(name)),
        index: None,
        object: false,
        own: false,
        step: None,
        guard: None,
    }
}

/// `for key, value of source`
pub fn for_of(key: Node, value: Option<Node>, source: Node, body: Vec<Node>) -> For {
    For {
        body: Block::new(body),
        source: boxed(source),
        name: value.map(boxed),
        index: Some(boxed(key)),
        object: true,
        own: false,
        step: None,
        guard: None,
    }
}

impl For {
    #[must_use]
    pub fn with_index(mut self, index: Node) -> Self {
        self.index = Some(boxed(index));
        self
    }

    #[must_use]
    pub fn with_step(mut self, step: Node) -> Self {
        self.step = Some(boxed(step));
        self
    }

    #[must_use]
    pub fn with_guard(mut self, guard: Node) -> Self {
        self.guard = Some(boxed(guard));
        self
    }

    #[must_use]
    pub const fn owned(mut self) -> Self {
        self.own = true;
        self
    }
}

pub fn switch(
    subject: Option<Node>,
    cases: Vec<(Vec<Node>, Vec<Node>)>,
    otherwise: Option<Vec<Node>>,
) -> Node {
    Node::Switch(Switch {
        subject: subject.map(boxed),
        cases: cases
            .into_iter()
            .map(|(conditions, block)| SwitchCase {
                conditions,
                block: Block::new(block),
            })
            .collect(),
        otherwise: otherwise.map(Block::new),
    })
}

pub fn try_(
    attempt: Vec<Node>,
    error_variable: Option<&str>,
    recovery: Option<Vec<Node>>,
    ensure: Option<Vec<Node>>,
) -> Node {
    Node::Try(Try {
        attempt: Block::new(attempt),
        error_variable: error_variable.map(|name| boxed(ident(name))),
        recovery: recovery.map(Block::new),
        ensure: ensure.map(Block::new),
    })
}

pub fn throw(expression: Node) -> Node {
    Node::Throw(Throw {
        expression: boxed(expression),
    })
}

pub fn ret(expression: Node) -> Node {
    Node::Return(Return {
        expression: Some(boxed(expression)),
    })
}

pub fn ret_void() -> Node {
    Node::Return(Return { expression: None })
}

pub fn comment(text: &str) -> Node {
    Node::Comment(Comment {
        comment: text.to_string(),
    })
}

#[cfg(test)]
#[path = "../tests/build.rs"]
mod tests;
