//! Input node types.
//!
//! One variant per production of the source grammar. Field names follow the
//! front-end's own node fields (camelCase on the wire) so a JSON dump of a
//! parsed program deserializes directly into this model.

use serde::{Deserialize, Serialize};

/// A node of the source-language tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    // =========================================================================
    // Containers
    // =========================================================================
    /// Sequence of expressions/statements: program root and every body.
    Block(Block),

    // =========================================================================
    // Literals
    // =========================================================================
    /// Raw literal token: numbers, strings, regexes, identifiers, `this`,
    /// and the statement keywords `break`, `continue` and `debugger`.
    Literal(Literal),

    /// Embedded JavaScript, spliced into the output verbatim.
    PassthroughLiteral(Literal),

    /// Boolean keyword (`true`, `yes`, `on`, `false`, `no`, `off`).
    Bool(Bool),

    Undefined,

    Null,

    // =========================================================================
    // Expressions
    // =========================================================================
    /// A base expression followed by a chain of member accesses.
    Value(Value),

    Call(Call),

    /// Unary or binary operator.
    Op(Op),

    /// Membership test: `x in xs`.
    In(In),

    /// Existence check: `x?`.
    Existence(Existence),

    Assign(Assign),

    /// Function literal (`->`, `=>`).
    Code(Code),

    Param(Param),

    /// `xs...` in argument lists, array literals and parameter lists.
    Splat(Splat),

    /// Bare `...` placeholder in a parameter list or array pattern.
    Expansion,

    Class(Class),

    Obj(Obj),

    Arr(Arr),

    Range(Range),

    Parens(Parens),

    /// `extends` used as an operator on plain objects.
    Extends(Extends),

    // =========================================================================
    // Control flow
    // =========================================================================
    If(If),

    While(While),

    For(For),

    Switch(Switch),

    Try(Try),

    Throw(Throw),

    Return(Return),

    /// Block comment (`###`).
    Comment(Comment),
}

/// Member-chain entry attached to a `Value`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Property {
    /// `.name`, `?.name`, `::name`
    Access(Access),
    /// `[expr]`, `?[expr]`
    Index(Index),
    /// `[a..b]`, `[a...b]`
    Slice(Slice),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub expressions: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bool {
    pub val: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Value {
    pub base: Box<Node>,
    #[serde(default)]
    pub properties: Vec<Property>,
    /// Set by the front-end for `@name` shorthand.
    #[serde(default, rename = "this")]
    pub this_shorthand: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Access {
    pub name: String,
    #[serde(default)]
    pub soak: bool,
    /// `::` prototype access.
    #[serde(default)]
    pub proto: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Index {
    pub index: Box<Node>,
    #[serde(default)]
    pub soak: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Slice {
    pub range: Range,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Call {
    /// Callee; absent for a bare `super` call.
    #[serde(default)]
    pub variable: Option<Box<Node>>,
    #[serde(default)]
    pub args: Vec<Node>,
    #[serde(default)]
    pub soak: bool,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_super: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Op {
    pub operator: String,
    pub first: Box<Node>,
    #[serde(default)]
    pub second: Option<Box<Node>>,
    /// Postfix form of `++`/`--`.
    #[serde(default)]
    pub flip: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct In {
    pub object: Box<Node>,
    pub array: Box<Node>,
    #[serde(default)]
    pub negated: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Existence {
    pub expression: Box<Node>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Assign {
    pub variable: Box<Node>,
    pub value: Box<Node>,
    /// Compound operator (`+=`, `||=`, `?=`, ...) or `object` for an object
    /// literal entry.
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Code {
    /// `Param` and `Expansion` nodes.
    #[serde(default)]
    pub params: Vec<Node>,
    #[serde(default)]
    pub body: Block,
    #[serde(default)]
    pub bound: bool,
    #[serde(default)]
    pub is_generator: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: Box<Node>,
    #[serde(default)]
    pub value: Option<Box<Node>>,
    #[serde(default)]
    pub splat: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Splat {
    pub name: Box<Node>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Class {
    #[serde(default)]
    pub variable: Option<Box<Node>>,
    #[serde(default)]
    pub parent: Option<Box<Node>>,
    #[serde(default)]
    pub body: Block,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Obj {
    /// `Assign` entries (context `object`) and shorthand `Value` entries.
    #[serde(default)]
    pub properties: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Arr {
    #[serde(default)]
    pub objects: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Range {
    #[serde(default)]
    pub from: Option<Box<Node>>,
    #[serde(default)]
    pub to: Option<Box<Node>>,
    #[serde(default)]
    pub exclusive: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parens {
    pub body: Block,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Extends {
    pub child: Box<Node>,
    pub parent: Box<Node>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct If {
    pub condition: Box<Node>,
    pub body: Block,
    #[serde(default)]
    pub else_body: Option<Block>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct While {
    /// Absent for `loop`.
    #[serde(default)]
    pub condition: Option<Box<Node>>,
    #[serde(default)]
    pub guard: Option<Box<Node>>,
    #[serde(default)]
    pub body: Block,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct For {
    #[serde(default)]
    pub body: Block,
    pub source: Box<Node>,
    /// Element binding; the value binding for `of` loops.
    #[serde(default)]
    pub name: Option<Box<Node>>,
    /// Index binding; the key binding for `of` loops.
    #[serde(default)]
    pub index: Option<Box<Node>>,
    /// `for k, v of obj`
    #[serde(default)]
    pub object: bool,
    #[serde(default)]
    pub own: bool,
    #[serde(default)]
    pub step: Option<Box<Node>>,
    #[serde(default)]
    pub guard: Option<Box<Node>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Switch {
    #[serde(default)]
    pub subject: Option<Box<Node>>,
    #[serde(default)]
    pub cases: Vec<SwitchCase>,
    #[serde(default)]
    pub otherwise: Option<Block>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SwitchCase {
    pub conditions: Vec<Node>,
    pub block: Block,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Try {
    pub attempt: Block,
    #[serde(default)]
    pub error_variable: Option<Box<Node>>,
    #[serde(default)]
    pub recovery: Option<Block>,
    #[serde(default)]
    pub ensure: Option<Block>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Throw {
    pub expression: Box<Node>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Return {
    #[serde(default)]
    pub expression: Option<Box<Node>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub comment: String,
}

// =========================================================================
// Inspection helpers
// =========================================================================

impl Node {
    /// Variant tag, as reported in translation errors.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Block(_) => "Block",
            Self::Literal(_) => "Literal",
            Self::PassthroughLiteral(_) => "PassthroughLiteral",
            Self::Bool(_) => "Bool",
            Self::Undefined => "Undefined",
            Self::Null => "Null",
            Self::Value(_) => "Value",
            Self::Call(_) => "Call",
            Self::Op(_) => "Op",
            Self::In(_) => "In",
            Self::Existence(_) => "Existence",
            Self::Assign(_) => "Assign",
            Self::Code(_) => "Code",
            Self::Param(_) => "Param",
            Self::Splat(_) => "Splat",
            Self::Expansion => "Expansion",
            Self::Class(_) => "Class",
            Self::Obj(_) => "Obj",
            Self::Arr(_) => "Arr",
            Self::Range(_) => "Range",
            Self::Parens(_) => "Parens",
            Self::Extends(_) => "Extends",
            Self::If(_) => "If",
            Self::While(_) => "While",
            Self::For(_) => "For",
            Self::Switch(_) => "Switch",
            Self::Try(_) => "Try",
            Self::Throw(_) => "Throw",
            Self::Return(_) => "Return",
            Self::Comment(_) => "Comment",
        }
    }

    /// Strip `Value` wrappers that carry no member chain.
    pub fn unwrapped(&self) -> &Node {
        match self {
            Self::Value(value) if value.properties.is_empty() => value.base.unwrapped(),
            _ => self,
        }
    }

    /// Raw token text when this node is (a wrapper around) a plain literal.
    pub fn literal_text(&self) -> Option<&str> {
        match self.unwrapped() {
            Self::Literal(literal) => Some(literal.value.as_str()),
            _ => None,
        }
    }

    /// Name when this node is (a wrapper around) a bare identifier.
    pub fn identifier_name(&self) -> Option<&str> {
        self.literal_text().filter(|text| is_identifier(text))
    }

    pub fn is_this(&self) -> bool {
        self.literal_text() == Some("this")
    }

    /// `@name` or `this.name`: a value chain rooted at `this` with exactly
    /// one plain access. Returns the accessed name.
    pub fn this_member_name(&self) -> Option<&str> {
        let Self::Value(value) = self else {
            return None;
        };
        if !value.base.is_this() || value.properties.len() != 1 {
            return None;
        }
        match &value.properties[0] {
            Property::Access(access) if !access.soak && !access.proto => Some(&access.name),
            _ => None,
        }
    }

    /// Keyword literal that only exists in statement position.
    pub fn is_statement_keyword(&self) -> bool {
        matches!(
            self.literal_text(),
            Some("break" | "continue" | "debugger")
        )
    }

    pub const fn as_block(&self) -> Option<&Block> {
        match self {
            Self::Block(block) => Some(block),
            _ => None,
        }
    }
}

impl Block {
    pub const fn new(expressions: Vec<Node>) -> Self {
        Self { expressions }
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    /// The only expression of a one-expression block.
    pub fn single(&self) -> Option<&Node> {
        match self.expressions.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}

impl Value {
    pub fn has_soak(&self) -> bool {
        self.properties.iter().any(Property::is_soak)
    }
}

impl Property {
    pub const fn is_soak(&self) -> bool {
        match self {
            Self::Access(access) => access.soak,
            Self::Index(index) => index.soak,
            Self::Slice(_) => false,
        }
    }
}

/// True for a token that is a plain identifier name.
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
#[path = "../tests/node.rs"]
mod tests;
