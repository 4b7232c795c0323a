//! Runtime helpers emitted at the top of the program.
//!
//! A helper is requested by name during mapping; the registry reserves a
//! collision-free identifier for it on first use and hands the same
//! identifier back on every later request. After the passes run, one
//! definition per requested helper is prepended to the program.

use indexmap::IndexMap;

use crate::ir::*;
use crate::scope::NameGenerator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Helper {
    /// Floored modulo: `modulo(a, b)`.
    Modulo,
    /// Prototype-chain extension used by the `extends` operator.
    Extend,
    /// `{}.hasOwnProperty`, required by `Extend`.
    HasProp,
}

impl Helper {
    pub const fn base_name(self) -> &'static str {
        match self {
            Self::Modulo => "modulo",
            Self::Extend => "extend",
            Self::HasProp => "hasProp",
        }
    }

    const fn dependencies(self) -> &'static [Helper] {
        match self {
            Self::Extend => &[Self::HasProp],
            Self::Modulo | Self::HasProp => &[],
        }
    }
}

/// Helpers requested during one compilation, in first-use order.
#[derive(Debug, Default)]
pub struct HelperRegistry {
    names: IndexMap<Helper, String>,
}

impl HelperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier bound to `helper`, reserving one on first use.
    pub fn require(&mut self, helper: Helper, names: &mut NameGenerator) -> String {
        for &dependency in helper.dependencies() {
            self.require(dependency, names);
        }
        self.names
            .entry(helper)
            .or_insert_with(|| names.fresh(helper.base_name()))
            .clone()
    }

    pub fn name(&self, helper: Helper) -> Option<&str> {
        self.names.get(&helper).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// One `var` statement per requested helper.
    pub fn definitions(&self) -> Vec<JsNode> {
        self.names
            .iter()
            .map(|(&helper, name)| {
                let value = match helper {
                    Helper::Modulo => modulo_function(),
                    Helper::HasProp => {
                        JsNode::prop(JsNode::ObjectLiteral(Vec::new()), "hasOwnProperty")
                    }
                    Helper::Extend => {
                        let has_prop = self
                            .name(Helper::HasProp)
                            .unwrap_or(Helper::HasProp.base_name());
                        extend_function(has_prop)
                    }
                };
                JsNode::var_decl(JsNode::id(name.clone()), Some(value))
            })
            .collect()
    }
}

/// `function(a, b) { return (+a % (b = +b) + b) % b; }`
fn modulo_function() -> JsNode {
    let a = JsNode::unary("+", JsNode::id("a"));
    let b = JsNode::assign(JsNode::id("b"), JsNode::unary("+", JsNode::id("b")));
    let remainder = JsNode::binary(a, "%", b);
    let shifted = JsNode::binary(remainder, "+", JsNode::id("b"));
    JsNode::func(
        vec![JsNode::id("a"), JsNode::id("b")],
        vec![JsNode::ret(Some(JsNode::binary(shifted, "%", JsNode::id("b"))))],
    )
}

/// Copies own properties of `parent` onto `child` and links the prototypes.
fn extend_function(has_prop: &str) -> JsNode {
    let child = || JsNode::id("child");
    let parent = || JsNode::id("parent");
    let key = || JsNode::id("key");

    let copy = JsNode::ForInStatement {
        binding: Box::new(key()),
        object: Box::new(parent()),
        body: vec![JsNode::IfStatement {
            condition: Box::new(JsNode::method_call(
                JsNode::id(has_prop),
                "call",
                vec![parent(), key()],
            )),
            then_branch: vec![JsNode::expr_stmt(JsNode::assign(
                JsNode::elem(child(), key()),
                JsNode::elem(parent(), key()),
            ))],
            else_branch: None,
        }],
    };
    let ctor = JsNode::var_decl(
        JsNode::id("ctor"),
        Some(JsNode::func(
            Vec::new(),
            vec![JsNode::expr_stmt(JsNode::assign(
                JsNode::prop(JsNode::This, "constructor"),
                child(),
            ))],
        )),
    );
    let link = |target: JsNode, value: JsNode| JsNode::expr_stmt(JsNode::assign(target, value));

    JsNode::func(
        vec![child(), parent()],
        vec![
            copy,
            ctor,
            link(
                JsNode::prop(JsNode::id("ctor"), "prototype"),
                JsNode::prop(parent(), "prototype"),
            ),
            link(
                JsNode::prop(child(), "prototype"),
                JsNode::new_expr(JsNode::id("ctor"), Vec::new()),
            ),
            link(
                JsNode::prop(child(), "__super__"),
                JsNode::prop(parent(), "prototype"),
            ),
            JsNode::ret(Some(child())),
        ],
    )
}

#[cfg(test)]
#[path = "../tests/helpers.rs"]
mod tests;
