//! Class bodies.
//!
//! A source class body is a list of object literals (prototype entries) and
//! `@name = value` assignments (static entries). Entries map as follows:
//!
//! | entry | target |
//! |---|---|
//! | `constructor: (args) ->` | `constructor(args) {}` |
//! | `name: (args) ->` | method |
//! | `name: (args) =>` | method, bound in the constructor |
//! | `name: value` | `Name.prototype.name = value` after the class |
//! | `@name: (args) ->`, `@name = (args) ->` | static method |
//! | `@name: value`, `@name = value` | static field |
//!
//! Anything else in a class body is rejected. Subclass constructors are
//! checked for `super` calls the target cannot express; a missing `super`
//! call is added later by the `super_calls` pass.

use smallvec::smallvec;

use csz_ast::{Class, Code, Node, Param, Property};
use csz_common::{TranspileError, TranspileResult};

use super::functions::FunctionParts;
use super::{Lowerer, Statements};
use crate::context::MapContext;
use crate::ir::{JsClass, JsClassMember, JsMethodKind, JsNode, JsPropertyKey};
use crate::passes::super_calls::contains_super_call;

/// A mapped class and its prototype data entries.
pub(super) struct MappedClass {
    pub class: JsClass,
    /// Emitted as `Name.prototype.key = value` after the class.
    pub data: Vec<(JsPropertyKey, JsNode)>,
}

/// Name declared by `class A` or `class ns.A`.
fn class_name(variable: Option<&Node>) -> Option<&str> {
    let variable = variable?;
    if let Some(name) = variable.identifier_name() {
        return Some(name);
    }
    match variable {
        Node::Value(value) => match value.properties.last() {
            Some(Property::Access(access)) => Some(&access.name),
            _ => None,
        },
        _ => None,
    }
}

/// `class ns.A` assigns the class to a member instead of declaring a name.
fn member_owner(class: &Class) -> Option<&Node> {
    class
        .variable
        .as_deref()
        .filter(|variable| variable.identifier_name().is_none())
}

/// Text a method is called by, for `super.<name>()`.
fn method_name(key: &JsPropertyKey) -> Option<&str> {
    match key {
        JsPropertyKey::Identifier(name)
        | JsPropertyKey::StringLiteral(name)
        | JsPropertyKey::NumericLiteral(name) => Some(name),
        JsPropertyKey::Computed(_) => None,
    }
}

fn is_this_target(node: &Node) -> bool {
    matches!(node, Node::Value(value) if value.base.is_this() && !value.properties.is_empty())
}

/// Any `super(...)` outside nested functions.
fn has_super_call(node: &Node) -> bool {
    match node {
        Node::Code(_) => false,
        Node::Call(call) if call.is_super => true,
        other => {
            let mut found = false;
            other.for_each_child(&mut |child| found = found || has_super_call(child));
            found
        }
    }
}

/// Walk a constructor body in evaluation order and reject a `super` call
/// that follows an assignment to a `this` member.
fn check_super_order(node: &Node, assigned_this: &mut bool) -> TranspileResult<()> {
    match node {
        Node::Code(_) => Ok(()),
        Node::Call(call) if call.is_super => {
            for arg in &call.args {
                check_super_order(arg, assigned_this)?;
            }
            if *assigned_this {
                return Err(TranspileError::illegal(
                    "super must be called before assigning to `this` in a derived class constructor",
                ));
            }
            Ok(())
        }
        Node::Assign(assign) => {
            check_super_order(&assign.value, assigned_this)?;
            if is_this_target(&assign.variable) {
                *assigned_this = true;
            }
            Ok(())
        }
        other => {
            let mut result = Ok(());
            other.for_each_child(&mut |child| {
                if result.is_ok() {
                    result = check_super_order(child, assigned_this);
                }
            });
            result
        }
    }
}

fn check_derived_constructor(code: &Code) -> TranspileResult<()> {
    let calls_super = code.body.expressions.iter().any(has_super_call);
    let this_params = code.params.iter().any(|param| {
        matches!(param, Node::Param(Param { name, .. }) if name.this_member_name().is_some())
    });
    if calls_super && this_params {
        return Err(TranspileError::illegal(
            "cannot use @-parameters in a derived class constructor that calls super",
        ));
    }
    let mut assigned_this = false;
    for expression in &code.body.expressions {
        check_super_order(expression, &mut assigned_this)?;
    }
    Ok(())
}

/// `this.name = this.name.bind(this);`
fn bind_statement(name: &str) -> JsNode {
    let method = || JsNode::prop(JsNode::This, name);
    JsNode::expr_stmt(JsNode::assign(
        method(),
        JsNode::method_call(method(), "bind", vec![JsNode::This]),
    ))
}

/// `holder.prototype.key`
fn prototype_member(holder: JsNode, key: JsPropertyKey) -> JsNode {
    let prototype = JsNode::prop(holder, "prototype");
    match key {
        JsPropertyKey::Identifier(name) => JsNode::prop(prototype, name),
        JsPropertyKey::StringLiteral(body) => JsNode::elem(prototype, JsNode::string(body)),
        JsPropertyKey::NumericLiteral(raw) => JsNode::elem(prototype, JsNode::number(raw)),
        JsPropertyKey::Computed(key) => JsNode::elem(prototype, *key),
    }
}

/// Collects the members of one class body.
struct ClassBody {
    is_subclass: bool,
    members: Vec<JsClassMember>,
    data: Vec<(JsPropertyKey, JsNode)>,
    /// Bound prototype methods, bound to the instance in the constructor.
    binds: Vec<String>,
}

impl Lowerer<'_> {
    pub(super) fn map_class_statement(
        &mut self,
        class: &Class,
        cx: MapContext<'_>,
    ) -> TranspileResult<Statements> {
        let owner = match member_owner(class) {
            Some(owner) => Some(self.map_expression(owner, cx.value())?),
            None => None,
        };
        if owner.is_none()
            && let Some(name) = class_name(class.variable.as_deref())
        {
            self.declare(name);
        }
        let MappedClass { class: mapped, data } = self.map_class(class, None, cx)?;

        let mut statements: Statements = smallvec![];
        let holder = match owner {
            Some(owner) => {
                statements.push(JsNode::expr_stmt(JsNode::assign(
                    owner.clone(),
                    JsNode::ClassExpr(mapped),
                )));
                owner
            }
            None => {
                let name = mapped.name.clone().unwrap_or_default();
                statements.push(JsNode::ClassDecl(mapped));
                JsNode::id(name)
            }
        };
        for (key, value) in data {
            statements.push(JsNode::expr_stmt(JsNode::assign(
                prototype_member(holder.clone(), key),
                value,
            )));
        }
        Ok(statements)
    }

    /// Class in expression position. A class with prototype data becomes an
    /// immediately invoked arrow that declares it, assigns the data and
    /// returns it.
    pub(super) fn map_class_expression(
        &mut self,
        class: &Class,
        name_hint: Option<&str>,
        cx: MapContext<'_>,
    ) -> TranspileResult<JsNode> {
        if let Some(owner) = member_owner(class) {
            let owner = self.map_expression(owner, cx.value())?;
            let mapped = self.map_class(class, None, cx)?;
            return Ok(JsNode::assign(owner, self.class_value(mapped)));
        }
        let mapped = self.map_class(class, name_hint, cx)?;
        Ok(self.class_value(mapped))
    }

    fn class_value(&mut self, mapped: MappedClass) -> JsNode {
        let MappedClass { mut class, data } = mapped;
        if data.is_empty() {
            return JsNode::ClassExpr(class);
        }
        let name = class
            .name
            .get_or_insert_with(|| self.names.unused("_Class"))
            .clone();
        let mut body = vec![JsNode::ClassDecl(class)];
        for (key, value) in data {
            body.push(JsNode::expr_stmt(JsNode::assign(
                prototype_member(JsNode::id(name.clone()), key),
                value,
            )));
        }
        body.push(JsNode::ret(Some(JsNode::id(name))));
        JsNode::iife(body)
    }

    fn map_class(
        &mut self,
        class: &Class,
        name_hint: Option<&str>,
        cx: MapContext<'_>,
    ) -> TranspileResult<MappedClass> {
        let name = class_name(class.variable.as_deref())
            .or(name_hint)
            .map(str::to_string);
        let superclass = match &class.parent {
            Some(parent) => Some(Box::new(self.map_expression(parent, cx.value())?)),
            None => None,
        };

        let mut body = ClassBody {
            is_subclass: superclass.is_some(),
            members: Vec::new(),
            data: Vec::new(),
            binds: Vec::new(),
        };
        for expression in &class.body.expressions {
            match expression.unwrapped() {
                Node::Comment(_) => {}
                Node::Obj(obj) => {
                    for entry in &obj.properties {
                        match entry {
                            Node::Comment(_) => {}
                            Node::Assign(assign) if assign.context.as_deref() == Some("object") => {
                                self.map_class_entry(&assign.variable, &assign.value, &mut body, cx)?;
                            }
                            other => {
                                return Err(TranspileError::unsupported(
                                    other.unwrapped().kind(),
                                    "ClassMember",
                                ));
                            }
                        }
                    }
                }
                Node::Assign(assign)
                    if assign.context.is_none() && assign.variable.this_member_name().is_some() =>
                {
                    self.map_class_entry(&assign.variable, &assign.value, &mut body, cx)?;
                }
                _ => {
                    return Err(TranspileError::illegal(
                        "class bodies may only contain methods and properties, \
                         not private statements",
                    ));
                }
            }
        }

        let ClassBody {
            mut members,
            data,
            binds,
            ..
        } = body;
        bind_methods(&mut members, &binds);
        Ok(MappedClass {
            class: JsClass {
                name,
                superclass,
                members,
            },
            data,
        })
    }

    fn map_class_entry(
        &mut self,
        variable: &Node,
        value: &Node,
        body: &mut ClassBody,
        cx: MapContext<'_>,
    ) -> TranspileResult<()> {
        let static_name = variable.this_member_name();
        let is_static = static_name.is_some();
        let key = match static_name {
            Some(name) => JsPropertyKey::Identifier(name.to_string()),
            None => self.property_key(variable, cx)?,
        };

        let Node::Code(code) = value.unwrapped() else {
            let value = self.map_expression(value, cx.value())?;
            if is_static {
                body.members.push(JsClassMember::Field {
                    key,
                    is_static,
                    value,
                });
            } else {
                body.data.push((key, value));
            }
            return Ok(());
        };

        let name = method_name(&key).map(str::to_string);
        let is_constructor = !is_static && name.as_deref() == Some("constructor");
        if is_constructor && body.is_subclass {
            check_derived_constructor(code)?;
        }
        if code.bound && !is_static && !is_constructor {
            if let Some(name) = &name {
                body.binds.push(name.clone());
            }
        }

        let body_cx = match &name {
            Some(name) => MapContext::default().for_method(name, body.is_subclass),
            None => MapContext::default().for_plain_function(),
        };
        let FunctionParts {
            params,
            body: statements,
        } = self.map_function_parts(code, body_cx, !is_constructor)?;
        body.members.push(JsClassMember::Method {
            kind: if is_constructor {
                JsMethodKind::Constructor
            } else {
                JsMethodKind::Method
            },
            key,
            is_static,
            params,
            body: statements,
            generator: code.is_generator,
        });
        Ok(())
    }
}

/// Insert `this.m = this.m.bind(this)` for every bound method, after the
/// constructor's `super` call. A constructor is added first when the class
/// has none.
fn bind_methods(members: &mut Vec<JsClassMember>, binds: &[String]) {
    if binds.is_empty() {
        return;
    }
    let has_constructor = members.iter().any(|member| {
        matches!(
            member,
            JsClassMember::Method {
                kind: JsMethodKind::Constructor,
                ..
            }
        )
    });
    if !has_constructor {
        members.insert(
            0,
            JsClassMember::Method {
                kind: JsMethodKind::Constructor,
                key: JsPropertyKey::Identifier("constructor".to_string()),
                is_static: false,
                params: Vec::new(),
                body: Vec::new(),
                generator: false,
            },
        );
    }
    let mut class = JsClass {
        name: None,
        superclass: None,
        members: std::mem::take(members),
    };
    if let Some(body) = class.constructor_mut() {
        let at = body
            .iter_mut()
            .position(contains_super_call)
            .map_or(0, |index| index + 1);
        for (offset, name) in binds.iter().enumerate() {
            body.insert(at + offset, bind_statement(name));
        }
    }
    *members = class.members;
}
