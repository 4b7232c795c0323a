//! Class bodies, constructors and `super`.

use csz_ast::Node;
use csz_ast::build::*;
use csz_common::{CompileOptions, TranspileError};
use csz_emitter::transpile;

fn js(statements: Vec<Node>) -> String {
    transpile(&block(statements), &CompileOptions::default()).expect("compiles")
}

fn js_err(statements: Vec<Node>) -> TranspileError {
    transpile(&block(statements), &CompileOptions::default()).expect_err("must fail")
}

fn named(name: &str, parent: Option<&str>, body: Vec<Node>) -> Node {
    class(Some(ident(name)), parent.map(ident), body)
}

#[test]
fn test_constructor_and_methods() {
    let body = members(vec![
        ("constructor", func(vec![param(this_prop("x"))], vec![])),
        ("m", func(vec![], vec![ident("x")])),
    ]);
    assert_eq!(
        js(vec![named("A", None, vec![body])]),
        "class A {\n  constructor(x) {\n    this.x = x;\n  }\n\n  m() {\n    return x;\n  }\n}"
    );
}

#[test]
fn test_derived_constructor_forwards_arguments() {
    let body = members(vec![(
        "constructor",
        func(vec![], vec![assign(this_prop("a"), num("1"))]),
    )]);
    assert_eq!(
        js(vec![named("A", Some("B"), vec![body])]),
        "class A extends B {\n  constructor() {\n    super(...arguments);\n    this.a = 1;\n  }\n}"
    );
}

#[test]
fn test_super_in_method_calls_parent_method() {
    let body = members(vec![(
        "m",
        func(vec![param(ident("x"))], vec![super_call(vec![ident("x")])]),
    )]);
    assert_eq!(
        js(vec![named("A", Some("B"), vec![body])]),
        "class A extends B {\n  m(x) {\n    return super.m(x);\n  }\n}"
    );

    let body = members(vec![("m", func(vec![], vec![bare_super()]))]);
    assert_eq!(
        js(vec![named("A", Some("B"), vec![body])]),
        "class A extends B {\n  m() {\n    return super.m(...arguments);\n  }\n}"
    );
}

#[test]
fn test_bare_super_in_bound_function_is_illegal() {
    let inner = bound_func(vec![param(ident("x"))], vec![bare_super()]);
    let body = members(vec![("m", func(vec![], vec![inner]))]);
    let err = js_err(vec![named("A", Some("B"), vec![body])]);
    assert!(err.is_illegal_source(), "{err:?}");
}

#[test]
fn test_explicit_super_in_bound_function_reaches_method() {
    let inner = bound_func(vec![], vec![super_call(vec![num("1")])]);
    let body = members(vec![("m", func(vec![], vec![inner]))]);
    assert_eq!(
        js(vec![named("A", Some("B"), vec![body])]),
        "class A extends B {\n  m() {\n    return () => {\n      return super.m(1);\n    };\n  }\n}"
    );
}

#[test]
fn test_this_parameters_with_super_are_illegal() {
    let body = members(vec![(
        "constructor",
        func(vec![param(this_prop("a"))], vec![super_call(vec![])]),
    )]);
    let err = js_err(vec![named("A", Some("B"), vec![body])]);
    assert!(err.is_illegal_source(), "{err:?}");
}

#[test]
fn test_super_after_this_assignment_is_illegal() {
    let body = members(vec![(
        "constructor",
        func(
            vec![],
            vec![assign(this_prop("a"), num("1")), super_call(vec![])],
        ),
    )]);
    let err = js_err(vec![named("A", Some("B"), vec![body])]);
    assert!(err.is_illegal_source(), "{err:?}");
}

#[test]
fn test_bound_method_gets_constructor() {
    let body = members(vec![(
        "m",
        bound_func(vec![], vec![call(ident("f"), vec![])]),
    )]);
    assert_eq!(
        js(vec![named("A", None, vec![body])]),
        "class A {\n  constructor() {\n    this.m = this.m.bind(this);\n  }\n\n  \
         m() {\n    return f();\n  }\n}"
    );
}

#[test]
fn test_bound_method_is_bound_after_super() {
    let body = members(vec![
        (
            "constructor",
            func(vec![], vec![super_call(vec![]), call(ident("f"), vec![])]),
        ),
        ("m", bound_func(vec![], vec![])),
    ]);
    let output = js(vec![named("A", Some("B"), vec![body])]);
    assert!(
        output.contains("super();\n    this.m = this.m.bind(this);\n    f();"),
        "{output}"
    );
}

#[test]
fn test_static_members() {
    let body = vec![
        static_member("b", arr(vec![num("1")])),
        static_member("make", func(vec![], vec![new_call(ident("A"), vec![])])),
    ];
    assert_eq!(
        js(vec![named("A", None, body)]),
        "class A {\n  static b = [1];\n\n  static make() {\n    return new A();\n  }\n}"
    );
}

#[test]
fn test_prototype_data_follows_class() {
    let body = members(vec![("x", num("1"))]);
    assert_eq!(
        js(vec![named("A", None, vec![body])]),
        "class A {}\nA.prototype.x = 1;"
    );
}

#[test]
fn test_class_expression_with_data_is_wrapped() {
    let anonymous = class(None, None, vec![members(vec![("x", num("1"))])]);
    assert_eq!(
        js(vec![assign(ident("Foo"), anonymous)]),
        "var Foo = (() => {\n  class Foo {}\n  Foo.prototype.x = 1;\n  return Foo;\n})();"
    );
}

#[test]
fn test_class_expression_takes_assigned_name() {
    let anonymous = class(None, None, vec![members(vec![("m", func(vec![], vec![]))])]);
    assert_eq!(
        js(vec![assign(ident("Foo"), anonymous)]),
        "var Foo = class Foo {\n  m() {}\n};"
    );
}

#[test]
fn test_private_statement_in_body_is_illegal() {
    let err = js_err(vec![named("A", None, vec![call(ident("f"), vec![])])]);
    assert!(err.is_illegal_source(), "{err:?}");
}

#[test]
fn test_namespaced_class_assigns_member() {
    let namespaced = class(Some(access(ident("ns"), "A")), None, vec![]);
    assert_eq!(js(vec![namespaced]), "ns.A = class A {};");
}
