use super::*;
use crate::ir::{JsCatchClause, JsNode};
use crate::ir_printer::IrPrinter;

fn print(statements: Vec<JsNode>) -> String {
    IrPrinter::emit_to_string(&JsNode::Program(statements))
}

fn declared(mut statements: Vec<JsNode>) -> String {
    insert_declarations(&mut statements);
    print(statements)
}

fn assign_stmt(name: &str, value: JsNode) -> JsNode {
    JsNode::expr_stmt(JsNode::assign(JsNode::id(name), value))
}

#[test]
fn test_first_assignment_declares_once() {
    let program = vec![
        assign_stmt("bam", JsNode::string("hello")),
        assign_stmt("bam", JsNode::string("bye")),
    ];
    assert_eq!(declared(program), "var bam = \"hello\";\nbam = \"bye\";");
}

#[test]
fn test_nested_assignment_is_hoisted() {
    let function = JsNode::func(
        vec![],
        vec![
            assign_stmt("c", JsNode::string("booooo")),
            JsNode::ret(Some(JsNode::assign(JsNode::id("a"), JsNode::number("123")))),
        ],
    );
    let program = vec![JsNode::expr_stmt(JsNode::binary(
        JsNode::number("4"),
        "+",
        JsNode::assign(JsNode::id("b"), function).paren(),
    ))];
    assert_eq!(
        declared(program),
        "var b;\n\n4 + (b = function() {\n  var a;\n  var c = \"booooo\";\n  return a = 123;\n});"
    );
}

#[test]
fn test_hoisted_names_are_unshifted_in_turn() {
    let program = vec![JsNode::expr_stmt(JsNode::call(
        JsNode::id("f"),
        vec![
            JsNode::assign(JsNode::id("a"), JsNode::number("1")),
            JsNode::assign(JsNode::id("b"), JsNode::number("2")),
        ],
    ))];
    assert_eq!(declared(program), "var b;\nvar a;\nf(a = 1, b = 2);");
}

#[test]
fn test_self_referencing_function_does_not_shadow() {
    let program = vec![assign_stmt(
        "b",
        JsNode::func(vec![], vec![assign_stmt("b", JsNode::NullLiteral)]),
    )];
    assert_eq!(declared(program), "var b = function() {\n  b = null;\n};");
}

#[test]
fn test_outer_assignment_is_visible_regardless_of_order() {
    let program = vec![
        assign_stmt(
            "f",
            JsNode::func(vec![], vec![assign_stmt("x", JsNode::number("1"))]),
        ),
        assign_stmt("x", JsNode::number("2")),
    ];
    assert_eq!(
        declared(program),
        "var f = function() {\n  x = 1;\n};\n\nvar x = 2;"
    );
}

#[test]
fn test_parameters_are_bound() {
    let program = vec![JsNode::expr_stmt(JsNode::func(
        vec![JsNode::id("a")],
        vec![assign_stmt("a", JsNode::number("1"))],
    ))];
    assert_eq!(declared(program), "(function(a) {\n  a = 1;\n});");
}

#[test]
fn test_member_targets_are_never_declared() {
    let program = vec![JsNode::expr_stmt(JsNode::assign(
        JsNode::prop(JsNode::This, "x"),
        JsNode::number("1"),
    ))];
    assert_eq!(declared(program), "this.x = 1;");

    let mixed = vec![JsNode::expr_stmt(JsNode::assign(
        JsNode::ArrayPattern(vec![JsNode::id("a"), JsNode::prop(JsNode::This, "b")]),
        JsNode::id("xs"),
    ))];
    assert_eq!(declared(mixed), "var a;\n[a, this.b] = xs;");
}

#[test]
fn test_fragment_temporaries_are_hoisted() {
    let program = vec![JsNode::expr_stmt(JsNode::Fragment {
        code: "(ref = f()) != null ? ref : 0".into(),
        temps: vec!["ref".into()],
        atomic: false,
    })];
    assert_eq!(
        declared(program),
        "var ref;\n(ref = f()) != null ? ref : 0;"
    );
}

#[test]
fn test_loop_binding_is_scoped_to_the_loop() {
    let program = vec![JsNode::ForOfStatement {
        binding: Box::new(JsNode::id("x")),
        iterable: Box::new(JsNode::id("xs")),
        body: vec![assign_stmt("x", JsNode::number("1"))],
    }];
    assert_eq!(declared(program), "for (let x of xs) {\n  x = 1;\n}");
}

#[test]
fn test_catch_parameter_is_bound() {
    let program = vec![JsNode::TryStatement {
        block: vec![],
        handler: Some(Box::new(JsCatchClause {
            param: Some(JsNode::id("e")),
            body: vec![assign_stmt("e", JsNode::NullLiteral)],
        })),
        finalizer: None,
    }];
    assert_eq!(declared(program), "try {} catch (e) {\n  e = null;\n}");
}

#[test]
fn test_declare_in_functions_consults_outer_bindings() {
    let mut node = JsNode::arrow(
        vec![],
        vec![
            assign_stmt("x", JsNode::number("1")),
            assign_stmt("y", JsNode::number("2")),
        ],
    );
    declare_in_functions(&mut node, &|name| name == "x");
    assert_eq!(
        IrPrinter::emit_to_string(&node),
        "() => {\n  x = 1;\n  var y = 2;\n}"
    );
}
