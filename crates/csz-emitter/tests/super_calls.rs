use super::*;
use crate::ir::{JsClassMember, JsMethodKind, JsPropertyKey};
use crate::ir_printer::IrPrinter;

fn constructor(body: Vec<JsNode>) -> JsClassMember {
    JsClassMember::Method {
        kind: JsMethodKind::Constructor,
        key: JsPropertyKey::Identifier("constructor".into()),
        is_static: false,
        params: vec![],
        body,
        generator: false,
    }
}

fn class(superclass: Option<&str>, members: Vec<JsClassMember>) -> JsNode {
    JsNode::ClassDecl(JsClass {
        name: Some("A".into()),
        superclass: superclass.map(|name| Box::new(JsNode::id(name))),
        members,
    })
}

fn super_call() -> JsNode {
    JsNode::expr_stmt(JsNode::call(JsNode::Super, vec![JsNode::string("boom")]))
}

fn with_super_calls(node: JsNode) -> String {
    let mut program = vec![node];
    insert_super_calls(&mut program);
    IrPrinter::emit_to_string(&JsNode::Program(program))
}

#[test]
fn test_derived_constructor_gets_forwarding_super_call() {
    let node = class(
        Some("B"),
        vec![constructor(vec![JsNode::expr_stmt(JsNode::assign(
            JsNode::prop(JsNode::This, "a"),
            JsNode::number("1"),
        ))])],
    );
    assert_eq!(
        with_super_calls(node),
        "class A extends B {\n  constructor() {\n    super(...arguments);\n    this.a = 1;\n  }\n}"
    );
}

#[test]
fn test_existing_super_call_is_kept() {
    let node = class(Some("B"), vec![constructor(vec![super_call()])]);
    assert_eq!(
        with_super_calls(node),
        "class A extends B {\n  constructor() {\n    super(\"boom\");\n  }\n}"
    );
}

#[test]
fn test_super_call_in_nested_function_does_not_count() {
    let nested = JsNode::expr_stmt(JsNode::func(vec![], vec![super_call()]));
    let mut node = nested.clone();
    assert!(!contains_super_call(&mut node));
    let printed = with_super_calls(class(Some("B"), vec![constructor(vec![nested])]));
    assert!(printed.contains("constructor() {\n    super(...arguments);"), "{printed}");
}

#[test]
fn test_base_classes_and_implicit_constructors_are_untouched() {
    let base = class(None, vec![constructor(vec![])]);
    assert_eq!(with_super_calls(base), "class A {\n  constructor() {}\n}");

    let implicit = class(Some("B"), vec![]);
    assert_eq!(with_super_calls(implicit), "class A extends B {}");
}
