use super::*;
use crate::ir::{JsCatchClause, JsSwitchCase};
use crate::ir_printer::IrPrinter;

fn call(name: &str) -> JsNode {
    JsNode::expr_stmt(JsNode::call(JsNode::id(name), vec![]))
}

fn with_returns(mut body: Vec<JsNode>) -> String {
    add_implicit_returns(&mut body);
    IrPrinter::emit_to_string(&JsNode::Program(body))
}

#[test]
fn test_last_expression_is_returned() {
    assert_eq!(with_returns(vec![call("a"), call("b")]), "a();\nreturn b();");
}

#[test]
fn test_trailing_comment_is_skipped() {
    assert_eq!(
        with_returns(vec![call("a"), JsNode::Comment("done".into())]),
        "return a();\n/* done */"
    );
}

#[test]
fn test_statements_without_value_are_left_alone() {
    let body = vec![JsNode::var_decl(JsNode::id("x"), Some(JsNode::number("1")))];
    assert_eq!(with_returns(body), "var x = 1;");

    let raw = vec![JsNode::expr_stmt(JsNode::Raw("var b = 1".into()))];
    assert_eq!(with_returns(raw), "var b = 1;");

    let throw = vec![JsNode::ThrowStatement(Box::new(JsNode::id("e")))];
    assert_eq!(with_returns(throw), "throw e;");
}

#[test]
fn test_both_if_arms_return() {
    let nested = JsNode::IfStatement {
        condition: Box::new(JsNode::id("y")),
        then_branch: vec![call("b")],
        else_branch: Some(Box::new(JsNode::Block(vec![call("c")]))),
    };
    let body = vec![JsNode::IfStatement {
        condition: Box::new(JsNode::id("x")),
        then_branch: vec![call("a")],
        else_branch: Some(Box::new(nested)),
    }];
    assert_eq!(
        with_returns(body),
        "if (x) {\n  return a();\n} else if (y) {\n  return b();\n} else {\n  return c();\n}"
    );
}

#[test]
fn test_every_switch_case_returns() {
    let body = vec![JsNode::SwitchStatement {
        discriminant: Box::new(JsNode::id("x")),
        cases: vec![
            JsSwitchCase {
                test: Some(JsNode::number("1")),
                consequent: vec![],
                shares_body: true,
            },
            JsSwitchCase {
                test: Some(JsNode::number("2")),
                consequent: vec![call("a")],
                shares_body: false,
            },
            JsSwitchCase {
                test: None,
                consequent: vec![call("b")],
                shares_body: false,
            },
        ],
    }];
    assert_eq!(
        with_returns(body),
        "switch (x) {\ncase 1:\ncase 2:\n  return a();\ndefault:\n  return b();\n}"
    );
}

#[test]
fn test_try_and_catch_return_but_finally_does_not() {
    let body = vec![JsNode::TryStatement {
        block: vec![call("a")],
        handler: Some(Box::new(JsCatchClause {
            param: Some(JsNode::id("e")),
            body: vec![call("b")],
        })),
        finalizer: Some(vec![call("c")]),
    }];
    assert_eq!(
        with_returns(body),
        "try {\n  return a();\n} catch (e) {\n  return b();\n} finally {\n  c();\n}"
    );
}
