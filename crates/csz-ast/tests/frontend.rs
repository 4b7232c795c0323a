use super::*;
use crate::build;

#[test]
fn test_json_frontend_parses_block() {
    let source = r#"{
        "type": "Block",
        "expressions": [
            {
                "type": "Assign",
                "variable": {"type": "Value", "base": {"type": "Literal", "value": "a"}},
                "value": {"type": "Value", "base": {"type": "Literal", "value": "1"}}
            }
        ]
    }"#;
    let node = JsonFrontend.parse(source).expect("valid dump");
    let expected = build::block(vec![build::assign(build::ident("a"), build::num("1"))]);
    assert_eq!(node, expected);
}

#[test]
fn test_json_frontend_reads_camel_case_fields() {
    let source = r#"{
        "type": "Call",
        "variable": {"type": "Value", "base": {"type": "Literal", "value": "Foo"}},
        "args": [],
        "isNew": true
    }"#;
    let node = JsonFrontend.parse(source).expect("valid dump");
    let Node::Block(block) = node else {
        panic!("root should be wrapped in a block");
    };
    let Some(Node::Call(call)) = block.single() else {
        panic!("expected a single call");
    };
    assert!(call.is_new);
    assert!(!call.is_super);
}

#[test]
fn test_json_frontend_reads_value_this_flag() {
    let source = r#"{
        "type": "Value",
        "base": {"type": "Literal", "value": "this"},
        "properties": [{"type": "Access", "name": "x"}],
        "this": true
    }"#;
    let node = JsonFrontend.parse(source).expect("valid dump");
    let block = node.as_block().expect("block root");
    assert_eq!(block.expressions[0], build::this_prop("x"));
}

#[test]
fn test_unknown_tag_is_frontend_error() {
    let err = JsonFrontend
        .parse(r#"{"type": "Wat"}"#)
        .expect_err("unknown tag must fail");
    assert!(
        matches!(err, TranspileError::Frontend { .. }),
        "unexpected error: {err:?}"
    );
}

#[test]
fn test_malformed_json_is_frontend_error() {
    let err = JsonFrontend.parse("{").expect_err("truncated input");
    assert!(matches!(err, TranspileError::Frontend { .. }));
}

#[test]
fn test_closure_frontend() {
    let frontend =
        |_: &str| -> TranspileResult<Node> { Ok(build::block(vec![build::num("1")])) };
    let node = frontend.parse("ignored").expect("closure front-end");
    assert_eq!(node, build::block(vec![build::num("1")]));
}
