//! Integration tests for the csz pipeline
//!
//! These tests drive the public entry points the way a caller would:
//! - Reading a JSON node dump through the default front-end
//! - Lowering, post-passes and printing
//! - Error reporting across the crate boundary

use csz::ast::build::*;
use csz::{CompileOptions, Node, QuoteStyle, TranspileError, TranspileResult};
use serde_json::{Value, json};

fn literal(value: &str) -> Value {
    json!({"type": "Value", "base": {"type": "Literal", "value": value}})
}

fn program(expressions: Vec<Value>) -> String {
    json!({"type": "Block", "expressions": expressions}).to_string()
}

/// Helper to compile a dump with default options
fn compile(source: &str) -> String {
    csz::compile(source, &CompileOptions::default()).expect("compiles")
}

#[test]
fn test_function_from_json_dump() {
    let source = program(vec![json!({
        "type": "Assign",
        "variable": literal("square"),
        "value": {
            "type": "Code",
            "params": [{"type": "Param", "name": literal("x")}],
            "body": {
                "type": "Block",
                "expressions": [
                    {"type": "Op", "operator": "*", "first": literal("x"), "second": literal("x")}
                ]
            }
        }
    })]);
    assert_eq!(
        compile(&source),
        "var square = function(x) {\n  return x * x;\n};"
    );
}

#[test]
fn test_class_from_json_dump() {
    let speak = json!({
        "type": "Assign",
        "context": "object",
        "variable": literal("speak"),
        "value": {
            "type": "Code",
            "body": {
                "type": "Block",
                "expressions": [
                    {"type": "Call", "variable": literal("say"), "args": [literal("'hi'")]}
                ]
            }
        }
    });
    let source = program(vec![json!({
        "type": "Class",
        "variable": literal("Animal"),
        "body": {"type": "Block", "expressions": [{"type": "Obj", "properties": [speak]}]}
    })]);
    assert_eq!(
        compile(&source),
        "class Animal {\n  speak() {\n    return say(\"hi\");\n  }\n}"
    );
}

#[test]
fn test_soaked_access_from_json_dump() {
    let source = program(vec![json!({
        "type": "Value",
        "base": {"type": "Literal", "value": "a"},
        "properties": [{"type": "Access", "name": "b", "soak": true}]
    })]);
    assert_eq!(
        compile(&source),
        "typeof a !== \"undefined\" && a !== null ? a.b : void 0;"
    );
}

#[test]
fn test_bare_expression_dump_is_a_program() {
    assert_eq!(compile(&literal("a").to_string()), "a;");
}

#[test]
fn test_unknown_node_type_is_frontend_error() {
    let err = csz::compile(r#"{"type": "Nope"}"#, &CompileOptions::default())
        .expect_err("unknown node type");
    assert!(matches!(err, TranspileError::Frontend { .. }), "{err:?}");
}

#[test]
fn test_options_apply_to_json_dump() {
    let source = program(vec![literal("'it\\'s'")]);
    let options = CompileOptions::default().with_quote(QuoteStyle::Single);
    assert_eq!(
        csz::compile(&source, &options).expect("compiles"),
        "'it\\'s';"
    );
}

#[test]
fn test_custom_frontend() {
    let frontend = |source: &str| -> TranspileResult<Node> {
        Ok(block(vec![assign(ident("source"), string(source))]))
    };
    let output = csz::compile_with("text", &CompileOptions::default(), &frontend)
        .expect("compiles");
    assert_eq!(output, "var source = \"text\";");
}

#[test]
fn test_independent_runs_share_no_state() {
    let source = program(vec![
        json!({"type": "Op", "operator": "%%",
               "first": {"type": "Op", "operator": "%%", "first": literal("a"), "second": literal("b")},
               "second": literal("c")}),
    ]);
    let expected = compile(&source);
    assert!(expected.starts_with("var modulo = function"), "{expected}");

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let source = source.clone();
            std::thread::spawn(move || compile(&source))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().expect("no panic"), expected);
    }
}
