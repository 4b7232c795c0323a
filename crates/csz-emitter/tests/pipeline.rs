use super::*;
use csz_ast::build::*;
use csz_common::{QuoteStyle, TranspileError};

#[test]
fn test_compile_reads_json_dump() {
    let source = r#"{
        "type": "Block",
        "expressions": [
            {
                "type": "Assign",
                "variable": {"type": "Value", "base": {"type": "Literal", "value": "bam"}},
                "value": {"type": "Value", "base": {"type": "Literal", "value": "'hello'"}}
            }
        ]
    }"#;
    let output = compile(source, &CompileOptions::default()).expect("compiles");
    assert_eq!(output, "var bam = \"hello\";");
}

#[test]
fn test_frontend_errors_abort_compilation() {
    let err = compile("{not json", &CompileOptions::default()).expect_err("must fail");
    assert!(matches!(err, TranspileError::Frontend { .. }), "{err:?}");
}

#[test]
fn test_compile_with_custom_frontend() {
    let frontend = |_: &str| -> TranspileResult<Node> { Ok(block(vec![num("123.12353443")])) };
    let output = compile_with("ignored", &CompileOptions::default(), &frontend).expect("compiles");
    assert_eq!(output, "123.12353443;");
}

#[test]
fn test_repeated_semicolons_are_collapsed() {
    let root = block(vec![passthrough("a();")]);
    let output = transpile(&root, &CompileOptions::default()).expect("compiles");
    assert_eq!(output, "a();");
}

#[test]
fn test_options_reach_the_printer() {
    let root = block(vec![assign(
        ident("f"),
        func(vec![], vec![sq_string("hi")]),
    )]);
    let options = CompileOptions::default()
        .with_quote(QuoteStyle::Single)
        .with_tab_width(4);
    let output = transpile(&root, &options).expect("compiles");
    assert_eq!(output, "var f = function() {\n    return 'hi';\n};");
}

#[test]
fn test_helpers_are_prepended_once() {
    let root = block(vec![
        op("%%", op("%%", ident("a"), ident("b")), ident("c")),
        op("%%", op("%%", ident("d"), ident("e")), ident("f")),
    ]);
    let output = transpile(&root, &CompileOptions::default()).expect("compiles");
    assert_eq!(
        output,
        "var modulo = function(a, b) {\n  return (+a % (b = +b) + b) % b;\n};\n\n\
         modulo(modulo(a, b), c);\nmodulo(modulo(d, e), f);"
    );
}

#[test]
fn test_lower_returns_program() {
    let root = block(vec![ident("a")]);
    let program = lower(&root, &CompileOptions::default(), &BuiltinLegacyCompiler).expect("lowers");
    assert_eq!(
        program,
        JsNode::Program(vec![JsNode::expr_stmt(JsNode::id("a"))])
    );
}
