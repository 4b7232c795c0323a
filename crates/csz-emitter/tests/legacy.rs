use super::*;
use crate::lowering::Lowerer;
use crate::pipeline::transpile;
use csz_ast::build::*;

fn js(statements: Vec<Node>) -> String {
    transpile(&block(statements), &CompileOptions::default()).expect("compiles")
}

#[test]
fn test_soaked_chain_guards_every_link() {
    let chain = soak_call(soak_access(soak_access(ident("a"), "b"), "c"), vec![]);
    assert_eq!(
        js(vec![assign(ident("yo"), chain)]),
        "var ref;\nvar yo = typeof a !== \"undefined\" && a !== null ? (ref = a.b) != null ? \
         typeof ref.c === \"function\" ? ref.c() : void 0 : void 0 : void 0;"
    );
}

#[test]
fn test_bound_name_uses_loose_null_check() {
    assert_eq!(
        js(vec![
            assign(ident("a"), num("1")),
            soak_access(ident("a"), "b"),
        ]),
        "var a = 1;\na != null ? a.b : void 0;"
    );
}

#[test]
fn test_soaked_method_call_caches_its_object() {
    let chain = soak_call(access(call(ident("f"), vec![]), "g"), vec![]);
    assert_eq!(
        js(vec![chain]),
        "var base;\ntypeof (base = f()).g === \"function\" ? base.g() : void 0;"
    );
}

#[test]
fn test_existential_operator() {
    assert_eq!(
        js(vec![op("?", ident("a"), ident("b"))]),
        "typeof a !== \"undefined\" && a !== null ? a : b;"
    );
    assert_eq!(
        js(vec![op("?", call(ident("f"), vec![]), ident("b"))]),
        "var ref;\n(ref = f()) != null ? ref : b;"
    );
}

#[test]
fn test_existence_over_soaked_chain() {
    assert_eq!(
        js(vec![exists(soak_access(ident("a"), "b"))]),
        "(typeof a !== \"undefined\" && a !== null ? a.b : void 0) != null;"
    );
}

#[test]
fn test_dynamic_range_collects_in_closure() {
    assert_eq!(
        js(vec![assign(ident("x"), range(num("1"), ident("n"), false))]),
        "var x = (function() {\n  var results = [];\n\n  \
         for (var i = 1; (1 <= n ? i <= n : i >= n); (1 <= n ? i++ : i--)) {\n    \
         results.push(i);\n  }\n\n  return results;\n}).apply(this);"
    );
}

#[test]
fn test_oversized_literal_range_counts_up() {
    let output = js(vec![range(num("0"), num("100"), true)]);
    assert!(
        output.contains("for (var i = 0; i < 100; i++)"),
        "{output}"
    );
}

#[test]
fn test_anonymous_empty_class() {
    assert_eq!(
        js(vec![call(ident("f"), vec![class(None, None, vec![])])]),
        "f((function() {\n  function _Class() {}\n\n  return _Class;\n})());"
    );
}

#[test]
fn test_extends_operator_requests_helpers() {
    let output = js(vec![extends(ident("A"), ident("B"))]);
    assert!(output.starts_with("var hasProp = "), "{output}");
    assert!(output.contains("var extend = function(child, parent) {"), "{output}");
    assert!(output.ends_with("extend(A, B);"), "{output}");
}

#[test]
fn test_unsupported_node_is_fallback_error() {
    let root = block(vec![]);
    let options = CompileOptions::default();
    let mut lowerer = Lowerer::new(&options, &BuiltinLegacyCompiler, &root);
    let mut cx = LegacyContext::new(&mut lowerer, MapContext::default());
    let err = BuiltinLegacyCompiler
        .compile_fragment(&throw(ident("e")), &mut cx)
        .expect_err("throw is never delegated");
    assert!(
        matches!(&err, TranspileError::Fallback { kind, .. } if kind == "Throw"),
        "{err:?}"
    );
}

#[test]
fn test_operand_wrapping() {
    let operand = Operand {
        code: "a = 1".to_string(),
        precedence: PREC_ASSIGN,
        temps: Vec::new(),
    };
    assert_eq!(operand.wrapped(PREC_CALL), "(a = 1)");
    assert_eq!(operand.wrapped(PREC_ASSIGN), "a = 1");
}
