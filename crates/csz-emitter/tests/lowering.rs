use super::*;
use crate::legacy::BuiltinLegacyCompiler;
use crate::pipeline::transpile_with;
use csz_ast::build::*;

fn expr(node: Node) -> String {
    let options = CompileOptions::default();
    let mut lowerer = Lowerer::new(&options, &BuiltinLegacyCompiler, &node);
    let mapped = lowerer
        .map_expression(&node, MapContext::default())
        .expect("maps");
    IrPrinter::emit_to_string(&mapped)
}

fn expr_err(node: Node) -> TranspileError {
    let options = CompileOptions::default();
    let mut lowerer = Lowerer::new(&options, &BuiltinLegacyCompiler, &node);
    lowerer
        .map_expression(&node, MapContext::default())
        .expect_err("mapping must fail")
}

// =========================================================================
// Operators
// =========================================================================

#[test]
fn test_rewritten_operators() {
    assert_eq!(expr(op("**", ident("a"), ident("b"))), "Math.pow(a, b)");
    assert_eq!(expr(op("//", ident("a"), ident("b"))), "Math.floor(a / b)");
    assert_eq!(expr(op("is", ident("a"), ident("b"))), "a === b");
    assert_eq!(expr(op("isnt", ident("a"), ident("b"))), "a !== b");
    assert_eq!(expr(op("or", ident("a"), ident("b"))), "a || b");
}

#[test]
fn test_modulo_inlines_simple_divisor() {
    assert_eq!(expr(op("%%", ident("a"), ident("b"))), "(a % b + b) % b");
    assert_eq!(
        expr(op("%%", ident("a"), call(ident("f"), vec![]))),
        "modulo(a, f())"
    );
}

#[test]
fn test_chained_comparison_evaluates_middle_once() {
    assert_eq!(
        expr(op("<", op("<", ident("a"), ident("b")), ident("c"))),
        "a < b && b < c"
    );
    assert_eq!(
        expr(op(
            "<",
            op("<", ident("a"), call(ident("f"), vec![])),
            ident("c")
        )),
        "a < (ref = f()) && ref < c"
    );
}

#[test]
fn test_membership() {
    assert_eq!(expr(contains(ident("a"), ident("xs"))), "xs.includes(a)");
    assert_eq!(expr(not_contains(ident("a"), ident("xs"))), "!xs.includes(a)");
}

#[test]
fn test_existence_of_plain_expressions() {
    assert_eq!(
        expr(exists(ident("a"))),
        "typeof a !== \"undefined\" && a !== null"
    );
    assert_eq!(expr(exists(call(ident("f"), vec![]))), "f() != null");
}

// =========================================================================
// Members, calls, ranges
// =========================================================================

#[test]
fn test_slice_endpoints() {
    let xs = || ident("x");
    assert_eq!(
        expr(slice(xs(), Some(num("1")), Some(num("10")), false)),
        "x.slice(1, 11)"
    );
    assert_eq!(
        expr(slice(xs(), Some(num("1")), Some(num("10")), true)),
        "x.slice(1, 10)"
    );
    assert_eq!(expr(slice(xs(), Some(num("1")), None, false)), "x.slice(1)");
    assert_eq!(
        expr(slice(xs(), Some(num("1")), Some(unary("-", num("1"))), false)),
        "x.slice(1)"
    );
    assert_eq!(
        expr(slice(xs(), Some(ident("a")), Some(ident("b")), false)),
        "x.slice(a, +b + 1 || 9e9)"
    );
}

#[test]
fn test_literal_ranges_expand() {
    assert_eq!(expr(range(num("1"), num("5"), false)), "[1, 2, 3, 4, 5]");
    assert_eq!(expr(range(num("1"), num("5"), true)), "[1, 2, 3, 4]");
    assert_eq!(expr(range(num("3"), num("1"), false)), "[3, 2, 1]");
}

#[test]
fn test_calls_and_members() {
    assert_eq!(expr(call(ident("f"), vec![splat(ident("xs"))])), "f(...xs)");
    assert_eq!(expr(new_call(ident("Foo"), vec![num("1")])), "new Foo(1)");
    assert_eq!(expr(proto_access(ident("A"), "m")), "A.prototype.m");
    assert_eq!(expr(index(ident("a"), string("k"))), "a[\"k\"]");
}

#[test]
fn test_object_literal_entries() {
    let object = obj(vec![entry(ident("a"), num("1")), ident("b"), this_prop("c")]);
    assert_eq!(expr(object), "{\n  a: 1,\n  b,\n  c: this.c\n}");
}

#[test]
fn test_super_outside_method_is_illegal() {
    let err = expr_err(super_call(vec![]));
    assert!(err.is_illegal_source(), "{err:?}");
}

#[test]
fn test_statement_keyword_is_not_an_expression() {
    let err = expr_err(keyword("break"));
    assert!(
        matches!(&err, TranspileError::Unsupported { kind, target } if kind == "Literal" && *target == "Expression"),
        "{err:?}"
    );
}

// =========================================================================
// Destructuring
// =========================================================================

#[test]
fn test_array_pattern_with_trailing_rest() {
    assert_eq!(
        expr(assign(arr(vec![ident("a"), splat(ident("rest"))]), ident("xs"))),
        "[a, ...rest] = xs"
    );
}

#[test]
fn test_non_trailing_splat_in_pattern_is_unsupported() {
    let err = expr_err(assign(arr(vec![splat(ident("init")), ident("last")]), ident("xs")));
    assert!(
        matches!(&err, TranspileError::Unsupported { kind, target } if kind == "Splat" && *target == "ArrayPatternItem"),
        "{err:?}"
    );
}

#[test]
fn test_object_pattern_keeps_shorthand() {
    let pattern = obj(vec![
        ident("a"),
        entry(ident("b"), ident("c")),
        assign(ident("d"), num("1")),
    ]);
    assert_eq!(
        expr(assign(pattern, ident("o"))),
        "{\n  a,\n  b: c,\n  d = 1\n} = o"
    );
}

// =========================================================================
// Functions
// =========================================================================

#[test]
fn test_parameters_map_in_place() {
    let code = func(
        vec![
            param(ident("a")),
            param_default(ident("b"), num("1")),
            splat_param(ident("rest")),
        ],
        vec![ident("a")],
    );
    assert_eq!(expr(code), "function(a, b = 1, ...rest) {\n  return a;\n}");
}

#[test]
fn test_parameters_after_splat_read_from_rest() {
    let code = func(
        vec![
            param(ident("first")),
            splat_param(ident("middle")),
            param(ident("last")),
        ],
        vec![ident("last")],
    );
    assert_eq!(
        expr(code),
        "function(...args) {\n  var first = args[0];\n  var middle = args.slice(1, args.length - 1);\n  \
         var last = args[args.length - 1];\n  return last;\n}"
    );
}

#[test]
fn test_this_parameter_assigns_field_without_return() {
    let code = func(vec![param(this_prop("a"))], vec![]);
    assert_eq!(expr(code), "function(a) {\n  this.a = a;\n}");
}

#[test]
fn test_bound_function_is_arrow() {
    let code = bound_func(vec![param(ident("x"))], vec![ident("x")]);
    assert_eq!(expr(code), "x => {\n  return x;\n}");
}

#[test]
fn test_generator_has_no_implicit_return() {
    let code = generator(vec![], vec![unary("yield", num("1"))], false);
    assert_eq!(expr(code), "function*() {\n  yield 1;\n}");
}

// =========================================================================
// Statement forms in expression position
// =========================================================================

#[test]
fn test_simple_conditional_is_ternary() {
    assert_eq!(
        expr(if_else(ident("a"), vec![ident("b")], vec![ident("c")])),
        "(a ? b : c)"
    );
    assert_eq!(expr(if_(ident("a"), vec![ident("b")])), "(a ? b : undefined)");
}

#[test]
fn test_compound_conditional_is_wrapped() {
    let branch = if_else(ident("a"), vec![ident("b"), ident("c")], vec![ident("d")]);
    assert_eq!(
        expr(branch),
        "(() => {\n  if (a) {\n    b;\n    return c;\n  } else {\n    return d;\n  }\n})()"
    );
}

#[test]
fn test_throw_in_expression_position() {
    assert_eq!(expr(throw(ident("e"))), "(() => {\n  throw e;\n})()");
}

#[test]
fn test_comprehension_maps_and_filters() {
    let lp = for_in(ident("x"), ident("xs"), vec![op("*", ident("x"), num("2"))]);
    assert_eq!(expr(lp.into()), "xs.map(x => {\n  return x * 2;\n})");

    let guarded =
        for_in(ident("x"), ident("xs"), vec![ident("x")]).with_guard(op(">", ident("x"), num("0")));
    assert_eq!(
        expr(guarded.into()),
        "xs.filter(x => {\n  return x > 0;\n}).map(x => {\n  return x;\n})"
    );
}

#[test]
fn test_stepped_comprehension_filters_by_index() {
    let lp = for_in(ident("x"), ident("xs"), vec![ident("x")]).with_step(num("2"));
    assert_eq!(
        expr(lp.into()),
        "xs.filter((_, _i) => {\n  return _i === 0 || _i % (2 + 1) === 0;\n}).map(x => {\n  return x;\n})"
    );
}

#[test]
fn test_while_expression_collects_results() {
    let lp = while_(ident("a"), vec![call(ident("f"), vec![])]);
    assert_eq!(
        expr(lp),
        "(() => {\n  var results = [];\n\n  while (a) {\n    results.push(f());\n  }\n\n  return results;\n})()"
    );
}

// =========================================================================
// Legacy host
// =========================================================================

#[test]
fn test_operand_reports_assigned_names() {
    let root = block(vec![]);
    let options = CompileOptions::default();
    let mut lowerer = Lowerer::new(&options, &BuiltinLegacyCompiler, &root);
    let operand = lowerer
        .compile_operand(&assign(ident("a"), num("1")), MapContext::default())
        .expect("maps");
    assert_eq!(operand.code, "a = 1");
    assert_eq!(operand.temps, vec!["a".to_string()]);
}

/// Emits a string literal with a quote escaped twice.
struct DoubleEscaping;

impl LegacyCompiler for DoubleEscaping {
    fn compile_fragment(
        &self,
        _node: &Node,
        _cx: &mut LegacyContext<'_, '_>,
    ) -> TranspileResult<String> {
        Ok(r#"say("a\\\"b")"#.to_string())
    }
}

#[test]
fn test_double_escaped_quotes_in_fragments_are_repaired() {
    let root = block(vec![soak_access(ident("a"), "b")]);
    let output =
        transpile_with(&root, &CompileOptions::default(), &DoubleEscaping).expect("compiles");
    assert_eq!(output, r#"say("a\"b");"#);
}

#[test]
fn test_nesting_beyond_limit_is_rejected() {
    let mut node = num("1");
    for _ in 0..(MAX_AST_DEPTH + 100) {
        node = parens(node);
    }
    let err = expr_err(node);
    assert!(
        matches!(err, TranspileError::DepthLimit { limit } if limit == MAX_AST_DEPTH),
        "{err:?}"
    );
}

#[test]
fn test_nesting_near_limit_compiles_on_default_stack() {
    let depth = MAX_AST_DEPTH - 50;
    let mut node = num("1");
    for _ in 0..depth {
        node = op("+", node, num("1"));
    }
    let root = block(vec![node]);
    let output = transpile_with(&root, &CompileOptions::default(), &BuiltinLegacyCompiler)
        .expect("compiles");
    assert_eq!(output.matches(" + 1").count(), depth as usize);
    assert!(output.starts_with("1 + 1 + 1"), "{}", &output[..20]);
}
