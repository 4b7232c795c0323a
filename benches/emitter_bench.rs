//! Emitter Benchmark
//!
//! Measures whole-pipeline throughput (JSON dump in, JavaScript out) and the
//! lowering/printing stages on their own.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use csz::ast::build::*;
use csz::{CompileOptions, Node};

// =============================================================================
// Test Programs
// =============================================================================

/// `fnN = (a, b) -> ...` with a mix of assignments, soaks, modulo, loops and
/// a switch per function.
fn generate_function(index: usize, statements: usize) -> Node {
    let mut body = Vec::with_capacity(statements + 2);
    for stmt in 0..statements {
        let name = format!("v{stmt}");
        let value = match stmt % 4 {
            0 => op("+", ident("a"), num(stmt.to_string())),
            1 => op("%%", ident("b"), call(ident("f"), vec![ident("a")])),
            2 => soak_call(soak_access(ident("a"), "next"), vec![]),
            _ => for_in(ident("x"), ident("b"), vec![op("*", ident("x"), num("2"))]).into(),
        };
        body.push(assign(ident(name), value));
    }
    body.push(switch(
        Some(ident("a")),
        vec![
            (vec![num("1")], vec![sq_string("one")]),
            (vec![num("2"), num("3")], vec![sq_string("few")]),
        ],
        Some(vec![sq_string("many")]),
    ));
    assign(
        ident(format!("fn{index}")),
        func(vec![param(ident("a")), param(ident("b"))], body),
    )
}

fn generate_class(index: usize) -> Node {
    let body = members(vec![
        (
            "constructor",
            func(
                vec![param(ident("name"))],
                vec![super_call(vec![]), assign(this_prop("name"), ident("name"))],
            ),
        ),
        ("greet", bound_func(vec![], vec![call(ident("say"), vec![this_prop("name")])])),
        ("size", num("1")),
    ]);
    class(Some(ident(format!("C{index}"))), Some(ident("Base")), vec![body])
}

fn generate_program(functions: usize, statements_per_fn: usize) -> Node {
    let mut expressions = Vec::with_capacity(functions * 2);
    for index in 0..functions {
        expressions.push(generate_function(index, statements_per_fn));
        if index % 5 == 0 {
            expressions.push(generate_class(index));
        }
    }
    block(expressions)
}

fn json_dump(root: &Node) -> String {
    serde_json::to_string(root).unwrap_or_default()
}

// =============================================================================
// Benchmarks
// =============================================================================

/// Benchmark: a small program through the whole pipeline
fn bench_compile_simple(c: &mut Criterion) {
    let source = json_dump(&generate_program(2, 4));
    let options = CompileOptions::default();
    c.bench_function("compile_simple", |b| {
        b.iter(|| black_box(csz::compile(&source, &options)))
    });
}

/// Benchmark: pipeline throughput over growing programs
fn bench_compile_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile_throughput");
    let options = CompileOptions::default();

    for (functions, statements) in [(10, 5), (20, 10), (50, 5), (100, 5)].iter() {
        let source = json_dump(&generate_program(*functions, *statements));
        let bytes = source.len() as u64;
        let label = format!("{}fn_{}stmt", functions, statements);

        group.throughput(Throughput::Bytes(bytes));
        group.bench_with_input(BenchmarkId::new("compile", &label), &source, |b, source| {
            b.iter(|| black_box(csz::compile(source, &options)))
        });
    }

    group.finish();
}

/// Benchmark: lowering and printing only (tree built once)
fn bench_transpile_only(c: &mut Criterion) {
    let mut group = c.benchmark_group("transpile");
    let root = generate_program(50, 10);
    let options = CompileOptions::default();

    group.bench_function("transpile_only", |b| {
        b.iter(|| black_box(csz::transpile(&root, &options)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_compile_simple,
    bench_compile_throughput,
    bench_transpile_only,
);

criterion_main!(benches);
