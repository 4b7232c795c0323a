use super::*;
use crate::build::*;

#[test]
fn test_collect_names_finds_nested_identifiers() {
    let tree = block(vec![
        assign(ident("modulo"), num("1")),
        func(
            vec![param(ident("x"))],
            vec![call(access(ident("console"), "log"), vec![ident("y")])],
        ),
    ]);
    let mut names = FxHashSet::default();
    tree.collect_names(&mut names);
    for name in ["modulo", "x", "console", "y"] {
        assert!(names.contains(name), "missing {name} in {names:?}");
    }
    assert!(!names.contains("log"), "member names are not bindings");
    assert!(!names.contains("1"));
}

#[test]
fn test_for_each_child_visits_loop_parts() {
    let lp: Node = for_in(ident("x"), ident("xs"), vec![ident("body")])
        .with_guard(ident("ok"))
        .into();
    let mut count = 0;
    lp.for_each_child(&mut |_| count += 1);
    // source, name, guard, one body expression
    assert_eq!(count, 4);
}
