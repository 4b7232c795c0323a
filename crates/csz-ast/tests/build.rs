use super::*;

#[test]
fn test_access_extends_existing_chain() {
    let node = access(access(ident("a"), "b"), "c");
    let Node::Value(value) = node else {
        panic!("expected value");
    };
    assert_eq!(value.properties.len(), 2);
    assert_eq!(value.base.literal_text(), Some("a"));
}

#[test]
fn test_access_on_call_wraps_call() {
    let node = access(call(ident("f"), vec![]), "x");
    let Node::Value(value) = node else {
        panic!("expected value");
    };
    assert!(matches!(*value.base, Node::Call(_)));
}

#[test]
fn test_for_builder_methods() {
    let lp = for_in(ident("x"), ident("xs"), vec![])
        .with_index(ident("i"))
        .with_step(num("2"))
        .owned();
    assert!(lp.index.is_some());
    assert!(lp.step.is_some());
    assert!(lp.own);
    assert!(!lp.object);
}

#[test]
fn test_bare_super_forwards_arguments() {
    let Node::Call(call) = bare_super() else {
        panic!("expected call");
    };
    assert!(call.is_super);
    assert!(call.variable.is_none());
    assert!(matches!(call.args.as_slice(), [Node::Splat(_)]));
}

#[test]
fn test_builders_serialize_with_type_tag() {
    let json = serde_json::to_value(assign(ident("a"), num("1"))).expect("serializable");
    assert_eq!(json["type"], "Assign");
    assert_eq!(json["variable"]["type"], "Value");
    assert_eq!(json["variable"]["base"]["value"], "a");
}

#[test]
fn test_unless_inverts_comparisons() {
    let Node::If(branch) = unless(op("is", ident("a"), boolean("false")), vec![]) else {
        panic!("expected if");
    };
    let Node::Op(op) = *branch.condition else {
        panic!("expected op");
    };
    assert_eq!(op.operator, "isnt");
}

#[test]
fn test_unless_negates_other_conditions() {
    let Node::If(branch) = unless(ident("ready"), vec![]) else {
        panic!("expected if");
    };
    let Node::Op(op) = *branch.condition else {
        panic!("expected op");
    };
    assert_eq!(op.operator, "!");
    assert!(op.second.is_none());
}
