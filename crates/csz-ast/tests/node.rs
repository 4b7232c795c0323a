use super::*;
use crate::build::*;

#[test]
fn test_kind_names_variant() {
    assert_eq!(ident("a").kind(), "Value");
    assert_eq!(keyword("break").kind(), "Literal");
    assert_eq!(expansion().kind(), "Expansion");
    assert_eq!(comment("x").kind(), "Comment");
}

#[test]
fn test_unwrapped_strips_plain_values() {
    let node = ident("foo");
    assert!(matches!(node.unwrapped(), Node::Literal(_)));

    let chained = access(ident("foo"), "bar");
    assert!(matches!(chained.unwrapped(), Node::Value(_)));
}

#[test]
fn test_identifier_name() {
    assert_eq!(ident("foo").identifier_name(), Some("foo"));
    assert_eq!(num("12").identifier_name(), None);
    assert_eq!(string("x").identifier_name(), None);
    assert_eq!(lit("/re/g").identifier_name(), None);
}

#[test]
fn test_this_member_name() {
    assert_eq!(this_prop("x").this_member_name(), Some("x"));
    assert_eq!(access(this(), "y").this_member_name(), Some("y"));
    assert_eq!(access(ident("a"), "y").this_member_name(), None);
    assert_eq!(
        access(access(this(), "a"), "b").this_member_name(),
        None,
        "only single-level this access counts"
    );
}

#[test]
fn test_statement_keywords() {
    assert!(keyword("break").is_statement_keyword());
    assert!(keyword("continue").is_statement_keyword());
    assert!(keyword("debugger").is_statement_keyword());
    assert!(!ident("breaker").is_statement_keyword());
}

#[test]
fn test_soak_detection() {
    let Node::Value(value) = soak_access(ident("a"), "b") else {
        panic!("expected value");
    };
    assert!(value.has_soak());

    let Node::Value(value) = index(ident("a"), num("0")) else {
        panic!("expected value");
    };
    assert!(!value.has_soak());
}

#[test]
fn test_is_identifier() {
    assert!(is_identifier("a"));
    assert!(is_identifier("_a1"));
    assert!(is_identifier("$"));
    assert!(!is_identifier("1a"));
    assert!(!is_identifier(""));
    assert!(!is_identifier("a-b"));
}
