use super::*;
use crate::ir_printer::IrPrinter;
use rustc_hash::FxHashSet;

#[test]
fn test_require_returns_same_name_twice() {
    let mut names = NameGenerator::default();
    let mut helpers = HelperRegistry::new();
    let first = helpers.require(Helper::Modulo, &mut names);
    let second = helpers.require(Helper::Modulo, &mut names);
    assert_eq!(first, "modulo");
    assert_eq!(first, second);
    assert_eq!(helpers.definitions().len(), 1);
}

#[test]
fn test_require_avoids_taken_names() {
    let taken: FxHashSet<String> = ["modulo".to_string()].into_iter().collect();
    let mut names = NameGenerator::new(taken);
    let mut helpers = HelperRegistry::new();
    assert_eq!(helpers.require(Helper::Modulo, &mut names), "modulo1");
    assert_eq!(helpers.name(Helper::Modulo), Some("modulo1"));
}

#[test]
fn test_extend_pulls_in_has_prop_first() {
    let mut names = NameGenerator::default();
    let mut helpers = HelperRegistry::new();
    helpers.require(Helper::Extend, &mut names);
    let printed: Vec<String> = helpers
        .definitions()
        .iter()
        .map(IrPrinter::emit_to_string)
        .collect();
    assert_eq!(printed.len(), 2);
    assert_eq!(printed[0], "var hasProp = ({}).hasOwnProperty;");
    assert!(printed[1].starts_with("var extend = function(child, parent) {"));
    assert!(printed[1].contains("if (hasProp.call(parent, key)) {"));
}

#[test]
fn test_modulo_definition_text() {
    let mut names = NameGenerator::default();
    let mut helpers = HelperRegistry::new();
    helpers.require(Helper::Modulo, &mut names);
    let definitions = helpers.definitions();
    assert_eq!(
        IrPrinter::emit_to_string(&definitions[0]),
        "var modulo = function(a, b) {\n  return (+a % (b = +b) + b) % b;\n};"
    );
}
