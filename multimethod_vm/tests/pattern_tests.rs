//! Property tests for pattern comparison and selection.

mod common;

use std::cmp::Ordering;

use multimethod_vm::pattern::{matches, PatternComparer};
use multimethod_vm::{Expr, Interpreter, Pattern, RuntimeError, Value};
use proptest::prelude::*;

// ==================== Strategies ====================

fn class_name() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["Int", "Float", "Num", "String", "Object"])
}

/// Patterns without records
fn flat_pattern() -> impl Strategy<Value = Pattern> {
    prop_oneof![
        Just(Pattern::Wildcard),
        Just(Pattern::variable("x")),
        (0i64..3).prop_map(|v| Pattern::value(Expr::int(v))),
        class_name().prop_map(|class| Pattern::type_test(class)),
        class_name().prop_map(|class| Pattern::typed("y", class)),
    ]
}

fn any_pattern() -> impl Strategy<Value = Pattern> {
    flat_pattern().prop_recursive(3, 16, 3, |inner| {
        prop::collection::vec((prop::sample::select(vec!["a", "b", "c"]), inner), 0..3)
            .prop_map(Pattern::record)
    })
}

fn argument() -> impl Strategy<Value = Value> {
    prop_oneof![
        (0i64..3).prop_map(Value::Int),
        Just(Value::Float(1.5)),
        Just(Value::str("s")),
        Just(Value::Nothing),
    ]
}

fn compare(interp: &Interpreter, left: &Pattern, right: &Pattern) -> Option<Ordering> {
    let globals = interp.globals();
    PatternComparer::new(interp)
        .compare(left, globals, right, globals)
        .unwrap_or_else(|e| panic!("compare {} with {}: {}", left, right, e))
}

/// What a call produced, ignoring which pair an ambiguity names.
#[derive(Debug, PartialEq)]
enum Outcome {
    Selected(Value),
    NoMethod,
    Ambiguous,
}

fn outcome(result: Result<Value, RuntimeError>) -> Outcome {
    match result {
        Ok(value) => Outcome::Selected(value),
        Err(RuntimeError::NoMethod { .. }) => Outcome::NoMethod,
        Err(RuntimeError::AmbiguousMethod { .. }) => Outcome::Ambiguous,
        Err(e) => panic!("unexpected error: {}", e),
    }
}

/// Define `patterns` on a fresh multimethod in the given order, tagging each
/// method with its index in `patterns`.
fn call_with_order(patterns: &[Pattern], order: &[usize], argument: &Value) -> Outcome {
    let interp = Interpreter::new();
    for &i in order {
        interp
            .define_method("f", patterns[i].clone(), Expr::int(i as i64))
            .unwrap();
    }
    outcome(interp.call("f", argument.clone()))
}

// ==================== Properties ====================

proptest! {
    #[test]
    fn test_compare_is_antisymmetric(left in any_pattern(), right in any_pattern()) {
        let interp = Interpreter::new();
        let forward = compare(&interp, &left, &right);
        let backward = compare(&interp, &right, &left);
        prop_assert_eq!(forward, backward.map(Ordering::reverse));
    }

    #[test]
    fn test_compare_is_reflexive(pattern in any_pattern()) {
        let interp = Interpreter::new();
        prop_assert_eq!(compare(&interp, &pattern, &pattern), Some(Ordering::Equal));
    }

    #[test]
    fn test_matching_is_deterministic(pattern in any_pattern(), value in argument()) {
        let interp = Interpreter::new();
        let globals = interp.globals();
        let first = matches(&interp, &pattern, globals, &value).unwrap();
        let second = matches(&interp, &pattern, globals, &value).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_selection_ignores_definition_order(
        patterns in prop::collection::vec(flat_pattern(), 1..6),
        value in argument(),
    ) {
        let forward: Vec<usize> = (0..patterns.len()).collect();
        let backward: Vec<usize> = forward.iter().rev().copied().collect();
        prop_assert_eq!(
            call_with_order(&patterns, &forward, &value),
            call_with_order(&patterns, &backward, &value)
        );
    }
}

// ==================== Examples ====================

#[test]
fn test_positional_and_named_records_are_the_same_shape() {
    let interp = common::interpreter();
    let tuple = common::pattern(&interp, "a, b");
    let named = Pattern::record(vec![("0", Pattern::variable("a")), ("1", Pattern::variable("b"))]);
    assert_eq!(tuple, named);
    assert_eq!(compare(&interp, &tuple, &named), Some(Ordering::Equal));
}

#[test]
fn test_nested_records_compare_recursively() {
    let interp = Interpreter::new();
    let specific = common::pattern(&interp, "p (x: 0, y: _)");
    let general = common::pattern(&interp, "p (x: _ Int, y: _)");
    assert_eq!(compare(&interp, &specific, &general), Some(Ordering::Less));
}
