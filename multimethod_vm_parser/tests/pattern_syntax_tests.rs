//! Pattern syntax tests
//!
//! Each test parses a pattern and checks the shape of the resulting tree.

use multimethod_vm_parser::{parse_pattern, ExprSyntax, ParseError, PatternSyntax, PatternSyntaxKind};
use pretty_assertions::assert_eq;

/// Helper to parse a pattern that must be valid
fn parse_ok(source: &str) -> PatternSyntax {
    match parse_pattern(source) {
        Ok(pattern) => pattern,
        Err(e) => panic!("failed to parse {:?}: {}", source, e),
    }
}

// ==================== Simple Patterns ====================

#[test]
fn test_wildcard() {
    assert_eq!(parse_ok("_").kind, PatternSyntaxKind::Wildcard);
}

#[test]
fn test_bare_variable() {
    assert_eq!(
        parse_ok("x").kind,
        PatternSyntaxKind::Variable {
            name: "x".to_string(),
            inner: None,
        }
    );
}

#[test]
fn test_variable_with_type_test() {
    let pattern = parse_ok("x Int");
    let PatternSyntaxKind::Variable { name, inner } = pattern.kind else {
        panic!("expected variable, got {:?}", pattern.kind);
    };
    assert_eq!(name, "x");
    assert_eq!(
        inner.map(|p| p.kind),
        Some(PatternSyntaxKind::TypeTest(ExprSyntax::Name("Int".to_string())))
    );
}

#[test]
fn test_discarded_name_with_type_is_bare_type_test() {
    assert_eq!(
        parse_ok("_ String").kind,
        PatternSyntaxKind::TypeTest(ExprSyntax::Name("String".to_string()))
    );
}

#[test]
fn test_capitalized_name_alone_is_value_pattern() {
    assert_eq!(
        parse_ok("Int").kind,
        PatternSyntaxKind::Value(ExprSyntax::Name("Int".to_string()))
    );
}

// ==================== Literals ====================

#[test]
fn test_literals() {
    let cases = [
        ("0", ExprSyntax::Int(0)),
        ("-42", ExprSyntax::Int(-42)),
        ("2.5", ExprSyntax::Float(2.5)),
        ("-0.5", ExprSyntax::Float(-0.5)),
        ("true", ExprSyntax::Bool(true)),
        ("false", ExprSyntax::Bool(false)),
        ("nothing", ExprSyntax::Nothing),
        (r#""a\tb""#, ExprSyntax::Str("a\tb".to_string())),
    ];
    for (source, expected) in cases {
        assert_eq!(parse_ok(source).kind, PatternSyntaxKind::Value(expected), "{}", source);
    }
}

#[test]
fn test_empty_parens_are_nothing() {
    assert_eq!(parse_ok("()").kind, PatternSyntaxKind::Value(ExprSyntax::Nothing));
}

#[test]
fn test_min_int_literal() {
    assert_eq!(
        parse_ok("-9223372036854775808").kind,
        PatternSyntaxKind::Value(ExprSyntax::Int(i64::MIN))
    );
}

// ==================== Composite Patterns ====================

#[test]
fn test_tuple_of_typed_variables() {
    let pattern = parse_ok("left Int, right Int");
    let PatternSyntaxKind::Tuple(elements) = &pattern.kind else {
        panic!("expected tuple, got {:?}", pattern.kind);
    };
    assert_eq!(elements.len(), 2);
    assert_eq!(pattern.to_string(), "(left Int, right Int)");
}

#[test]
fn test_parenthesized_single_pattern_is_not_a_tuple() {
    assert_eq!(
        parse_ok("(x)").kind,
        PatternSyntaxKind::Variable {
            name: "x".to_string(),
            inner: None,
        }
    );
}

#[test]
fn test_record_pattern_keeps_field_order() {
    let pattern = parse_ok("(b: _ String, a: n Int)");
    let PatternSyntaxKind::Record(fields) = &pattern.kind else {
        panic!("expected record, got {:?}", pattern.kind);
    };
    let names: Vec<_> = fields.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["b", "a"]);
    assert_eq!(pattern.to_string(), "(b: _ String, a: n Int)");
}

#[test]
fn test_nested_record_annotation() {
    let pattern = parse_ok("p (x: 0, y: _)");
    assert_eq!(pattern.to_string(), "p (x: 0, y: _)");
    let PatternSyntaxKind::Variable { inner: Some(inner), .. } = pattern.kind else {
        panic!("expected annotated variable");
    };
    assert!(matches!(inner.kind, PatternSyntaxKind::Record(_)));
}

#[test]
fn test_spans_cover_whole_tuple() {
    let pattern = parse_ok("(a, \"bc\")");
    assert_eq!(pattern.span.start, 0);
    assert_eq!(pattern.span.end, 9);
}

// ==================== Errors ====================

#[test]
fn test_trailing_tokens_are_rejected() {
    let err = parse_pattern("x y").unwrap_err();
    assert!(
        matches!(err, ParseError::UnexpectedToken { ref found, .. } if found == "y"),
        "got {:?}",
        err
    );
}

#[test]
fn test_unclosed_paren() {
    let err = parse_pattern("(x, y").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedEof { .. }), "got {:?}", err);
}

#[test]
fn test_duplicate_record_field() {
    let err = parse_pattern("(a: x, a: y)").unwrap_err();
    assert!(
        matches!(err, ParseError::DuplicateField { ref name, .. } if name == "a"),
        "got {:?}",
        err
    );
}

#[test]
fn test_invalid_escape() {
    let err = parse_pattern(r#""\q""#).unwrap_err();
    assert!(matches!(err, ParseError::InvalidEscape { .. }), "got {:?}", err);
}

#[test]
fn test_empty_source() {
    let err = parse_pattern("").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedEof { .. }), "got {:?}", err);
}

#[test]
fn test_integer_overflow() {
    let err = parse_pattern("99999999999999999999").unwrap_err();
    assert!(matches!(err, ParseError::InvalidNumber { .. }), "got {:?}", err);
}
