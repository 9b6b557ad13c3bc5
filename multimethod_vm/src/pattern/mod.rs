//! Pattern model
//!
//! A pattern describes the shape a method expects its argument to take.
//! Patterns are immutable once built; `tester` matches them against values
//! and `comparer` orders them by specificity.

pub mod comparer;
pub mod tester;

use std::fmt;

use indexmap::IndexMap;
use multimethod_vm_parser::{PatternSyntax, PatternSyntaxKind};

use crate::ast::Expr;
use crate::value::is_positional_keys;

pub use comparer::PatternComparer;
pub use tester::{bind, matches, PatternTester};

/// The discard identifier. Variable patterns with this name bind nothing.
pub const DISCARD: &str = "_";

#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// Matches anything, binds nothing
    Wildcard,
    /// Binds the value to `name`, then requires `inner` to match if present
    Variable {
        name: String,
        inner: Option<Box<Pattern>>,
    },
    /// Matches values equal to the evaluated expression
    Value(Expr),
    /// Matches values whose class is the evaluated class or a subclass of it
    TypeTest(Expr),
    /// Matches values that have every listed field, each matching its pattern
    Record(IndexMap<String, Pattern>),
}

/// The case a pattern compares as once `Variable` wrappers are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PatternKind {
    Wildcard,
    Record,
    TypeTest,
    Value,
}

impl PatternKind {
    /// Specificity rank; higher is more specific.
    pub fn rank(self) -> u8 {
        match self {
            PatternKind::Wildcard => 0,
            PatternKind::Record => 1,
            PatternKind::TypeTest => 2,
            PatternKind::Value => 3,
        }
    }
}

impl Pattern {
    pub fn variable(name: impl Into<String>) -> Self {
        Pattern::Variable {
            name: name.into(),
            inner: None,
        }
    }

    /// `name Class`
    pub fn typed(name: impl Into<String>, class: impl Into<String>) -> Self {
        Pattern::Variable {
            name: name.into(),
            inner: Some(Box::new(Pattern::type_test(class))),
        }
    }

    /// `_ Class`
    pub fn type_test(class: impl Into<String>) -> Self {
        Pattern::TypeTest(Expr::Name(class.into()))
    }

    pub fn value(expr: Expr) -> Self {
        Pattern::Value(expr)
    }

    pub fn tuple(elements: Vec<Pattern>) -> Self {
        Pattern::Record(
            elements
                .into_iter()
                .enumerate()
                .map(|(i, p)| (i.to_string(), p))
                .collect(),
        )
    }

    pub fn record<S: Into<String>>(fields: Vec<(S, Pattern)>) -> Self {
        Pattern::Record(fields.into_iter().map(|(k, p)| (k.into(), p)).collect())
    }

    /// Strip `Variable` wrappers down to the first concrete case. A bare
    /// variable unwraps to itself and compares as a wildcard.
    pub fn unwrap_variables(&self) -> &Pattern {
        let mut pattern = self;
        while let Pattern::Variable {
            inner: Some(inner), ..
        } = pattern
        {
            pattern = inner.as_ref();
        }
        pattern
    }

    pub fn kind(&self) -> PatternKind {
        match self.unwrap_variables() {
            Pattern::Wildcard | Pattern::Variable { .. } => PatternKind::Wildcard,
            Pattern::Value(_) => PatternKind::Value,
            Pattern::TypeTest(_) => PatternKind::TypeTest,
            Pattern::Record(_) => PatternKind::Record,
        }
    }

    /// Lower a parsed pattern. Tuples become records keyed by position.
    pub fn from_syntax(syntax: &PatternSyntax) -> Self {
        match &syntax.kind {
            PatternSyntaxKind::Wildcard => Pattern::Wildcard,
            PatternSyntaxKind::Variable { name, inner } => Pattern::Variable {
                name: name.clone(),
                inner: inner.as_ref().map(|p| Box::new(Pattern::from_syntax(p))),
            },
            PatternSyntaxKind::Value(expr) => Pattern::Value(Expr::from_syntax(expr)),
            PatternSyntaxKind::TypeTest(expr) => Pattern::TypeTest(Expr::from_syntax(expr)),
            PatternSyntaxKind::Record(fields) => Pattern::Record(
                fields
                    .iter()
                    .map(|(name, p)| (name.clone(), Pattern::from_syntax(p)))
                    .collect(),
            ),
            PatternSyntaxKind::Tuple(elements) => {
                Pattern::tuple(elements.iter().map(Pattern::from_syntax).collect())
            }
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Wildcard => write!(f, "_"),
            Pattern::Variable { name, inner: None } => write!(f, "{}", name),
            Pattern::Variable {
                name,
                inner: Some(inner),
            } => match inner.as_ref() {
                Pattern::TypeTest(class) => write!(f, "{} {}", name, class),
                other => write!(f, "{} {}", name, other),
            },
            Pattern::Value(expr) => write!(f, "{}", expr),
            Pattern::TypeTest(class) => write!(f, "_ {}", class),
            Pattern::Record(fields) => {
                let positional = is_positional_keys(fields.keys().map(String::as_str));
                write!(f, "(")?;
                for (i, (name, pattern)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    if positional {
                        write!(f, "{}", pattern)?;
                    } else {
                        write!(f, "{}: {}", name, pattern)?;
                    }
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multimethod_vm_parser::parse_pattern;

    fn lower(source: &str) -> Pattern {
        Pattern::from_syntax(&parse_pattern(source).unwrap())
    }

    #[test]
    fn test_kind_unwraps_variables() {
        assert_eq!(Pattern::variable("x").kind(), PatternKind::Wildcard);
        assert_eq!(Pattern::typed("x", "Int").kind(), PatternKind::TypeTest);
        assert_eq!(Pattern::value(Expr::int(0)).kind(), PatternKind::Value);
        let nested = Pattern::Variable {
            name: "outer".to_string(),
            inner: Some(Box::new(Pattern::Variable {
                name: "inner".to_string(),
                inner: Some(Box::new(Pattern::tuple(vec![]))),
            })),
        };
        assert_eq!(nested.kind(), PatternKind::Record);
    }

    #[test]
    fn test_rank_order() {
        assert!(PatternKind::Value.rank() > PatternKind::TypeTest.rank());
        assert!(PatternKind::TypeTest.rank() > PatternKind::Record.rank());
        assert!(PatternKind::Record.rank() > PatternKind::Wildcard.rank());
    }

    #[test]
    fn test_lowering_tuple_to_record() {
        let pattern = lower("left Int, right Int");
        assert_eq!(
            pattern,
            Pattern::tuple(vec![Pattern::typed("left", "Int"), Pattern::typed("right", "Int")])
        );
        assert_eq!(pattern.to_string(), "(left Int, right Int)");
    }

    #[test]
    fn test_lowering_literals_and_records() {
        assert_eq!(lower("0"), Pattern::value(Expr::int(0)));
        assert_eq!(lower("_ String"), Pattern::type_test("String"));
        assert_eq!(
            lower("(a: _ Int, b: _)"),
            Pattern::record(vec![("a", Pattern::type_test("Int")), ("b", Pattern::Wildcard)])
        );
    }

    #[test]
    fn test_display_named_record() {
        let pattern = Pattern::record(vec![
            ("a", Pattern::type_test("Int")),
            ("b", Pattern::Wildcard),
        ]);
        assert_eq!(pattern.to_string(), "(a: _ Int, b: _)");
    }
}
