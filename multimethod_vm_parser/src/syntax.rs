//! Syntax tree for parsed patterns
//!
//! The tree stays close to the surface syntax: tuples are kept distinct from
//! records and `_ Int` is already collapsed to a bare type test. Lowering to
//! the runtime pattern model happens in the VM crate.

use crate::span::Span;

/// A literal or name appearing inside a pattern
#[derive(Debug, Clone, PartialEq)]
pub enum ExprSyntax {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Nothing,
    Name(String),
}

impl std::fmt::Display for ExprSyntax {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExprSyntax::Int(v) => write!(f, "{}", v),
            ExprSyntax::Float(v) => write!(f, "{:?}", v),
            ExprSyntax::Str(s) => write!(f, "{:?}", s),
            ExprSyntax::Bool(b) => write!(f, "{}", b),
            ExprSyntax::Nothing => write!(f, "nothing"),
            ExprSyntax::Name(name) => write!(f, "{}", name),
        }
    }
}

/// A parsed pattern node
#[derive(Debug, Clone, PartialEq)]
pub struct PatternSyntax {
    pub kind: PatternSyntaxKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PatternSyntaxKind {
    /// `_`
    Wildcard,
    /// `name` or `name Annotation`
    Variable {
        name: String,
        inner: Option<Box<PatternSyntax>>,
    },
    /// A literal or capitalized name compared by equality
    Value(ExprSyntax),
    /// `_ Class`
    TypeTest(ExprSyntax),
    /// `(a: p, b: q)`
    Record(Vec<(String, PatternSyntax)>),
    /// `(p, q, ...)` with at least two elements
    Tuple(Vec<PatternSyntax>),
}

impl PatternSyntax {
    pub fn new(kind: PatternSyntaxKind, span: Span) -> Self {
        Self { kind, span }
    }
}

impl std::fmt::Display for PatternSyntax {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            PatternSyntaxKind::Wildcard => write!(f, "_"),
            PatternSyntaxKind::Variable { name, inner: None } => write!(f, "{}", name),
            PatternSyntaxKind::Variable {
                name,
                inner: Some(inner),
            } => match &inner.kind {
                PatternSyntaxKind::TypeTest(class) => write!(f, "{} {}", name, class),
                _ => write!(f, "{} {}", name, inner),
            },
            PatternSyntaxKind::Value(expr) => write!(f, "{}", expr),
            PatternSyntaxKind::TypeTest(class) => write!(f, "_ {}", class),
            PatternSyntaxKind::Record(fields) => {
                write!(f, "(")?;
                for (i, (name, pattern)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", name, pattern)?;
                }
                write!(f, ")")
            }
            PatternSyntaxKind::Tuple(elements) => {
                write!(f, "(")?;
                for (i, pattern) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", pattern)?;
                }
                write!(f, ")")
            }
        }
    }
}
