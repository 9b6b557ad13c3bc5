//! Expressions
//!
//! Method bodies and the expressions embedded in value and type-test
//! patterns. The evaluator in `interpreter::eval` gives them meaning.

use std::fmt;

use multimethod_vm_parser::ExprSyntax;

use crate::value::{is_positional_keys, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    /// Variable reference, resolved through the scope chain
    Name(String),
    /// Record construction; field order is kept
    Record(Vec<(String, Expr)>),
    Field {
        target: Box<Expr>,
        name: String,
    },
    /// Invoke the multimethod bound to `name` with one argument
    Call {
        name: String,
        arg: Box<Expr>,
    },
    /// Evaluate in order in a fresh scope level; yields the last value
    Block(Vec<Expr>),
}

impl Expr {
    pub fn int(v: i64) -> Self {
        Expr::Literal(Value::Int(v))
    }

    pub fn float(v: f64) -> Self {
        Expr::Literal(Value::Float(v))
    }

    pub fn str(s: &str) -> Self {
        Expr::Literal(Value::str(s))
    }

    pub fn bool(b: bool) -> Self {
        Expr::Literal(Value::Bool(b))
    }

    pub fn nothing() -> Self {
        Expr::Literal(Value::Nothing)
    }

    pub fn name(name: impl Into<String>) -> Self {
        Expr::Name(name.into())
    }

    pub fn tuple(elements: Vec<Expr>) -> Self {
        Expr::Record(
            elements
                .into_iter()
                .enumerate()
                .map(|(i, e)| (i.to_string(), e))
                .collect(),
        )
    }

    pub fn record<S: Into<String>>(fields: Vec<(S, Expr)>) -> Self {
        Expr::Record(fields.into_iter().map(|(k, e)| (k.into(), e)).collect())
    }

    pub fn field(target: Expr, name: impl Into<String>) -> Self {
        Expr::Field {
            target: Box::new(target),
            name: name.into(),
        }
    }

    pub fn call(name: impl Into<String>, arg: Expr) -> Self {
        Expr::Call {
            name: name.into(),
            arg: Box::new(arg),
        }
    }

    /// Call with a positional pair, the shape binary operators take.
    pub fn call2(name: impl Into<String>, left: Expr, right: Expr) -> Self {
        Expr::call(name, Expr::tuple(vec![left, right]))
    }

    pub fn from_syntax(syntax: &ExprSyntax) -> Self {
        match syntax {
            ExprSyntax::Int(v) => Expr::int(*v),
            ExprSyntax::Float(v) => Expr::float(*v),
            ExprSyntax::Str(s) => Expr::str(s),
            ExprSyntax::Bool(b) => Expr::bool(*b),
            ExprSyntax::Nothing => Expr::nothing(),
            ExprSyntax::Name(name) => Expr::name(name.as_str()),
        }
    }
}

fn write_fields(f: &mut fmt::Formatter<'_>, fields: &[(String, Expr)]) -> fmt::Result {
    let positional = is_positional_keys(fields.iter().map(|(k, _)| k.as_str()));
    write!(f, "(")?;
    for (i, (name, expr)) in fields.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        if positional {
            write!(f, "{}", expr)?;
        } else {
            write!(f, "{}: {}", name, expr)?;
        }
    }
    write!(f, ")")
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(value) => write!(f, "{}", value),
            Expr::Name(name) => write!(f, "{}", name),
            Expr::Record(fields) => write_fields(f, fields),
            Expr::Field { target, name } => write!(f, "{}.{}", target, name),
            Expr::Call { name, arg } => match arg.as_ref() {
                Expr::Record(fields) => {
                    write!(f, "{}", name)?;
                    write_fields(f, fields)
                }
                other => write!(f, "{}({})", name, other),
            },
            Expr::Block(exprs) => {
                write!(f, "{{ ")?;
                for (i, expr) in exprs.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}", expr)?;
                }
                write!(f, " }}")
            }
        }
    }
}
