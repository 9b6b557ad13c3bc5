//! The evaluation services the dispatch core relies on.
//!
//! Pattern testing, pattern comparison and method invocation only see the
//! language through this trait. `Interpreter` is the stock implementation.

use std::sync::Arc;

use crate::ast::Expr;
use crate::error::RuntimeResult;
use crate::scope::ScopeRef;
use crate::value::{ClassObj, Value};

pub trait Evaluator {
    /// Evaluate `expr` with `scope` as the innermost lexical level.
    fn evaluate(&self, expr: &Expr, scope: &ScopeRef) -> RuntimeResult<Value>;

    /// Runtime class of a value.
    fn class_of(&self, value: &Value) -> Arc<ClassObj>;

    /// Equality used by value patterns.
    fn values_equal(&self, a: &Value, b: &Value) -> bool {
        a == b
    }
}
