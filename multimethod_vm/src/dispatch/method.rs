//! Methods
//!
//! A method is a pattern, the scope it was defined in, and a body. Methods
//! are immutable and compared only by identity.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::ast::Expr;
use crate::error::{RuntimeError, RuntimeResult};
use crate::evaluator::Evaluator;
use crate::pattern::{self, Pattern};
use crate::scope::{Scope, ScopeRef};
use crate::value::Value;

static NEXT_METHOD_ID: AtomicU64 = AtomicU64::new(0);

/// Unique identity of a method, assigned at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodId(u64);

impl MethodId {
    fn next() -> Self {
        MethodId(NEXT_METHOD_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Arguments handed to a native method body.
#[derive(Debug)]
pub struct NativeArgs<'a> {
    /// The argument as passed to the multimethod
    pub argument: &'a Value,
    /// Scope holding the pattern's bindings
    pub scope: &'a ScopeRef,
}

impl NativeArgs<'_> {
    /// Value bound to `name` by the method's pattern.
    pub fn get(&self, name: &str) -> RuntimeResult<Value> {
        self.scope
            .lookup(name)
            .ok_or_else(|| RuntimeError::UndefinedVariable(name.to_string()))
    }
}

pub type NativeFn =
    Arc<dyn Fn(&dyn Evaluator, &NativeArgs<'_>) -> RuntimeResult<Value> + Send + Sync>;

#[derive(Clone)]
pub enum MethodBody {
    Expr(Expr),
    Native(NativeFn),
}

impl fmt::Debug for MethodBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodBody::Expr(expr) => f.debug_tuple("Expr").field(expr).finish(),
            MethodBody::Native(_) => f.write_str("Native(..)"),
        }
    }
}

pub struct Method {
    id: MethodId,
    pattern: Pattern,
    closure: ScopeRef,
    body: MethodBody,
}

impl Method {
    pub fn new(pattern: Pattern, closure: ScopeRef, body: Expr) -> Self {
        Self::with_body(pattern, closure, MethodBody::Expr(body))
    }

    pub fn native<F>(pattern: Pattern, closure: ScopeRef, f: F) -> Self
    where
        F: Fn(&dyn Evaluator, &NativeArgs<'_>) -> RuntimeResult<Value> + Send + Sync + 'static,
    {
        Self::with_body(pattern, closure, MethodBody::Native(Arc::new(f)))
    }

    pub fn with_body(pattern: Pattern, closure: ScopeRef, body: MethodBody) -> Self {
        Self {
            id: MethodId::next(),
            pattern,
            closure,
            body,
        }
    }

    pub fn id(&self) -> MethodId {
        self.id
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn closure(&self) -> &ScopeRef {
        &self.closure
    }

    pub fn body(&self) -> &MethodBody {
        &self.body
    }

    /// Test the argument against this method's pattern without binding.
    pub fn matches(&self, evaluator: &dyn Evaluator, argument: &Value) -> RuntimeResult<bool> {
        pattern::matches(evaluator, &self.pattern, &self.closure, argument)
    }

    /// Bind the argument into a fresh level under the closure. `None` if the
    /// pattern does not match.
    pub fn bind_argument(
        &self,
        evaluator: &dyn Evaluator,
        argument: &Value,
    ) -> RuntimeResult<Option<ScopeRef>> {
        let scope = Scope::child(&self.closure);
        if pattern::bind(evaluator, &self.pattern, &self.closure, argument, &scope)? {
            Ok(Some(scope))
        } else {
            Ok(None)
        }
    }

    /// Run the body in `scope`, as produced by `bind_argument`.
    pub fn run(
        &self,
        evaluator: &dyn Evaluator,
        argument: &Value,
        scope: &ScopeRef,
    ) -> RuntimeResult<Value> {
        match &self.body {
            MethodBody::Expr(expr) => evaluator.evaluate(expr, scope),
            MethodBody::Native(f) => f(evaluator, &NativeArgs { argument, scope }),
        }
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("id", &self.id)
            .field("pattern", &format_args!("{}", self.pattern))
            .field("body", &self.body)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::Interpreter;

    #[test]
    fn test_ids_are_unique() {
        let closure = Scope::root();
        let a = Method::new(Pattern::Wildcard, closure.clone(), Expr::nothing());
        let b = Method::new(Pattern::Wildcard, closure, Expr::nothing());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_bind_and_run_expr_body() {
        let interp = Interpreter::new();
        let method = Method::new(
            Pattern::typed("x", "Int"),
            interp.globals().clone(),
            Expr::name("x"),
        );
        let scope = method.bind_argument(&interp, &Value::Int(4)).unwrap().unwrap();
        assert_eq!(method.run(&interp, &Value::Int(4), &scope).unwrap(), Value::Int(4));
        assert!(method.bind_argument(&interp, &Value::str("4")).unwrap().is_none());
    }

    #[test]
    fn test_native_body_sees_bindings() {
        let interp = Interpreter::new();
        let method = Method::native(
            Pattern::tuple(vec![Pattern::variable("a"), Pattern::variable("b")]),
            interp.globals().clone(),
            |_, args| {
                let a = args.get("a")?;
                let b = args.get("b")?;
                Ok(Value::tuple(vec![b, a]))
            },
        );
        let argument = Value::tuple(vec![Value::Int(1), Value::Int(2)]);
        let scope = method.bind_argument(&interp, &argument).unwrap().unwrap();
        assert_eq!(
            method.run(&interp, &argument, &scope).unwrap(),
            Value::tuple(vec![Value::Int(2), Value::Int(1)])
        );
    }

    #[test]
    fn test_bindings_do_not_leak_into_closure() {
        let interp = Interpreter::new();
        let method = Method::new(Pattern::variable("fresh"), interp.globals().clone(), Expr::nothing());
        method.bind_argument(&interp, &Value::Int(1)).unwrap();
        assert!(!interp.globals().defines_locally("fresh"));
    }
}
