//! Expression evaluation

use std::sync::Arc;

use indexmap::IndexMap;

use crate::ast::Expr;
use crate::error::{RuntimeError, RuntimeResult};
use crate::evaluator::Evaluator;
use crate::scope::{Scope, ScopeRef};
use crate::value::{ClassObj, RecordValue, Value};

use super::Interpreter;

impl Evaluator for Interpreter {
    fn evaluate(&self, expr: &Expr, scope: &ScopeRef) -> RuntimeResult<Value> {
        match expr {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Name(name) => scope
                .lookup(name)
                .ok_or_else(|| RuntimeError::UndefinedVariable(name.clone())),
            Expr::Record(fields) => {
                let mut values = IndexMap::with_capacity(fields.len());
                for (name, field) in fields {
                    values.insert(name.clone(), self.evaluate(field, scope)?);
                }
                Ok(Value::Record(Arc::new(RecordValue::new(values))))
            }
            Expr::Field { target, name } => {
                let target = self.evaluate(target, scope)?;
                target.field(name).ok_or_else(|| RuntimeError::NoField {
                    field: name.clone(),
                    value: target.to_string(),
                })
            }
            Expr::Call { name, arg } => {
                let callee = scope
                    .lookup(name)
                    .ok_or_else(|| RuntimeError::UndefinedVariable(name.clone()))?;
                let Value::Multimethod(multimethod) = callee else {
                    return Err(RuntimeError::NotCallable(name.clone()));
                };
                let argument = self.evaluate(arg, scope)?;
                multimethod.invoke(self, &argument)
            }
            Expr::Block(exprs) => {
                let inner = Scope::child(scope);
                let mut result = Value::Nothing;
                for expr in exprs {
                    result = self.evaluate(expr, &inner)?;
                }
                Ok(result)
            }
        }
    }

    fn class_of(&self, value: &Value) -> Arc<ClassObj> {
        let classes = &self.classes;
        match value {
            Value::Nothing => classes.nothing.clone(),
            Value::Bool(_) => classes.bool.clone(),
            Value::Int(_) => classes.int.clone(),
            Value::Float(_) => classes.float.clone(),
            Value::Str(_) => classes.string.clone(),
            Value::Record(_) => classes.record.clone(),
            Value::Class(_) => classes.class.clone(),
            Value::Object(instance) => instance.class().clone(),
            Value::Multimethod(_) => classes.multimethod.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Pattern;

    #[test]
    fn test_literals_and_names() {
        let interp = Interpreter::new();
        assert_eq!(interp.run(&Expr::int(3)).unwrap(), Value::Int(3));
        assert!(matches!(interp.run(&Expr::name("Int")).unwrap(), Value::Class(_)));
        let err = interp.run(&Expr::name("nope")).unwrap_err();
        assert!(matches!(err, RuntimeError::UndefinedVariable(ref n) if n == "nope"));
    }

    #[test]
    fn test_record_and_field() {
        let interp = Interpreter::new();
        let record = Expr::record(vec![("x", Expr::int(1)), ("y", Expr::str("two"))]);
        assert_eq!(
            interp.run(&Expr::field(record.clone(), "y")).unwrap(),
            Value::str("two")
        );
        let err = interp.run(&Expr::field(record, "z")).unwrap_err();
        assert!(matches!(err, RuntimeError::NoField { ref field, .. } if field == "z"));
    }

    #[test]
    fn test_block_yields_last_value() {
        let interp = Interpreter::new();
        assert_eq!(interp.run(&Expr::Block(vec![])).unwrap(), Value::Nothing);
        assert_eq!(
            interp.run(&Expr::Block(vec![Expr::int(1), Expr::int(2)])).unwrap(),
            Value::Int(2)
        );
    }

    #[test]
    fn test_call_requires_multimethod() {
        let interp = Interpreter::new();
        let err = interp.run(&Expr::call("Int", Expr::nothing())).unwrap_err();
        assert!(matches!(err, RuntimeError::NotCallable(_)), "got {:?}", err);
    }

    #[test]
    fn test_call_dispatches() {
        let interp = Interpreter::new();
        interp
            .define_method("id", Pattern::variable("x"), Expr::name("x"))
            .unwrap();
        assert_eq!(
            interp.run(&Expr::call("id", Expr::str("v"))).unwrap(),
            Value::str("v")
        );
    }

    #[test]
    fn test_class_of() {
        let interp = Interpreter::new();
        let classes = interp.classes();
        assert!(Arc::ptr_eq(&interp.class_of(&Value::Int(1)), &classes.int));
        assert!(Arc::ptr_eq(&interp.class_of(&Value::str("a")), &classes.string));
        assert!(Arc::ptr_eq(
            &interp.class_of(&Value::tuple(vec![])),
            &classes.record
        ));
        let point = interp.define_class("Point", &[]).unwrap();
        let p = interp.instantiate(&point, [("x", Value::Int(0))]);
        assert!(Arc::ptr_eq(&interp.class_of(&p), &point));
    }
}
