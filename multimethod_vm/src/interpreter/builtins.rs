//! Native built-ins
//!
//! Every built-in is an ordinary native method registered through
//! `define_native`, so specificity decides between e.g. the `Int` and `Num`
//! variants of `+`.

use crate::dispatch::NativeArgs;
use crate::error::{RuntimeError, RuntimeResult};
use crate::value::Value;

use super::Interpreter;

/// Binary operators with native implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinOp {
    Add,
    Sub,
    Mul,
    Lt,
}

impl BinOp {
    fn as_str(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Lt => "<",
        }
    }
}

pub(super) fn install(interp: &Interpreter) -> RuntimeResult<()> {
    for op in [BinOp::Add, BinOp::Sub, BinOp::Mul, BinOp::Lt] {
        let name = op.as_str();
        interp.define_native(name, "left Int, right Int", move |_, args| {
            let (left, right) = operands(args)?;
            int_binop(op, &left, &right)
        })?;
        interp.define_native(name, "left Num, right Num", move |_, args| {
            let (left, right) = operands(args)?;
            float_binop(op, as_f64(&left)?, as_f64(&right)?)
        })?;
    }

    interp.define_native("+", "left String, right String", |_, args| {
        let (left, right) = operands(args)?;
        Ok(Value::str(&format!("{}{}", as_str(&left)?, as_str(&right)?)))
    })?;
    interp.define_native("<", "left String, right String", |_, args| {
        let (left, right) = operands(args)?;
        Ok(Value::Bool(as_str(&left)? < as_str(&right)?))
    })?;

    interp.define_native("==", "left, right", |evaluator, args| {
        let (left, right) = operands(args)?;
        Ok(Value::Bool(evaluator.values_equal(&left, &right)))
    })?;
    interp.define_native("!=", "left, right", |evaluator, args| {
        let (left, right) = operands(args)?;
        Ok(Value::Bool(!evaluator.values_equal(&left, &right)))
    })?;

    interp.define_native("class", "value", |evaluator, args| {
        Ok(Value::Class(evaluator.class_of(&args.get("value")?)))
    })?;
    interp.define_native("is", "value, class Class", |evaluator, args| {
        let value = args.get("value")?;
        let class = args.get("class")?;
        let class = class
            .as_class()
            .ok_or_else(|| RuntimeError::type_error(format!("{} is not a class", class)))?;
        Ok(Value::Bool(evaluator.class_of(&value).is_subclass_of(class)))
    })?;

    interp.define_native("string", "value", |_, args| {
        Ok(Value::str(&args.get("value")?.to_string()))
    })?;
    interp.define_native("string", "text String", |_, args| args.get("text"))?;

    Ok(())
}

fn operands(args: &NativeArgs<'_>) -> RuntimeResult<(Value, Value)> {
    Ok((args.get("left")?, args.get("right")?))
}

fn as_f64(value: &Value) -> RuntimeResult<f64> {
    match value {
        Value::Int(v) => Ok(*v as f64),
        Value::Float(v) => Ok(*v),
        other => Err(RuntimeError::type_error(format!("{} is not a number", other))),
    }
}

fn as_str(value: &Value) -> RuntimeResult<&str> {
    match value {
        Value::Str(s) => Ok(&**s),
        other => Err(RuntimeError::type_error(format!("{} is not a string", other))),
    }
}

fn int_binop(op: BinOp, left: &Value, right: &Value) -> RuntimeResult<Value> {
    let (Value::Int(a), Value::Int(b)) = (left, right) else {
        return Err(RuntimeError::type_error(format!(
            "{}({}, {}) expects integers",
            op.as_str(),
            left,
            right
        )));
    };
    let overflow = || RuntimeError::arithmetic(format!("{} {} {} overflows", a, op.as_str(), b));
    match op {
        BinOp::Add => a.checked_add(*b).map(Value::Int).ok_or_else(overflow),
        BinOp::Sub => a.checked_sub(*b).map(Value::Int).ok_or_else(overflow),
        BinOp::Mul => a.checked_mul(*b).map(Value::Int).ok_or_else(overflow),
        BinOp::Lt => Ok(Value::Bool(a < b)),
    }
}

fn float_binop(op: BinOp, a: f64, b: f64) -> RuntimeResult<Value> {
    Ok(match op {
        BinOp::Add => Value::Float(a + b),
        BinOp::Sub => Value::Float(a - b),
        BinOp::Mul => Value::Float(a * b),
        BinOp::Lt => Value::Bool(a < b),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interpreter() -> Interpreter {
        let interp = Interpreter::new();
        install(&interp).unwrap();
        interp
    }

    #[test]
    fn test_integer_arithmetic() {
        let interp = interpreter();
        assert_eq!(interp.call2("+", Value::Int(1), Value::Int(2)).unwrap(), Value::Int(3));
        assert_eq!(interp.call2("-", Value::Int(1), Value::Int(2)).unwrap(), Value::Int(-1));
        assert_eq!(interp.call2("*", Value::Int(3), Value::Int(4)).unwrap(), Value::Int(12));
        assert_eq!(interp.call2("<", Value::Int(3), Value::Int(4)).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_mixed_numbers_use_float() {
        let interp = interpreter();
        assert_eq!(
            interp.call2("+", Value::Int(1), Value::Float(0.5)).unwrap(),
            Value::Float(1.5)
        );
        assert_eq!(
            interp.call2("*", Value::Float(2.0), Value::Float(0.25)).unwrap(),
            Value::Float(0.5)
        );
    }

    #[test]
    fn test_overflow() {
        let interp = interpreter();
        let err = interp.call2("+", Value::Int(i64::MAX), Value::Int(1)).unwrap_err();
        assert!(matches!(err, RuntimeError::Arithmetic(_)), "got {:?}", err);
    }

    #[test]
    fn test_strings() {
        let interp = interpreter();
        assert_eq!(
            interp.call2("+", Value::str("a"), Value::str("b")).unwrap(),
            Value::str("ab")
        );
        assert_eq!(
            interp.call2("<", Value::str("a"), Value::str("b")).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(interp.call("string", Value::str("s")).unwrap(), Value::str("s"));
        assert_eq!(interp.call("string", Value::Int(7)).unwrap(), Value::str("7"));
    }

    #[test]
    fn test_equality() {
        let interp = interpreter();
        assert_eq!(interp.call2("==", Value::Int(1), Value::Int(1)).unwrap(), Value::Bool(true));
        assert_eq!(
            interp.call2("!=", Value::Int(1), Value::Float(1.0)).unwrap(),
            Value::Bool(true)
        );
    }

    #[test]
    fn test_class_and_is() {
        let interp = interpreter();
        let int = Value::Class(interp.classes().int.clone());
        let num = Value::Class(interp.classes().num.clone());
        assert_eq!(interp.call("class", Value::Int(1)).unwrap(), int);
        assert_eq!(interp.call2("is", Value::Int(1), num).unwrap(), Value::Bool(true));
        let string = Value::Class(interp.classes().string.clone());
        assert_eq!(interp.call2("is", Value::Int(1), string).unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_mismatched_operands() {
        let interp = interpreter();
        let err = interp.call2("+", Value::Int(1), Value::str("a")).unwrap_err();
        assert!(matches!(err, RuntimeError::NoMethod { .. }), "got {:?}", err);
    }
}
