//! Shared helpers for integration tests
// Each test target uses a different subset of these helpers.
#![allow(dead_code)]

use multimethod_vm::{
    ConcurrencyPolicy, DispatchConfig, Expr, Interpreter, Pattern, RuntimeError, RuntimeResult,
    Value,
};

/// Interpreter with the native built-ins installed.
pub fn interpreter() -> Interpreter {
    let interp = Interpreter::new();
    interp
        .install_builtins()
        .unwrap_or_else(|e| panic!("failed to install builtins: {}", e));
    interp
}

/// Interpreter that refuses new methods once a multimethod has been called.
pub fn frozen_interpreter() -> Interpreter {
    let interp = Interpreter::with_config(DispatchConfig {
        concurrency: ConcurrencyPolicy::FreezeOnFirstDispatch,
        ..DispatchConfig::default()
    });
    interp.install_builtins().unwrap();
    interp
}

/// Parse pattern source, panicking on syntax errors.
pub fn pattern(interp: &Interpreter, source: &str) -> Pattern {
    interp
        .parse_pattern(source)
        .unwrap_or_else(|e| panic!("bad pattern {:?}: {}", source, e))
}

/// Define a method on `name` whose body returns the string `tag`.
pub fn define_tagged(interp: &Interpreter, name: &str, source: &str, tag: &str) {
    let result = interp.define_method(name, pattern(interp, source), Expr::str(tag));
    assert!(result.is_ok(), "Failed: {:?}", result);
}

/// Call `name` and expect the tag of the winning method.
pub fn assert_selects(interp: &Interpreter, name: &str, argument: Value, tag: &str) {
    match interp.call(name, argument.clone()) {
        Ok(value) => assert_eq!(value, Value::str(tag), "{}({})", name, argument),
        Err(e) => panic!("{}({}) failed: {}", name, argument, e),
    }
}

pub fn expect_err(result: RuntimeResult<Value>) -> RuntimeError {
    match result {
        Ok(value) => panic!("expected an error, got {}", value),
        Err(e) => e,
    }
}
