//! multimethod_vm
//!
//! Runtime core for a dynamically typed language whose calls dispatch on
//! argument patterns. Each callable name owns a multimethod; calling it picks
//! the unique most specific method whose pattern matches the argument.
//!
//! - `pattern`: the pattern model, tester and specificity comparer
//! - `dispatch`: methods, the cached method graph and multimethods
//! - `interpreter`: a small evaluator, the core classes and native built-ins

// Library code reports through `tracing`, never directly to stderr.
#![deny(clippy::print_stderr)]

pub mod ast;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod evaluator;
pub mod interpreter;
pub mod pattern;
pub mod scope;
pub mod value;

pub use ast::Expr;
pub use config::{ConcurrencyPolicy, ConfigError, DispatchConfig};
pub use dispatch::{Method, MethodBody, MethodGraph, Multimethod, NativeArgs};
pub use error::{RuntimeError, RuntimeResult};
pub use evaluator::Evaluator;
pub use interpreter::{CoreClasses, Interpreter};
pub use pattern::{Pattern, PatternKind};
pub use scope::{Scope, ScopeRef};
pub use value::{ClassObj, Instance, RecordValue, Value};

/// Get version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
