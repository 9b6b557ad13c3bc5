//! Runtime error types
//!
//! Every failure the dispatch core can report travels through
//! `RuntimeError`. The interpreter turns these into language-level error
//! objects on request (see `Interpreter::error_value`).

use multimethod_vm_parser::ParseError;
use thiserror::Error;

/// Runtime error type
#[derive(Debug, Clone, Error)]
pub enum RuntimeError {
    /// A variable pattern tried to bind a name the target scope already holds
    #[error("RedefinitionError: there is already a variable named \"{name}\" in this scope")]
    Redefinition { name: String },

    /// No method of the multimethod matched the argument
    #[error("NoMethodError: no method of \"{name}\" matches argument {argument}")]
    NoMethod { name: String, argument: String },

    /// Two mutually incomparable methods both matched the argument
    #[error("AmbiguousMethodError: cannot choose a method of \"{name}\" between {first} and {second}")]
    AmbiguousMethod {
        name: String,
        first: String,
        second: String,
    },

    /// Method added after the first dispatch under the freeze policy
    #[error("FrozenMultimethodError: cannot add a method to \"{name}\" after it has been called")]
    FrozenMultimethod { name: String },

    /// Name lookup failed
    #[error("UndefinedVariableError: \"{0}\" is not defined")]
    UndefinedVariable(String),

    /// A call target did not resolve to a multimethod
    #[error("NotCallableError: \"{0}\" is not a multimethod")]
    NotCallable(String),

    /// Field access on a value that lacks the field
    #[error("NoFieldError: {value} has no field \"{field}\"")]
    NoField { field: String, value: String },

    /// Type mismatch error
    #[error("TypeError: {0}")]
    TypeError(String),

    /// Arithmetic failure in a native built-in (overflow, division by zero)
    #[error("ArithmeticError: {0}")]
    Arithmetic(String),

    /// Pattern source text could not be parsed
    #[error("ParseError: {0}")]
    Parse(#[from] ParseError),

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

impl RuntimeError {
    pub fn no_method<S1: Into<String>, S2: Into<String>>(name: S1, argument: S2) -> Self {
        RuntimeError::NoMethod {
            name: name.into(),
            argument: argument.into(),
        }
    }

    pub fn ambiguous_method<S1, S2, S3>(name: S1, first: S2, second: S3) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        RuntimeError::AmbiguousMethod {
            name: name.into(),
            first: first.into(),
            second: second.into(),
        }
    }

    pub fn redefinition<S: Into<String>>(name: S) -> Self {
        RuntimeError::Redefinition { name: name.into() }
    }

    pub fn type_error<S: Into<String>>(msg: S) -> Self {
        RuntimeError::TypeError(msg.into())
    }

    pub fn arithmetic<S: Into<String>>(msg: S) -> Self {
        RuntimeError::Arithmetic(msg.into())
    }

    pub fn custom<S: Into<String>>(msg: S) -> Self {
        RuntimeError::Custom(msg.into())
    }

    /// Name of the language-level error class this error surfaces as
    pub fn class_name(&self) -> &'static str {
        match self {
            RuntimeError::Redefinition { .. } => "RedefinitionError",
            RuntimeError::NoMethod { .. } => "NoMethodError",
            RuntimeError::AmbiguousMethod { .. } => "AmbiguousMethodError",
            _ => "Error",
        }
    }
}

/// Result type alias for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;
