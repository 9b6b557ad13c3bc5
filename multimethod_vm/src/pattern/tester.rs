//! Pattern tester
//!
//! Matches a value against a pattern. Variable bindings are staged while the
//! match runs and written to the target scope only once the whole pattern
//! has matched, so a failed match leaves the scope untouched.

use crate::error::{RuntimeError, RuntimeResult};
use crate::evaluator::Evaluator;
use crate::scope::{Scope, ScopeRef};
use crate::value::Value;

use super::{Pattern, DISCARD};

pub struct PatternTester<'a> {
    evaluator: &'a dyn Evaluator,
    /// Scope the pattern's embedded expressions are evaluated in
    closure: &'a ScopeRef,
    /// Scope that receives the bindings; checked for redefinitions
    target: Option<&'a Scope>,
    pending: Vec<(String, Value)>,
}

impl<'a> PatternTester<'a> {
    pub fn new(evaluator: &'a dyn Evaluator, closure: &'a ScopeRef) -> Self {
        Self {
            evaluator,
            closure,
            target: None,
            pending: Vec::new(),
        }
    }

    /// Stage bindings for `scope`. Names it already defines locally are
    /// redefinitions.
    pub fn binding_into(mut self, scope: &'a Scope) -> Self {
        self.target = Some(scope);
        self
    }

    /// Test `value` against `pattern`, staging any bindings.
    pub fn test(&mut self, pattern: &Pattern, value: &Value) -> RuntimeResult<bool> {
        match pattern {
            Pattern::Wildcard => Ok(true),
            Pattern::Variable { name, inner } => {
                self.stage(name, value)?;
                match inner {
                    Some(inner) => self.test(inner, value),
                    None => Ok(true),
                }
            }
            Pattern::Value(expr) => {
                let expected = self.evaluator.evaluate(expr, self.closure)?;
                Ok(self.evaluator.values_equal(&expected, value))
            }
            Pattern::TypeTest(expr) => {
                let expected = self.evaluator.evaluate(expr, self.closure)?;
                let Value::Class(expected) = expected else {
                    return Err(RuntimeError::type_error(format!(
                        "type pattern {} evaluated to {}, which is not a class",
                        expr, expected
                    )));
                };
                Ok(self.evaluator.class_of(value).is_subclass_of(&expected))
            }
            Pattern::Record(fields) => {
                for (name, field_pattern) in fields {
                    let Some(field) = value.field(name) else {
                        return Ok(false);
                    };
                    if !self.test(field_pattern, &field)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
        }
    }

    fn stage(&mut self, name: &str, value: &Value) -> RuntimeResult<()> {
        if name == DISCARD {
            return Ok(());
        }
        let staged = self.pending.iter().any(|(n, _)| n == name);
        let bound = self.target.is_some_and(|scope| scope.defines_locally(name));
        if staged || bound {
            return Err(RuntimeError::redefinition(name));
        }
        self.pending.push((name.to_string(), value.clone()));
        Ok(())
    }

    /// Bindings staged so far, in pattern order.
    pub fn bindings(&self) -> &[(String, Value)] {
        &self.pending
    }

    /// Write the staged bindings into the target scope.
    pub fn commit(self) -> RuntimeResult<()> {
        let Some(scope) = self.target else {
            return Ok(());
        };
        for (name, value) in self.pending {
            if !scope.define(name.as_str(), value) {
                return Err(RuntimeError::redefinition(name));
            }
        }
        Ok(())
    }
}

/// Test without binding anything.
pub fn matches(
    evaluator: &dyn Evaluator,
    pattern: &Pattern,
    closure: &ScopeRef,
    value: &Value,
) -> RuntimeResult<bool> {
    PatternTester::new(evaluator, closure).test(pattern, value)
}

/// Test and, on a match, define the pattern's variables in `scope`.
pub fn bind(
    evaluator: &dyn Evaluator,
    pattern: &Pattern,
    closure: &ScopeRef,
    value: &Value,
    scope: &Scope,
) -> RuntimeResult<bool> {
    let mut tester = PatternTester::new(evaluator, closure).binding_into(scope);
    if !tester.test(pattern, value)? {
        return Ok(false);
    }
    tester.commit()?;
    Ok(true)
}

impl std::fmt::Debug for PatternTester<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternTester")
            .field("pending", &self.pending)
            .field("has_target", &self.target.is_some())
            .finish()
    }
}
