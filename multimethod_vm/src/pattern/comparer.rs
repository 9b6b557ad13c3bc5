//! Specificity comparison between patterns
//!
//! `compare` answers which of two patterns is more specific, assuming some
//! single argument could match both. The answer is an `Option<Ordering>`:
//!
//! - `Some(Less)`: the left pattern is strictly more specific (sorts first)
//! - `Some(Greater)`: the right pattern is strictly more specific
//! - `Some(Equal)`: neither is more specific
//! - `None`: the patterns are incomparable
//!
//! Patterns of different kinds are ordered by kind rank
//! (`Value > TypeTest > Record > Wildcard`) and never come out incomparable.

use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::ast::Expr;
use crate::error::{RuntimeError, RuntimeResult};
use crate::evaluator::Evaluator;
use crate::scope::ScopeRef;
use crate::value::{ClassObj, Value};

use super::{Pattern, PatternKind};

pub struct PatternComparer<'a> {
    evaluator: &'a dyn Evaluator,
}

impl<'a> PatternComparer<'a> {
    pub fn new(evaluator: &'a dyn Evaluator) -> Self {
        Self { evaluator }
    }

    /// Compare `left` (defined in `left_closure`) against `right`.
    pub fn compare(
        &self,
        left: &Pattern,
        left_closure: &ScopeRef,
        right: &Pattern,
        right_closure: &ScopeRef,
    ) -> RuntimeResult<Option<Ordering>> {
        let (left_kind, right_kind) = (left.kind(), right.kind());
        if left_kind != right_kind {
            return Ok(Some(right_kind.rank().cmp(&left_kind.rank())));
        }

        match (left.unwrap_variables(), right.unwrap_variables()) {
            (Pattern::Value(a), Pattern::Value(b)) => {
                let a = self.evaluator.evaluate(a, left_closure)?;
                let b = self.evaluator.evaluate(b, right_closure)?;
                Ok(self
                    .evaluator
                    .values_equal(&a, &b)
                    .then_some(Ordering::Equal))
            }
            (Pattern::TypeTest(a), Pattern::TypeTest(b)) => {
                let a = self.class(a, left_closure)?;
                let b = self.class(b, right_closure)?;
                Ok(compare_classes(&a, &b))
            }
            (Pattern::Record(a), Pattern::Record(b)) => {
                self.compare_records(a, left_closure, b, right_closure)
            }
            _ => {
                debug_assert_eq!(left_kind, PatternKind::Wildcard);
                Ok(Some(Ordering::Equal))
            }
        }
    }

    fn compare_records(
        &self,
        left: &IndexMap<String, Pattern>,
        left_closure: &ScopeRef,
        right: &IndexMap<String, Pattern>,
        right_closure: &ScopeRef,
    ) -> RuntimeResult<Option<Ordering>> {
        let left_extra = left.keys().any(|name| !right.contains_key(name));
        let right_extra = right.keys().any(|name| !left.contains_key(name));

        // A record demanding more fields is the more specific one.
        let mut lean = match (left_extra, right_extra) {
            (true, true) => return Ok(None),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => Ordering::Equal,
        };

        for (name, left_field) in left {
            let Some(right_field) = right.get(name) else {
                continue;
            };
            let Some(field) = self.compare(left_field, left_closure, right_field, right_closure)?
            else {
                return Ok(None);
            };
            match (lean, field) {
                (_, Ordering::Equal) => {}
                (Ordering::Equal, _) => lean = field,
                _ if lean != field => return Ok(None),
                _ => {}
            }
        }

        Ok(Some(lean))
    }

    fn class(&self, expr: &Expr, closure: &ScopeRef) -> RuntimeResult<std::sync::Arc<ClassObj>> {
        match self.evaluator.evaluate(expr, closure)? {
            Value::Class(class) => Ok(class),
            other => Err(RuntimeError::type_error(format!(
                "type pattern {} evaluated to {}, which is not a class",
                expr, other
            ))),
        }
    }
}

fn compare_classes(a: &ClassObj, b: &ClassObj) -> Option<Ordering> {
    if std::ptr::eq(a, b) {
        Some(Ordering::Equal)
    } else if a.is_subclass_of(b) {
        Some(Ordering::Less)
    } else if b.is_subclass_of(a) {
        Some(Ordering::Greater)
    } else {
        None
    }
}

impl std::fmt::Debug for PatternComparer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternComparer").finish_non_exhaustive()
    }
}
