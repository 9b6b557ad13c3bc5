//! Memoized method comparisons
//!
//! Results are stored once per unordered method pair under the key
//! `(smaller id, larger id)`; the other direction is the reversed ordering.
//! Methods never change, so entries stay valid for the life of the
//! multimethod, across graph rebuilds.

use std::cmp::Ordering;
use std::collections::HashMap;

use parking_lot::Mutex;

use crate::error::RuntimeResult;
use crate::pattern::PatternComparer;

use super::method::{Method, MethodId};

#[derive(Debug, Default)]
pub struct ComparisonCache {
    entries: Mutex<HashMap<(MethodId, MethodId), Option<Ordering>>>,
}

impl ComparisonCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare `a` against `b`, computing and storing the result on a miss.
    ///
    /// The lock is released while comparing: evaluating a pattern's
    /// expression may dispatch on the same multimethod.
    pub fn compare(
        &self,
        comparer: &PatternComparer<'_>,
        a: &Method,
        b: &Method,
    ) -> RuntimeResult<Option<Ordering>> {
        let flipped = a.id() > b.id();
        let (first, second) = if flipped { (b, a) } else { (a, b) };
        let key = (first.id(), second.id());

        let cached = self.entries.lock().get(&key).copied();
        let canonical = match cached {
            Some(result) => result,
            None => {
                let result = comparer.compare(
                    first.pattern(),
                    first.closure(),
                    second.pattern(),
                    second.closure(),
                )?;
                self.entries.lock().insert(key, result);
                result
            }
        };

        Ok(if flipped {
            canonical.map(Ordering::reverse)
        } else {
            canonical
        })
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
