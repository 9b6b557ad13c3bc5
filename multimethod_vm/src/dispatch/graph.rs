//! Method graph
//!
//! The graph is derived from a multimethod's method list. It holds the
//! methods in most-specific-first topological order and, for each method,
//! the later methods it does not strictly dominate. Selection tests methods
//! best-first and, after the first match, only has to check that method's
//! remaining set for a tie.

use std::cmp::Ordering;
use std::ops::Range;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::error::{RuntimeError, RuntimeResult};
use crate::evaluator::Evaluator;
use crate::pattern::PatternComparer;
use crate::value::Value;

use super::cache::ComparisonCache;
use super::method::Method;

#[derive(Debug)]
pub struct MethodGraph {
    sorted: Vec<Arc<Method>>,
    /// Flat storage for every method's remaining set (indices into `sorted`)
    remaining: Vec<usize>,
    /// `remaining[spans[i]]` is the remaining set of `sorted[i]`
    spans: Vec<Range<usize>>,
}

impl MethodGraph {
    /// Sort `methods` by specificity and precompute remaining sets.
    pub fn build(
        methods: &[Arc<Method>],
        comparer: &PatternComparer<'_>,
        cache: &ComparisonCache,
    ) -> RuntimeResult<Self> {
        let sorted = topological_sort(methods, comparer, cache)?;

        let mut remaining = Vec::new();
        let mut spans = Vec::with_capacity(sorted.len());
        for (i, method) in sorted.iter().enumerate() {
            let start = remaining.len();
            for (j, later) in sorted.iter().enumerate().skip(i + 1) {
                if cache.compare(comparer, method, later)? != Some(Ordering::Less) {
                    remaining.push(j);
                }
            }
            spans.push(start..remaining.len());
        }

        Ok(Self {
            sorted,
            remaining,
            spans,
        })
    }

    pub fn sorted(&self) -> &[Arc<Method>] {
        &self.sorted
    }

    /// Later methods that could tie with `sorted()[index]`.
    pub fn remaining(&self, index: usize) -> impl Iterator<Item = &Arc<Method>> + '_ {
        let span = self.spans.get(index).cloned().unwrap_or(0..0);
        self.remaining[span].iter().map(move |&j| &self.sorted[j])
    }

    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// Pick the unique most specific method matching `argument`.
    ///
    /// `name` only labels errors and log events. With `trace_candidates`
    /// every tested candidate is logged.
    pub fn select(
        &self,
        evaluator: &dyn Evaluator,
        argument: &Value,
        name: &str,
        trace_candidates: bool,
    ) -> RuntimeResult<&Arc<Method>> {
        for (i, method) in self.sorted.iter().enumerate() {
            let matched = method.matches(evaluator, argument)?;
            if trace_candidates {
                trace!(multimethod = name, candidate = %method.pattern(), matched, "tested candidate");
            }
            if !matched {
                continue;
            }

            for rival in self.remaining(i) {
                let tied = rival.matches(evaluator, argument)?;
                if trace_candidates {
                    trace!(multimethod = name, rival = %rival.pattern(), tied, "tested rival");
                }
                if tied {
                    return Err(RuntimeError::ambiguous_method(
                        name,
                        method.pattern().to_string(),
                        rival.pattern().to_string(),
                    ));
                }
            }

            debug!(multimethod = name, method = %method.pattern(), "selected method");
            return Ok(method);
        }

        Err(RuntimeError::no_method(name, argument.to_string()))
    }
}

/// Repeatedly place every unplaced method that no other unplaced method is
/// strictly more specific than. Ties keep insertion order.
fn topological_sort(
    methods: &[Arc<Method>],
    comparer: &PatternComparer<'_>,
    cache: &ComparisonCache,
) -> RuntimeResult<Vec<Arc<Method>>> {
    let mut sorted = Vec::with_capacity(methods.len());
    let mut unplaced: Vec<Arc<Method>> = methods.to_vec();

    while !unplaced.is_empty() {
        let mut maximal = vec![false; unplaced.len()];
        for (i, candidate) in unplaced.iter().enumerate() {
            let mut dominated = false;
            for (j, other) in unplaced.iter().enumerate() {
                if i != j && cache.compare(comparer, other, candidate)? == Some(Ordering::Less) {
                    dominated = true;
                    break;
                }
            }
            maximal[i] = !dominated;
        }

        if !maximal.contains(&true) {
            warn!(
                unplaced = unplaced.len(),
                "method specificity has a cycle; ordering the rest by definition"
            );
            sorted.append(&mut unplaced);
            break;
        }

        let (placed, rest): (Vec<_>, Vec<_>) = unplaced
            .into_iter()
            .zip(maximal)
            .partition(|(_, is_maximal)| *is_maximal);
        sorted.extend(placed.into_iter().map(|(method, _)| method));
        unplaced = rest.into_iter().map(|(method, _)| method).collect();
    }

    Ok(sorted)
}
