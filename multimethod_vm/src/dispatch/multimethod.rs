//! Multimethods
//!
//! A multimethod owns an append-only method list and a lazily rebuilt
//! method graph. The graph slot is cleared whenever a method is added and
//! refilled by the next call.
//!
//! Calls never hold a lock while testing patterns or running bodies, since
//! both may call back into the same multimethod. A call snapshots the
//! method list, builds a graph from the snapshot, and installs it only if
//! no method was added in the meantime.

use std::fmt::{self, Write as _};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::config::{ConcurrencyPolicy, DispatchConfig};
use crate::error::{RuntimeError, RuntimeResult};
use crate::evaluator::Evaluator;
use crate::pattern::{Pattern, PatternComparer};
use crate::value::Value;

use super::cache::ComparisonCache;
use super::graph::MethodGraph;
use super::method::Method;

pub struct Multimethod {
    name: String,
    config: DispatchConfig,
    methods: RwLock<Vec<Arc<Method>>>,
    /// `None` when stale
    graph: Mutex<Option<Arc<MethodGraph>>>,
    cache: ComparisonCache,
    dispatched: AtomicBool,
}

impl Multimethod {
    pub fn new(name: impl Into<String>, config: DispatchConfig) -> Self {
        Self {
            name: name.into(),
            config,
            methods: RwLock::new(Vec::new()),
            graph: Mutex::new(None),
            cache: ComparisonCache::new(),
            dispatched: AtomicBool::new(false),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.methods.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.read().is_empty()
    }

    /// Snapshot of the methods in definition order.
    pub fn methods(&self) -> Vec<Arc<Method>> {
        self.methods.read().clone()
    }

    /// One line per method, in definition order, showing how the method is
    /// called: `name(pattern)`.
    pub fn describe(&self) -> String {
        let mut doc = String::new();
        for method in self.methods.read().iter() {
            let _ = match method.pattern() {
                record @ Pattern::Record(_) => writeln!(doc, "{}{}", self.name, record),
                other => writeln!(doc, "{}({})", self.name, other),
            };
        }
        doc
    }

    /// True when the next call has to rebuild the method graph.
    pub fn is_stale(&self) -> bool {
        self.graph.lock().is_none()
    }

    /// Append a method and mark the graph stale.
    pub fn add_method(&self, method: Method) -> RuntimeResult<Arc<Method>> {
        let mut methods = self.methods.write();
        if self.config.concurrency == ConcurrencyPolicy::FreezeOnFirstDispatch
            && self.dispatched.load(Ordering::Acquire)
        {
            return Err(RuntimeError::FrozenMultimethod {
                name: self.name.clone(),
            });
        }
        let method = Arc::new(method);
        methods.push(method.clone());
        *self.graph.lock() = None;
        Ok(method)
    }

    /// The current method graph, rebuilt first if stale.
    pub fn method_graph(&self, evaluator: &dyn Evaluator) -> RuntimeResult<Arc<MethodGraph>> {
        let installed = self.graph.lock().clone();
        if let Some(graph) = installed {
            return Ok(graph);
        }

        let snapshot = self.methods();
        let comparer = PatternComparer::new(evaluator);
        let graph = Arc::new(MethodGraph::build(&snapshot, &comparer, &self.cache)?);
        debug!(
            multimethod = %self.name,
            methods = snapshot.len(),
            cached_comparisons = self.cache.len(),
            "rebuilt method graph"
        );

        let methods = self.methods.read();
        if methods.len() == snapshot.len() {
            *self.graph.lock() = Some(graph.clone());
        }
        Ok(graph)
    }

    /// Call the multimethod with a single argument.
    pub fn invoke(&self, evaluator: &dyn Evaluator, argument: &Value) -> RuntimeResult<Value> {
        self.dispatched.store(true, Ordering::Release);

        let graph = self.method_graph(evaluator)?;
        let method = graph.select(evaluator, argument, &self.name, self.config.trace_dispatch)?;
        let Some(scope) = method.bind_argument(evaluator, argument)? else {
            return Err(RuntimeError::no_method(&self.name, argument.to_string()));
        };
        method.run(evaluator, argument, &scope)
    }

    /// Call with a positional `(left, right)` pair.
    pub fn invoke2(
        &self,
        evaluator: &dyn Evaluator,
        left: Value,
        right: Value,
    ) -> RuntimeResult<Value> {
        self.invoke(evaluator, &Value::tuple(vec![left, right]))
    }
}

impl fmt::Debug for Multimethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Multimethod")
            .field("name", &self.name)
            .field("methods", &self.len())
            .field("stale", &self.is_stale())
            .finish()
    }
}
