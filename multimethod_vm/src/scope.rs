//! Lexical scopes
//!
//! A scope is one lexical level of name bindings plus an optional parent.
//! Bindings are never reassigned: `define` refuses a name the level already
//! holds.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;

use crate::value::Value;

pub type ScopeRef = Arc<Scope>;

pub struct Scope {
    parent: Option<ScopeRef>,
    bindings: Mutex<IndexMap<String, Value>>,
}

impl Scope {
    /// A scope with no parent.
    pub fn root() -> ScopeRef {
        Arc::new(Self {
            parent: None,
            bindings: Mutex::new(IndexMap::new()),
        })
    }

    /// A fresh, empty level whose lookups fall through to `parent`.
    pub fn child(parent: &ScopeRef) -> ScopeRef {
        Arc::new(Self {
            parent: Some(parent.clone()),
            bindings: Mutex::new(IndexMap::new()),
        })
    }

    pub fn parent(&self) -> Option<&ScopeRef> {
        self.parent.as_ref()
    }

    /// Bind `name` at this level. Returns false if it is already bound here.
    pub fn define(&self, name: impl Into<String>, value: Value) -> bool {
        let mut bindings = self.bindings.lock();
        let name = name.into();
        if bindings.contains_key(&name) {
            return false;
        }
        bindings.insert(name, value);
        true
    }

    pub fn defines_locally(&self, name: &str) -> bool {
        self.bindings.lock().contains_key(name)
    }

    /// Look `name` up through this level and its ancestors.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.lock().get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|parent| parent.lookup(name))
    }

    /// Names bound at this level, in definition order.
    pub fn local_names(&self) -> Vec<String> {
        self.bindings.lock().keys().cloned().collect()
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("names", &self.local_names())
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_refuses_local_rebinding() {
        let scope = Scope::root();
        assert!(scope.define("a", Value::Int(1)));
        assert!(!scope.define("a", Value::Int(2)));
        assert_eq!(scope.lookup("a"), Some(Value::Int(1)));
    }

    #[test]
    fn test_child_shadows_parent() {
        let parent = Scope::root();
        parent.define("a", Value::Int(1));
        let child = Scope::child(&parent);
        assert!(!child.defines_locally("a"));
        assert_eq!(child.lookup("a"), Some(Value::Int(1)));

        assert!(child.define("a", Value::Int(2)));
        assert_eq!(child.lookup("a"), Some(Value::Int(2)));
        assert_eq!(parent.lookup("a"), Some(Value::Int(1)));
    }

    #[test]
    fn test_lookup_missing() {
        let scope = Scope::child(&Scope::root());
        assert_eq!(scope.lookup("nope"), None);
    }
}
