//! Nominal classes
//!
//! Classes are compared by identity. A class is a subclass of itself and of
//! every class reachable through its parent list.

use std::fmt;
use std::sync::Arc;

pub struct ClassObj {
    name: String,
    parents: Vec<Arc<ClassObj>>,
}

impl ClassObj {
    pub fn new(name: impl Into<String>, parents: Vec<Arc<ClassObj>>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            parents,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parents(&self) -> &[Arc<ClassObj>] {
        &self.parents
    }

    /// Reflexive, transitive subclass check.
    pub fn is_subclass_of(&self, other: &ClassObj) -> bool {
        std::ptr::eq(self, other) || self.parents.iter().any(|p| p.is_subclass_of(other))
    }
}

impl fmt::Debug for ClassObj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassObj")
            .field("name", &self.name)
            .field(
                "parents",
                &self.parents.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl fmt::Display for ClassObj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
