//! Class instances

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use super::{ClassObj, Value};

/// An object: a class plus immutable ordered fields.
#[derive(Debug)]
pub struct Instance {
    class: Arc<ClassObj>,
    fields: IndexMap<String, Value>,
}

impl Instance {
    pub fn new(class: Arc<ClassObj>, fields: IndexMap<String, Value>) -> Self {
        Self { class, fields }
    }

    pub fn class(&self) -> &Arc<ClassObj> {
        &self.class
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.class.name())?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", name, value)?;
        }
        write!(f, ")")
    }
}
