//! Runtime values
//!
//! Values are cheap to clone: everything larger than a scalar lives behind
//! an `Arc`, so values can be shared across threads.

mod class;
mod instance;
mod record;

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::dispatch::Multimethod;

pub use class::ClassObj;
pub use instance::Instance;
pub use record::RecordValue;
pub(crate) use record::is_positional_keys;

#[derive(Debug, Clone)]
pub enum Value {
    // ========== Scalars ==========
    Nothing,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Arc<str>),

    // ========== Composite ==========
    /// Ordered field map; tuples use keys "0", "1", ...
    Record(Arc<RecordValue>),

    // ========== Identity-compared ==========
    Class(Arc<ClassObj>),
    Object(Arc<Instance>),
    Multimethod(Arc<Multimethod>),
}

impl Value {
    pub fn str(s: &str) -> Self {
        Value::Str(Arc::from(s))
    }

    /// Build a positional record from the given elements.
    pub fn tuple(values: Vec<Value>) -> Self {
        Value::Record(Arc::new(RecordValue::positional(values)))
    }

    /// Build a record with named fields, keeping the given order.
    pub fn record<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        let fields: IndexMap<String, Value> =
            fields.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Value::Record(Arc::new(RecordValue::new(fields)))
    }

    /// Look up a field on a record or object.
    pub fn field(&self, name: &str) -> Option<Value> {
        match self {
            Value::Record(record) => record.get(name).cloned(),
            Value::Object(instance) => instance.get(name).cloned(),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&Arc<ClassObj>> {
        match self {
            Value::Class(class) => Some(class),
            _ => None,
        }
    }
}

/// Deep equality for scalars, strings and records; identity for classes,
/// objects and multimethods. `Int` and `Float` never compare equal.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nothing, Value::Nothing) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => Arc::ptr_eq(a, b) || a == b,
            (Value::Class(a), Value::Class(b)) => Arc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            (Value::Multimethod(a), Value::Multimethod(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nothing => write!(f, "nothing"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{:?}", v),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Record(record) => write!(f, "{}", record),
            Value::Class(class) => write!(f, "{}", class),
            Value::Object(instance) => write!(f, "{}", instance),
            Value::Multimethod(multimethod) => write!(f, "<multimethod {}>", multimethod.name()),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::str(v)
    }
}
