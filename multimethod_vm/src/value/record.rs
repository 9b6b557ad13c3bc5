//! Record values
//!
//! A record is an ordered map from field name to value. Positional tuples are
//! records whose keys are `"0"`, `"1"`, ... in order.

use std::fmt;

use indexmap::IndexMap;

use super::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordValue {
    fields: IndexMap<String, Value>,
}

impl RecordValue {
    pub fn new(fields: IndexMap<String, Value>) -> Self {
        Self { fields }
    }

    pub fn positional(values: Vec<Value>) -> Self {
        Self {
            fields: values
                .into_iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True when the keys are exactly `"0".."n-1"` in order.
    pub fn is_positional(&self) -> bool {
        is_positional_keys(self.fields.keys().map(String::as_str))
    }
}

pub(crate) fn is_positional_keys<'a>(keys: impl Iterator<Item = &'a str>) -> bool {
    keys.enumerate().all(|(i, key)| key == i.to_string())
}

impl fmt::Display for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let positional = self.is_positional();
        write!(f, "(")?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if positional {
                write!(f, "{}", value)?;
            } else {
                write!(f, "{}: {}", name, value)?;
            }
        }
        write!(f, ")")
    }
}
