//! Runtime values and variable mappings
//!
//! Data and filters share one namespace, so a [`Value`] is a closed set of
//! kinds dispatched explicitly through the `as_*` accessors.

use crate::error::{Result, SiteError};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

type FilterFn = dyn Fn(Value) -> Result<Value> + Send + Sync;

/// A named single-argument transformation usable in a filter chain
#[derive(Clone)]
pub struct Filter {
    name: String,
    func: Arc<FilterFn>,
}

impl Filter {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        Filter {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Call the filter with a single value
    pub fn call(&self, value: Value) -> Result<Value> {
        (self.func)(value)
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Filter({})", self.name)
    }
}

/// A value stored in a [`Variables`] mapping
#[derive(Debug, Clone)]
pub enum Value {
    Text(String),
    List(Vec<Value>),
    Record(Variables),
    Filter(Filter),
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Record(_) => "record",
            Value::Filter(_) => "filter",
        }
    }

    pub fn as_text(&self) -> Result<&str> {
        match self {
            Value::Text(s) => Ok(s),
            other => Err(other.mismatch("text")),
        }
    }

    pub fn as_list(&self) -> Result<&[Value]> {
        match self {
            Value::List(items) => Ok(items),
            other => Err(other.mismatch("list")),
        }
    }

    pub fn as_record(&self) -> Result<&Variables> {
        match self {
            Value::Record(vars) => Ok(vars),
            other => Err(other.mismatch("record")),
        }
    }

    pub fn as_filter(&self) -> Result<&Filter> {
        match self {
            Value::Filter(filter) => Ok(filter),
            other => Err(other.mismatch("filter")),
        }
    }

    fn mismatch(&self, expected: &'static str) -> SiteError {
        SiteError::TypeMismatch {
            expected,
            found: self.kind(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Record(vars) => {
                f.write_str("{")?;
                for (i, (key, value)) in vars.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
            Value::Filter(filter) => write!(f, "<filter {}>", filter.name),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Variables> for Value {
    fn from(vars: Variables) -> Self {
        Value::Record(vars)
    }
}

impl From<Filter> for Value {
    fn from(filter: Filter) -> Self {
        Value::Filter(filter)
    }
}

/// The name-to-value context supplied to a template at render time
#[derive(Debug, Clone, Default)]
pub struct Variables {
    entries: BTreeMap<String, Value>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any previous value under the same key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    /// Merge every entry of `other` into this mapping; `other` wins on conflicts
    pub fn extend(&mut self, other: &Variables) {
        for (key, value) in other.iter() {
            self.entries.insert(key.clone(), value.clone());
        }
    }
}
