//! Property values and references between resources.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{LogicalId, Template};

/// Pointer from a property to an output attribute of another resource.
///
/// The attribute value is only known after the provider creates the target,
/// so a reference is carried through the manifest as a pending placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    pub target: LogicalId,
    pub attribute: String,
}

impl Reference {
    pub fn new(target: LogicalId, attribute: impl Into<String>) -> Self {
        Self {
            target,
            attribute: attribute.into(),
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.target, self.attribute)
    }
}

/// Value supplied by the provider for the stack as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PseudoParameter {
    AccountId,
    Region,
    Partition,
    StackName,
}

impl PseudoParameter {
    pub const ALL: [PseudoParameter; 4] = [
        PseudoParameter::AccountId,
        PseudoParameter::Region,
        PseudoParameter::Partition,
        PseudoParameter::StackName,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PseudoParameter::AccountId => "account_id",
            PseudoParameter::Region => "region",
            PseudoParameter::Partition => "partition",
            PseudoParameter::StackName => "stack_name",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }
}

impl fmt::Display for PseudoParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A property value: a literal, a reference, or a mix of both.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    List(Vec<Value>),
    Map(IndexMap<String, Value>),
    Ref(Reference),
    Template(Template),
    Pseudo(PseudoParameter),
}

impl Value {
    /// Walk this value and call `f` for every reference it contains,
    /// in document order.
    pub fn for_each_reference<'a>(&'a self, f: &mut impl FnMut(&'a Reference)) {
        match self {
            Value::Ref(reference) => f(reference),
            Value::Template(template) => template.references().for_each(f),
            Value::List(items) => {
                for item in items {
                    item.for_each_reference(f);
                }
            }
            Value::Map(entries) => {
                for value in entries.values() {
                    value.for_each_reference(f);
                }
            }
            Value::String(_)
            | Value::Integer(_)
            | Value::Float(_)
            | Value::Bool(_)
            | Value::Pseudo(_) => {}
        }
    }

    /// Collect every reference in this value.
    pub fn references(&self) -> Vec<&Reference> {
        let mut refs = Vec::new();
        self.for_each_reference(&mut |r| refs.push(r));
        refs
    }

    /// Get the string if this is a plain string literal.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Reference> for Value {
    fn from(value: Reference) -> Self {
        Value::Ref(value)
    }
}

impl From<Template> for Value {
    fn from(value: Template) -> Self {
        Value::Template(value)
    }
}

impl From<PseudoParameter> for Value {
    fn from(value: PseudoParameter) -> Self {
        Value::Pseudo(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(entries: IndexMap<String, Value>) -> Self {
        Value::Map(entries)
    }
}

/// Ordered property map of a declaration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties(IndexMap<String, Value>);

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.0.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Every reference held by any property, paired with the property name.
    pub fn references(&self) -> Vec<(&str, &Reference)> {
        let mut refs = Vec::new();
        for (name, value) in &self.0 {
            value.for_each_reference(&mut |r| refs.push((name.as_str(), r)));
        }
        refs
    }
}

impl FromIterator<(String, Value)> for Properties {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Properties {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
