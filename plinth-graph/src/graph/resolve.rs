//! Conversion of declared values into manifest values.

use indexmap::IndexMap;
use plinth_core::{Properties, Reference, Segment, Value};
use plinth_ir::{JOIN_KEY, PENDING_PREFIX, PSEUDO_KEY, PendingAttribute, ResolvedValue};

pub(crate) fn resolve_properties(properties: &Properties) -> IndexMap<String, ResolvedValue> {
    properties
        .iter()
        .map(|(name, value)| (name.to_string(), resolve_value(value)))
        .collect()
}

pub(crate) fn resolve_value(value: &Value) -> ResolvedValue {
    match value {
        Value::String(s) => ResolvedValue::String(s.clone()),
        Value::Integer(i) => ResolvedValue::Integer(*i),
        Value::Float(f) => ResolvedValue::Float(*f),
        Value::Bool(b) => ResolvedValue::Bool(*b),
        Value::List(items) => ResolvedValue::List(items.iter().map(resolve_value).collect()),
        Value::Map(entries) => ResolvedValue::Map(
            entries
                .iter()
                .map(|(key, value)| (key.clone(), resolve_value(value)))
                .collect(),
        ),
        Value::Ref(reference) => pending(reference),
        Value::Template(template) => ResolvedValue::Join {
            join: template.segments().iter().map(resolve_segment).collect(),
        },
        Value::Pseudo(pseudo) => ResolvedValue::Pseudo { pseudo: *pseudo },
    }
}

/// What a literal inside `value` would be read as once emitted, if it
/// encodes the same as a placeholder.
pub(crate) fn placeholder_shape(value: &Value) -> Option<&'static str> {
    match value {
        Value::String(s) => pending_shape(s),
        Value::Template(template) => template.segments().iter().find_map(|segment| match segment {
            Segment::Literal(text) => pending_shape(text),
            Segment::Ref(_) | Segment::Pseudo(_) => None,
        }),
        Value::List(items) => items.iter().find_map(placeholder_shape),
        Value::Map(entries) => {
            if entries.len() == 1 {
                match entries.keys().next().map(String::as_str) {
                    Some(JOIN_KEY) => return Some("a template"),
                    Some(PSEUDO_KEY) => return Some("a pseudo parameter"),
                    _ => {}
                }
            }
            entries.values().find_map(placeholder_shape)
        }
        Value::Integer(_)
        | Value::Float(_)
        | Value::Bool(_)
        | Value::Ref(_)
        | Value::Pseudo(_) => None,
    }
}

fn pending_shape(text: &str) -> Option<&'static str> {
    text.starts_with(PENDING_PREFIX)
        .then_some("a pending attribute")
}

fn resolve_segment(segment: &Segment) -> ResolvedValue {
    match segment {
        Segment::Literal(text) => ResolvedValue::String(text.clone()),
        Segment::Ref(reference) => pending(reference),
        Segment::Pseudo(pseudo) => ResolvedValue::Pseudo { pseudo: *pseudo },
    }
}

fn pending(reference: &Reference) -> ResolvedValue {
    ResolvedValue::Pending(PendingAttribute {
        resource: reference.target.clone(),
        attribute: reference.attribute.clone(),
    })
}
