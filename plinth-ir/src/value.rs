//! Resolved property values.

use std::fmt;

use indexmap::IndexMap;
use plinth_core::{LogicalId, PseudoParameter};
use serde::{Serialize, Serializer};

/// Key of the single-entry map a template is emitted as.
pub const JOIN_KEY: &str = "join";

/// Key of the single-entry map a pseudo parameter is emitted as.
pub const PSEUDO_KEY: &str = "pseudo";

/// Prefix of every emitted pending attribute.
pub const PENDING_PREFIX: &str = "pending-attribute-of(";

/// Placeholder for an attribute the provider only knows after creating the
/// target resource.
///
/// Serialized as `pending-attribute-of(<logical id>, <attribute>)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PendingAttribute {
    pub resource: LogicalId,
    pub attribute: String,
}

impl fmt::Display for PendingAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pending-attribute-of({}, {})",
            self.resource, self.attribute
        )
    }
}

impl Serialize for PendingAttribute {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A property value after reference resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResolvedValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    List(Vec<ResolvedValue>),
    Map(IndexMap<String, ResolvedValue>),
    Pending(PendingAttribute),
    /// Concatenation of the parts once every pending part is known.
    Join {
        join: Vec<ResolvedValue>,
    },
    /// Stack-wide value supplied by the provider.
    Pseudo {
        pseudo: PseudoParameter,
    },
}

impl ResolvedValue {
    /// Visit every pending attribute, in document order.
    pub fn for_each_pending<'a>(&'a self, f: &mut impl FnMut(&'a PendingAttribute)) {
        match self {
            ResolvedValue::Pending(pending) => f(pending),
            ResolvedValue::List(items) | ResolvedValue::Join { join: items } => {
                for item in items {
                    item.for_each_pending(f);
                }
            }
            ResolvedValue::Map(entries) => {
                for value in entries.values() {
                    value.for_each_pending(f);
                }
            }
            ResolvedValue::String(_)
            | ResolvedValue::Integer(_)
            | ResolvedValue::Float(_)
            | ResolvedValue::Bool(_)
            | ResolvedValue::Pseudo { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn pending(resource: &str, attribute: &str) -> ResolvedValue {
        ResolvedValue::Pending(PendingAttribute {
            resource: LogicalId::new(resource).unwrap(),
            attribute: attribute.to_string(),
        })
    }

    #[test]
    fn test_pending_serializes_as_placeholder() {
        assert_eq!(
            serde_json::to_string(&pending("GlueServiceRole", "arn")).unwrap(),
            "\"pending-attribute-of(GlueServiceRole, arn)\""
        );
    }

    #[test]
    fn test_join_and_pseudo_shape() {
        let value = ResolvedValue::List(vec![
            ResolvedValue::Join {
                join: vec![
                    ResolvedValue::String("s3://".into()),
                    pending("Bucket", "name"),
                    ResolvedValue::String("/data/".into()),
                ],
            },
            ResolvedValue::Pseudo {
                pseudo: PseudoParameter::AccountId,
            },
            ResolvedValue::Integer(2880),
        ]);

        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!([
                { "join": ["s3://", "pending-attribute-of(Bucket, name)", "/data/"] },
                { "pseudo": "account_id" },
                2880
            ])
        );
    }

    #[test]
    fn test_reserved_shapes_match_encoding() {
        let join = serde_json::to_value(ResolvedValue::Join { join: vec![] }).unwrap();
        assert!(join.get(JOIN_KEY).is_some());

        let pseudo = serde_json::to_value(ResolvedValue::Pseudo {
            pseudo: PseudoParameter::Region,
        })
        .unwrap();
        assert!(pseudo.get(PSEUDO_KEY).is_some());

        let pending = serde_json::to_value(pending("A", "arn")).unwrap();
        assert!(pending.as_str().unwrap().starts_with(PENDING_PREFIX));
    }

    #[test]
    fn test_for_each_pending() {
        let value = ResolvedValue::Join {
            join: vec![pending("A", "arn"), ResolvedValue::Bool(true), pending("B", "ref")],
        };
        let mut seen = Vec::new();
        value.for_each_pending(&mut |p| seen.push(p.resource.as_str()));
        assert_eq!(seen, vec!["A", "B"]);
    }
}
