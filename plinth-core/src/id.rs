use std::{borrow::Borrow, fmt, str::FromStr};

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Namespace reserved for provider pseudo parameters (`${aws.account_id}`).
pub const PSEUDO_NAMESPACE: &str = "aws";

/// A logical id that has failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid logical id '{id}': {reason}")]
pub struct InvalidLogicalId {
    pub id: String,
    pub reason: &'static str,
}

/// Unique name of a resource within a graph.
///
/// Logical ids start with an ASCII letter and contain only letters, digits,
/// underscores and single dashes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LogicalId(String);

impl LogicalId {
    /// Validate and wrap a logical id.
    pub fn new(id: impl Into<String>) -> Result<Self, InvalidLogicalId> {
        let id = id.into();
        match validate(&id) {
            Some(reason) => Err(InvalidLogicalId { id, reason }),
            None => Ok(Self(id)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for LogicalId {
    type Err = InvalidLogicalId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for LogicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LogicalId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for LogicalId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Serialize for LogicalId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Returns None if `id` is a valid logical id, Some(reason) otherwise.
fn validate(id: &str) -> Option<&'static str> {
    let mut chars = id.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        Some(_) => return Some("id must start with a letter"),
        None => return Some("id cannot be empty"),
    }

    if id == PSEUDO_NAMESPACE {
        return Some("'aws' is reserved for pseudo parameters");
    }

    let mut prev_was_dash = false;
    for c in chars {
        if c == '-' {
            if prev_was_dash {
                return Some("id cannot contain consecutive dashes");
            }
            prev_was_dash = true;
        } else if c.is_ascii_alphanumeric() || c == '_' {
            prev_was_dash = false;
        } else {
            return Some("id must contain only letters, numbers, underscores, and dashes");
        }
    }

    if prev_was_dash {
        return Some("id cannot end with a dash");
    }

    None
}
