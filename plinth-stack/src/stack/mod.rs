//! Stack types and parsing for stack.toml files.

mod file;
mod parse;
mod validate;

pub use file::StackToml;
pub use parse::parse_stack;
use plinth_core::{LogicalId, Properties, ResourceKind};
use serde::Deserialize;
pub use validate::ParseContext;

use crate::resource::{RawResource, deserialize_resources};

/// Stack metadata from the `[stack]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StackMeta {
    /// Stack name, carried into the emitted manifest
    pub name: String,

    /// Free-form description
    pub description: Option<String>,
}

/// A validated resource declaration read from a stack file
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    pub id: LogicalId,
    pub kind: ResourceKind,
    /// Properties with `${...}` placeholders already parsed
    pub properties: Properties,
}

/// A parsed and validated stack file
///
/// Resources are kept in the order they were written, which is the
/// declaration order the graph builder uses to break ties.
#[derive(Debug, Clone)]
pub struct Stack {
    pub meta: StackMeta,
    pub resources: Vec<ResourceEntry>,
}

impl Stack {
    /// Check if a resource with the given logical id is declared
    pub fn has_resource(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Get a resource by logical id
    pub fn get(&self, id: &str) -> Option<&ResourceEntry> {
        self.resources.iter().find(|r| r.id.as_str() == id)
    }

    /// Number of declared resources
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Count resources per kind, in first-seen order
    pub fn kind_counts(&self) -> Vec<(ResourceKind, usize)> {
        let mut counts: Vec<(ResourceKind, usize)> = Vec::new();
        for resource in &self.resources {
            match counts.iter_mut().find(|(kind, _)| *kind == resource.kind) {
                Some((_, count)) => *count += 1,
                None => counts.push((resource.kind, 1)),
            }
        }
        counts
    }
}

/// Root of stack.toml as written, before validation
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawStack {
    stack: StackMeta,

    #[serde(default, deserialize_with = "deserialize_resources")]
    resources: Vec<RawResource>,
}
