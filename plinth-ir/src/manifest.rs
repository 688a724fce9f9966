//! The ordered manifest.

use indexmap::IndexMap;
use plinth_core::{LogicalId, ResourceKind};
use serde::Serialize;

use crate::{PendingAttribute, ResolvedValue};

/// Ordered, fully resolved output of a build.
///
/// Every resource appears after all of the resources it depends on.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Manifest {
    /// Stack name, when built from a stack file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Stack description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Resources in apply order.
    pub resources: Vec<ResolvedResource>,
}

/// A resource with its references replaced by pending placeholders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedResource {
    pub kind: ResourceKind,
    pub logical_id: LogicalId,
    /// Direct dependencies, in declaration order.
    pub depends_on: Vec<LogicalId>,
    pub properties: IndexMap<String, ResolvedValue>,
}

impl ResolvedResource {
    /// Every pending attribute this resource waits on.
    pub fn pending_attributes(&self) -> Vec<&PendingAttribute> {
        let mut pending = Vec::new();
        for value in self.properties.values() {
            value.for_each_pending(&mut |p| pending.push(p));
        }
        pending
    }
}

impl Manifest {
    /// Create a manifest from resources already in apply order.
    pub fn new(resources: Vec<ResolvedResource>) -> Self {
        Self {
            name: None,
            description: None,
            resources,
        }
    }

    /// Attach stack metadata.
    pub fn named(mut self, name: impl Into<String>, description: Option<String>) -> Self {
        self.name = Some(name.into());
        self.description = description;
        self
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedResource> {
        self.resources.iter()
    }

    /// Get a resource by logical id.
    pub fn get(&self, id: &str) -> Option<&ResolvedResource> {
        self.resources.iter().find(|r| r.logical_id.as_str() == id)
    }

    /// Position of a resource in apply order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.resources
            .iter()
            .position(|r| r.logical_id.as_str() == id)
    }

    /// Logical ids in apply order.
    pub fn order(&self) -> Vec<&str> {
        self.resources
            .iter()
            .map(|r| r.logical_id.as_str())
            .collect()
    }

    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
