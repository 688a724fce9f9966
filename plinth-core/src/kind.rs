use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::KindSchema;

/// Kind of a declared resource.
///
/// The kind decides which properties a declaration may carry and which
/// output attributes other declarations may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Bucket,
    Role,
    Database,
    Crawler,
    Job,
    Table,
    Pipeline,
    Stage,
    Action,
}

impl ResourceKind {
    /// Every kind, in the order they are documented.
    pub const ALL: [ResourceKind; 9] = [
        ResourceKind::Bucket,
        ResourceKind::Role,
        ResourceKind::Database,
        ResourceKind::Crawler,
        ResourceKind::Job,
        ResourceKind::Table,
        ResourceKind::Pipeline,
        ResourceKind::Stage,
        ResourceKind::Action,
    ];

    /// Get the lowercase name used in stack files.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Bucket => "bucket",
            ResourceKind::Role => "role",
            ResourceKind::Database => "database",
            ResourceKind::Crawler => "crawler",
            ResourceKind::Job => "job",
            ResourceKind::Table => "table",
            ResourceKind::Pipeline => "pipeline",
            ResourceKind::Stage => "stage",
            ResourceKind::Action => "action",
        }
    }

    /// Get the property and attribute schema for this kind.
    pub fn schema(&self) -> &'static KindSchema {
        KindSchema::of(*self)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<_> = ResourceKind::ALL.iter().map(|k| k.as_str()).collect();
                format!("unknown resource kind '{}', expected one of: {}", s, names.join(", "))
            })
    }
}
