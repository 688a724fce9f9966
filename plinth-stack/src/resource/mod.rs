mod deserialize;

use indexmap::IndexMap;
use plinth_core::ResourceKind;
use serde::Deserialize;

pub(crate) use deserialize::deserialize_resources;

/// A resource as written in the stack file, before its id and property
/// strings are validated.
#[derive(Debug, Clone)]
pub(crate) struct RawResource {
    pub id: String,
    pub kind: ResourceKind,
    pub properties: IndexMap<String, toml::Value>,
}

/// Body of a resource in map format: `[resources.<id>]`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ResourceBody {
    kind: ResourceKind,
    #[serde(default)]
    properties: IndexMap<String, toml::Value>,
}

impl ResourceBody {
    fn with_id(self, id: String) -> RawResource {
        RawResource {
            id,
            kind: self.kind,
            properties: self.properties,
        }
    }
}
