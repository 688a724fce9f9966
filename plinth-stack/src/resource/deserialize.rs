use indexmap::IndexMap;
use plinth_core::ResourceKind;
use serde::{
    Deserialize,
    de::{self, Deserializer, MapAccess, SeqAccess, Visitor},
};

use super::{RawResource, ResourceBody};

/// Resource with id field for array format deserialization
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ResourceWithId {
    id: String,
    kind: ResourceKind,
    #[serde(default)]
    properties: IndexMap<String, toml::Value>,
}

/// Deserialize resources from either array or map format.
///
/// - Map: `[resources.<id>]` with `kind` and `properties`, in document order
/// - Array: `[[resources]]` with an `id` field
///
/// Uses a manual Visitor rather than an untagged enum so that errors inside
/// a resource (unknown kind, unknown field) keep their source location.
pub(crate) fn deserialize_resources<'de, D>(
    deserializer: D,
) -> std::result::Result<Vec<RawResource>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ResourcesVisitor;

    impl<'de> Visitor<'de> for ResourcesVisitor {
        type Value = Vec<RawResource>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a table of resources or an array of resources with id field")
        }

        fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut resources = Vec::new();
            while let Some(item) = seq.next_element::<ResourceWithId>()? {
                resources.push(RawResource {
                    id: item.id,
                    kind: item.kind,
                    properties: item.properties,
                });
            }
            Ok(resources)
        }

        fn visit_map<M>(self, map: M) -> std::result::Result<Self::Value, M::Error>
        where
            M: MapAccess<'de>,
        {
            let bodies: IndexMap<String, ResourceBody> =
                IndexMap::deserialize(de::value::MapAccessDeserializer::new(map))?;
            Ok(bodies
                .into_iter()
                .map(|(id, body)| body.with_id(id))
                .collect())
        }
    }

    deserializer.deserialize_any(ResourcesVisitor)
}
