//! Per-kind property and attribute schemas.
//!
//! A schema lists the properties a declaration of that kind must carry, the
//! ones it may carry, and the output attributes the provider exposes once the
//! resource exists. Only the attribute list is enforced by the graph builder;
//! property checks are reported by lints.

use crate::ResourceKind;

/// Static schema for one resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindSchema {
    pub kind: ResourceKind,
    /// Properties every declaration of this kind must set.
    pub required: &'static [&'static str],
    /// Properties a declaration of this kind may set.
    pub optional: &'static [&'static str],
    /// Output attributes other declarations may reference.
    pub attributes: &'static [&'static str],
}

impl KindSchema {
    /// Get the schema for a kind.
    pub fn of(kind: ResourceKind) -> &'static KindSchema {
        match kind {
            ResourceKind::Bucket => &BUCKET,
            ResourceKind::Role => &ROLE,
            ResourceKind::Database => &DATABASE,
            ResourceKind::Crawler => &CRAWLER,
            ResourceKind::Job => &JOB,
            ResourceKind::Table => &TABLE,
            ResourceKind::Pipeline => &PIPELINE,
            ResourceKind::Stage => &STAGE,
            ResourceKind::Action => &ACTION,
        }
    }

    /// Returns true if this kind exports the given attribute.
    pub fn exports(&self, attribute: &str) -> bool {
        self.attributes.contains(&attribute)
    }

    /// Returns true if the property is either required or optional.
    pub fn is_known_property(&self, property: &str) -> bool {
        self.required.contains(&property) || self.optional.contains(&property)
    }

    /// Comma separated attribute list, for error messages.
    pub fn attribute_list(&self) -> String {
        self.attributes.join(", ")
    }
}

static BUCKET: KindSchema = KindSchema {
    kind: ResourceKind::Bucket,
    required: &["bucket_name"],
    optional: &["import", "versioned", "encryption", "removal_policy"],
    attributes: &["ref", "arn", "name", "domain_name", "regional_domain_name"],
};

static ROLE: KindSchema = KindSchema {
    kind: ResourceKind::Role,
    required: &["assumed_by"],
    optional: &[
        "role_name",
        "description",
        "managed_policies",
        "policy_statements",
        "max_session_duration",
    ],
    attributes: &["ref", "arn", "name", "role_id"],
};

static DATABASE: KindSchema = KindSchema {
    kind: ResourceKind::Database,
    required: &["database_name"],
    optional: &["catalog_id", "description", "location_uri"],
    attributes: &["ref", "name"],
};

static CRAWLER: KindSchema = KindSchema {
    kind: ResourceKind::Crawler,
    required: &["role", "database_name", "targets"],
    optional: &[
        "name",
        "description",
        "schedule",
        "schema_change_policy",
        "table_prefix",
        "configuration",
    ],
    attributes: &["ref", "name"],
};

static JOB: KindSchema = KindSchema {
    kind: ResourceKind::Job,
    required: &["role", "command"],
    optional: &[
        "name",
        "description",
        "default_arguments",
        "glue_version",
        "max_retries",
        "timeout",
        "number_of_workers",
        "worker_type",
        "max_capacity",
    ],
    attributes: &["ref", "name"],
};

static TABLE: KindSchema = KindSchema {
    kind: ResourceKind::Table,
    required: &["database_name", "table_input"],
    optional: &["catalog_id"],
    attributes: &["ref", "name"],
};

static PIPELINE: KindSchema = KindSchema {
    kind: ResourceKind::Pipeline,
    required: &["role", "artifact_bucket"],
    optional: &["name", "restart_execution_on_update"],
    attributes: &["ref", "name", "arn", "version"],
};

static STAGE: KindSchema = KindSchema {
    kind: ResourceKind::Stage,
    required: &["pipeline", "stage_name"],
    optional: &["after"],
    attributes: &["ref", "name"],
};

static ACTION: KindSchema = KindSchema {
    kind: ResourceKind::Action,
    required: &["stage", "action_name", "category", "provider"],
    optional: &[
        "configuration",
        "input_artifacts",
        "output_artifacts",
        "run_order",
        "role",
        "region",
        "namespace",
    ],
    attributes: &["ref", "name"],
};
