use miette::Diagnostic;
use plinth_core::{InvalidLogicalId, LogicalId, ResourceKind};
use thiserror::Error;

/// Result type for graph operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while declaring resources or building the manifest.
///
/// Every error is fatal to [`Graph::build`](crate::Graph::build): no
/// partial manifest is produced.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("logical id '{id}' is already declared")]
    #[diagnostic(
        code(plinth::duplicate_id),
        help("'{id}' was first declared as a {existing}, logical ids must be unique across all kinds")
    )]
    DuplicateId {
        id: LogicalId,
        kind: ResourceKind,
        existing: ResourceKind,
    },

    #[error("{kind} '{id}' has no attribute '{attribute}'")]
    #[diagnostic(code(plinth::unknown_attribute), help("a {kind} exports: {available}"))]
    UnknownAttribute {
        id: LogicalId,
        kind: ResourceKind,
        attribute: String,
        available: String,
    },

    #[error("'{from}.{property}' references undeclared resource '{target}'")]
    #[diagnostic(
        code(plinth::unresolved_reference),
        help("declare '{target}' or remove the reference to '{target}.{attribute}'")
    )]
    UnresolvedReference {
        from: LogicalId,
        property: String,
        target: LogicalId,
        attribute: String,
    },

    #[error("cyclic reference: {}", format_path(.path))]
    #[diagnostic(
        code(plinth::cyclic_reference),
        help("resources in a cycle can never be created, break one of the references")
    )]
    CyclicReference { path: Vec<LogicalId> },

    #[error("{0}")]
    #[diagnostic(code(plinth::invalid_id))]
    InvalidId(#[from] InvalidLogicalId),

    #[error("property '{property}' of '{id}' is not a list")]
    #[diagnostic(code(plinth::not_a_list))]
    NotAList { id: LogicalId, property: String },

    #[error("'{id}' is not declared in this graph")]
    #[diagnostic(
        code(plinth::foreign_handle),
        help("handles are only valid for the graph that returned them")
    )]
    ForeignHandle { id: LogicalId },

    #[error("'{id}.{property}' holds a literal that would be emitted as {shape}")]
    #[diagnostic(
        code(plinth::reserved_literal),
        help(
            "maps whose only key is 'join' or 'pseudo' and strings starting with 'pending-attribute-of(' are reserved for placeholders"
        )
    )]
    ReservedLiteral {
        id: LogicalId,
        property: String,
        shape: &'static str,
    },

    #[error("'{id}' is a {found}, expected a {expected}")]
    #[diagnostic(code(plinth::kind_mismatch))]
    KindMismatch {
        id: LogicalId,
        expected: ResourceKind,
        found: ResourceKind,
    },
}

fn format_path(path: &[LogicalId]) -> String {
    path.iter()
        .map(LogicalId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> LogicalId {
        LogicalId::new(s).unwrap()
    }

    #[test]
    fn test_cycle_display() {
        let err = Error::CyclicReference {
            path: vec![id("A"), id("B"), id("A")],
        };
        assert_eq!(err.to_string(), "cyclic reference: A -> B -> A");
    }

    #[test]
    fn test_unknown_attribute_display() {
        let err = Error::UnknownAttribute {
            id: id("GlueDatabase"),
            kind: ResourceKind::Database,
            attribute: "arn".into(),
            available: ResourceKind::Database.schema().attribute_list(),
        };
        assert_eq!(err.to_string(), "database 'GlueDatabase' has no attribute 'arn'");
    }

    #[test]
    fn test_diagnostic_code() {
        let err = Error::UnresolvedReference {
            from: id("GlueJob"),
            property: "role".into(),
            target: id("GlueServiceRole"),
            attribute: "arn".into(),
        };
        assert_eq!(
            err.code().map(|c| c.to_string()).as_deref(),
            Some("plinth::unresolved_reference")
        );
        assert_eq!(
            err.to_string(),
            "'GlueJob.role' references undeclared resource 'GlueServiceRole'"
        );
    }
}
