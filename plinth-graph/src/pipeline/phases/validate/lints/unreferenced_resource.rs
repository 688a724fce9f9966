//! Lint for resources nothing points at.

use plinth_core::ResourceKind;

use super::super::Lint;
use crate::{Graph, pipeline::Diagnostic};

/// Kinds that are normally declared to be referenced by something else.
///
/// Each exports more than `ref`.
const REFERENCED_KINDS: [ResourceKind; 3] = [
    ResourceKind::Bucket,
    ResourceKind::Role,
    ResourceKind::Database,
];

/// Lint that notes buckets, roles and databases no resource references.
pub struct UnreferencedResourceLint;

impl Lint for UnreferencedResourceLint {
    fn name(&self) -> &'static str {
        "unreferenced-resource"
    }

    fn description(&self) -> &'static str {
        "Note buckets, roles and databases that nothing references"
    }

    fn check(&self, graph: &Graph, diagnostics: &mut Vec<Diagnostic>) {
        for declaration in graph {
            if !REFERENCED_KINDS.contains(&declaration.kind) {
                continue;
            }
            if !graph.dependents(declaration.logical_id.as_str()).is_empty() {
                continue;
            }
            diagnostics.push(
                Diagnostic::info(
                    "validate",
                    format!(
                        "{} '{}' is not referenced by any resource",
                        declaration.kind, declaration.logical_id
                    ),
                )
                .at(format!("resources.{}", declaration.logical_id)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use plinth_core::Properties;

    use super::*;

    #[test]
    fn test_referenced_kinds_export_more_than_ref() {
        for kind in REFERENCED_KINDS {
            assert!(kind.schema().attributes.len() > 1, "{} only exports ref", kind);
        }
    }

    #[test]
    fn test_unreferenced_role() {
        let mut graph = Graph::new();
        graph
            .declare(ResourceKind::Role, "GlueServiceRole", Properties::new())
            .unwrap();

        let mut diagnostics = Vec::new();
        UnreferencedResourceLint.check(&graph, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].message,
            "role 'GlueServiceRole' is not referenced by any resource"
        );
        assert!(!diagnostics[0].severity.is_error());
        assert!(!diagnostics[0].severity.is_warning());
    }

    #[test]
    fn test_referenced_role() {
        let mut graph = Graph::new();
        let role = graph
            .declare(ResourceKind::Role, "GlueServiceRole", Properties::new())
            .unwrap();
        graph
            .declare(
                ResourceKind::Job,
                "GlueJob",
                Properties::new().with("role", role.attr("arn").unwrap()),
            )
            .unwrap();

        let mut diagnostics = Vec::new();
        UnreferencedResourceLint.check(&graph, &mut diagnostics);

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_leaf_kinds_are_ignored() {
        let mut graph = Graph::new();
        graph
            .declare(ResourceKind::Crawler, "GlueCrawler", Properties::new())
            .unwrap();
        graph
            .declare(ResourceKind::Pipeline, "DeliveryPipeline", Properties::new())
            .unwrap();

        let mut diagnostics = Vec::new();
        UnreferencedResourceLint.check(&graph, &mut diagnostics);

        assert!(diagnostics.is_empty());
    }
}
