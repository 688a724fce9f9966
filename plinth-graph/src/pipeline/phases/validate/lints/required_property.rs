//! Lint for properties a kind requires.

use super::super::Lint;
use crate::{Graph, pipeline::Diagnostic};

/// Lint that errors when a declaration misses a required property.
pub struct RequiredPropertyLint;

impl Lint for RequiredPropertyLint {
    fn name(&self) -> &'static str {
        "required-property"
    }

    fn description(&self) -> &'static str {
        "Require the properties each resource kind needs"
    }

    fn check(&self, graph: &Graph, diagnostics: &mut Vec<Diagnostic>) {
        for declaration in graph {
            let schema = declaration.kind.schema();
            for property in schema.required {
                if declaration.properties.contains(property) {
                    continue;
                }
                diagnostics.push(
                    Diagnostic::error(
                        "validate",
                        format!(
                            "{} '{}' is missing required property '{}'",
                            declaration.kind, declaration.logical_id, property
                        ),
                    )
                    .at(format!("resources.{}.properties", declaration.logical_id)),
                );
            }
        }
    }
}
