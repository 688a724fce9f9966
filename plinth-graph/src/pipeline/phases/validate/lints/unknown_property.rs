//! Lint for properties a kind does not define.

use super::super::Lint;
use crate::{Graph, pipeline::Diagnostic};

/// Lint that warns about properties outside the kind's schema.
pub struct UnknownPropertyLint;

impl Lint for UnknownPropertyLint {
    fn name(&self) -> &'static str {
        "unknown-property"
    }

    fn description(&self) -> &'static str {
        "Warn about properties the resource kind does not define"
    }

    fn check(&self, graph: &Graph, diagnostics: &mut Vec<Diagnostic>) {
        for declaration in graph {
            let schema = declaration.kind.schema();
            for name in declaration.properties.names() {
                if schema.is_known_property(name) {
                    continue;
                }
                diagnostics.push(
                    Diagnostic::warning(
                        "validate",
                        format!(
                            "{} '{}' has unknown property '{}'",
                            declaration.kind, declaration.logical_id, name
                        ),
                    )
                    .at(format!(
                        "resources.{}.properties.{}",
                        declaration.logical_id, name
                    )),
                );
            }
        }
    }
}
