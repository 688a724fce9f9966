//! Explain operation - pipeline explanation.

use std::path::Path;

use plinth_graph::pipeline::BuildFailure;
use plinth_stack::Stack;

use super::{pipeline, run};
use crate::reports::{ExplainReport, LintInfo, PhaseInfo, ResourceInfo, StackInfo};

/// Execute the explain operation.
///
/// Runs the pipeline and returns its phases, lints and the resolved order
/// with each resource's direct dependencies and dependents.
pub fn explain(stack: Stack, config_path: &Path) -> Result<ExplainReport, BuildFailure> {
    let info = pipeline();

    let phases = info
        .phase_info()
        .into_iter()
        .map(|p| PhaseInfo {
            name: p.name.to_string(),
            description: p.description.to_string(),
        })
        .collect();

    let lints = info
        .lint_info()
        .into_iter()
        .map(|l| LintInfo {
            name: l.name.to_string(),
            description: l.description.to_string(),
        })
        .collect();

    let stack_info = StackInfo {
        name: stack.meta.name.clone(),
        description: stack.meta.description.clone(),
        resource_count: stack.len(),
    };

    let (ctx, manifest) = run(stack)?;

    let resources = manifest
        .iter()
        .map(|resource| {
            let id = resource.logical_id.as_str();
            let dependents = ctx
                .graph
                .as_ref()
                .map(|graph| graph.dependents(id).iter().map(|d| d.to_string()).collect())
                .unwrap_or_default();

            ResourceInfo {
                id: id.to_string(),
                kind: resource.kind.to_string(),
                depends_on: resource.depends_on.iter().map(|d| d.to_string()).collect(),
                dependents,
                pending_attributes: resource.pending_attributes().len(),
            }
        })
        .collect();

    Ok(ExplainReport {
        config_path: config_path.to_path_buf(),
        stack: stack_info,
        phases,
        lints,
        resources,
    })
}
