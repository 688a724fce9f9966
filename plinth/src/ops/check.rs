//! Check operation - stack validation.

use std::path::Path;

use plinth_graph::pipeline::Severity;
use plinth_stack::Stack;

use super::{describe_failure, format_diagnostic, pipeline};
use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Runs the pipeline and collects its diagnostics. A failed phase is
/// recorded in the report rather than returned.
pub fn check(stack: Stack, config_path: &Path) -> CheckReport {
    let mut report = CheckReport {
        config_path: config_path.to_path_buf(),
        stack_name: stack.meta.name.clone(),
        resource_count: stack.len(),
        kinds: stack
            .kind_counts()
            .into_iter()
            .map(|(kind, count)| (kind.to_string(), count))
            .collect(),
        errors: Vec::new(),
        warnings: Vec::new(),
        infos: Vec::new(),
        failure: None,
    };

    let diagnostics = match pipeline().run(stack) {
        Ok(ctx) => ctx.diagnostics,
        Err(failure) => {
            report.failure = Some(describe_failure(failure.error));
            failure.diagnostics
        }
    };

    for diag in &diagnostics {
        let msg = format_diagnostic(diag);
        match diag.severity {
            Severity::Error => report.errors.push(msg),
            Severity::Warning => report.warnings.push(msg),
            Severity::Info => report.infos.push(msg),
        }
    }

    report
}
