//! Core operations.
//!
//! This module contains the business logic for plinth commands,
//! separated from CLI argument parsing and output rendering.

pub mod build;
pub mod check;
pub mod explain;
pub mod list;

pub use build::{OutputFormat, build};
pub use check::check;
pub use explain::explain;
pub use list::{ListStyle, list};
use plinth_graph::pipeline::{BuildContext, BuildFailure, Diagnostic, Pipeline};
use plinth_ir::Manifest;
use plinth_stack::Stack;

use crate::logging::TimingPlugin;

/// The pipeline every command runs, with phase timings logged.
pub fn pipeline() -> Pipeline {
    Pipeline::new().plugin(TimingPlugin::default())
}

/// Run the pipeline and take the manifest out of the context.
fn run(stack: Stack) -> Result<(BuildContext, Manifest), BuildFailure> {
    let mut ctx = pipeline().run(stack)?;
    let manifest = ctx.take_manifest().map_err(|error| BuildFailure {
        phase: "resolve",
        error,
        diagnostics: ctx.diagnostics.clone(),
    })?;
    Ok((ctx, manifest))
}

/// Render a phase error, using miette for graph errors.
pub fn describe_failure(error: eyre::Report) -> String {
    match error.downcast::<plinth_graph::Error>() {
        Ok(e) => format!("{:?}", miette::Report::new(e)),
        Err(other) => format!("{:?}", other),
    }
}

/// A diagnostic message with its location on a second line.
fn format_diagnostic(diag: &Diagnostic) -> String {
    match &diag.location {
        Some(loc) => format!("{}\n  --> {}", diag.message, loc),
        None => diag.message.clone(),
    }
}
