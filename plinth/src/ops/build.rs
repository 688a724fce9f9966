//! Build operation - manifest emission.

use std::path::Path;

use clap::ValueEnum;
use eyre::Context;
use plinth_core::File;
use plinth_graph::pipeline::{BuildFailure, Diagnostic};
use plinth_ir::Manifest;
use plinth_stack::Stack;

use super::{format_diagnostic, run};
use crate::reports::{BuildReport, Destination};

/// Serialization format of the emitted manifest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Toml,
}

impl OutputFormat {
    /// Serialize a manifest in this format.
    pub fn render(&self, manifest: &Manifest) -> eyre::Result<String> {
        match self {
            OutputFormat::Json => manifest
                .to_json()
                .map(|json| json + "\n")
                .wrap_err("failed to serialize manifest as JSON"),
            OutputFormat::Toml => manifest
                .to_toml()
                .wrap_err("failed to serialize manifest as TOML"),
        }
    }
}

/// Execute the build operation.
///
/// Runs the pipeline, serializes the manifest and writes it to `output`
/// when one is given. Serialization and write errors are reported as a
/// failed `emit` phase.
pub fn build(
    stack: Stack,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<BuildReport, BuildFailure> {
    let stack_name = stack.meta.name.clone();
    let (ctx, manifest) = run(stack)?;

    let emit = |error: eyre::Report, diagnostics: &[Diagnostic]| BuildFailure {
        phase: "emit",
        error,
        diagnostics: diagnostics.to_vec(),
    };

    let content = format
        .render(&manifest)
        .map_err(|e| emit(e, &ctx.diagnostics))?;

    let destination = match output {
        Some(path) => {
            File::new(path, content.as_str())
                .write()
                .map_err(|e| emit(e, &ctx.diagnostics))?;
            Destination::File(path.to_path_buf())
        }
        None => Destination::Stdout,
    };

    Ok(BuildReport {
        stack_name,
        resource_count: manifest.len(),
        warnings: ctx.warnings().map(format_diagnostic).collect(),
        content,
        destination,
    })
}
