//! Validate phase - runs lints on the declared graph.

mod lint;
pub mod lints;

use eyre::{Result, bail};
pub use lint::{Lint, LintInfo};
pub use lints::{RequiredPropertyLint, UnknownPropertyLint, UnreferencedResourceLint};
use tracing::debug;

use crate::pipeline::{BuildContext, Phase};

/// Phase that validates the declared graph using configurable lints.
pub struct ValidatePhase {
    lints: Vec<Box<dyn Lint>>,
}

impl ValidatePhase {
    /// Create a new validate phase with the built-in lints.
    pub fn new() -> Self {
        Self {
            lints: vec![
                Box::new(RequiredPropertyLint),
                Box::new(UnknownPropertyLint),
                Box::new(UnreferencedResourceLint),
            ],
        }
    }

    /// Create a validate phase with no lints.
    pub fn empty() -> Self {
        Self { lints: Vec::new() }
    }

    /// Add a custom lint to the validation phase.
    pub fn with_lint(mut self, lint: impl Lint + 'static) -> Self {
        self.lints.push(Box::new(lint));
        self
    }

    /// Get the names of all lints that will be run.
    pub fn lint_names(&self) -> Vec<&'static str> {
        self.lints.iter().map(|l| l.name()).collect()
    }

    /// Get information about all lints that will be run.
    pub fn lint_info(&self) -> Vec<LintInfo> {
        self.lints.iter().map(|l| l.info()).collect()
    }
}

impl Default for ValidatePhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for ValidatePhase {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn description(&self) -> &'static str {
        "Check declarations against their kind schemas"
    }

    fn run(&self, ctx: &mut BuildContext) -> Result<()> {
        let Some(graph) = ctx.graph.as_ref() else {
            bail!("graph not declared - did the declare phase run?");
        };

        // All lints run even when an earlier one reports errors
        for lint in &self.lints {
            let before = ctx.diagnostics.len();
            lint.check(graph, &mut ctx.diagnostics);
            debug!(
                lint = lint.name(),
                diagnostics = ctx.diagnostics.len() - before,
                "ran lint"
            );
        }

        if ctx.has_errors() {
            bail!("validation failed with {} error(s)", ctx.error_count());
        }

        Ok(())
    }
}
