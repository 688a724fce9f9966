//! Build context passed through pipeline phases.

use eyre::{Result, eyre};
use plinth_ir::Manifest;
use plinth_stack::Stack;

use super::diagnostic::{Diagnostic, Severity};
use crate::{Graph, ResourceHandle};

/// State shared by every phase of one build.
#[derive(Debug)]
pub struct BuildContext {
    /// The parsed stack being built.
    pub stack: Stack,
    /// The declared graph (populated by the declare phase).
    pub graph: Option<Graph>,
    /// Handles of the declared resources, in declaration order.
    pub handles: Vec<ResourceHandle>,
    /// The ordered manifest (populated by the resolve phase).
    pub manifest: Option<Manifest>,
    pub diagnostics: Vec<Diagnostic>,
}

impl BuildContext {
    pub fn new(stack: Stack) -> Self {
        Self {
            stack,
            graph: None,
            handles: Vec::new(),
            manifest: None,
            diagnostics: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn add_error(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(phase, message));
    }

    pub fn add_warning(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(phase, message));
    }

    pub fn add_info(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::info(phase, message));
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Warning)
    }

    pub fn infos(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Info)
    }

    fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.severity == severity)
    }

    /// Get the declared graph.
    ///
    /// # Errors
    ///
    /// Fails if the declare phase has not run.
    pub fn graph(&self) -> Result<&Graph> {
        self.graph
            .as_ref()
            .ok_or_else(|| eyre!("graph not declared - did the declare phase run?"))
    }

    /// Take the manifest out of the context.
    ///
    /// # Errors
    ///
    /// Fails if the resolve phase has not run.
    pub fn take_manifest(&mut self) -> Result<Manifest> {
        self.manifest
            .take()
            .ok_or_else(|| eyre!("manifest not built - did the resolve phase run?"))
    }
}
