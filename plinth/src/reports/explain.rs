//! Explain command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from pipeline explanation.
#[derive(Debug)]
pub struct ExplainReport {
    /// Path to the stack file.
    pub config_path: PathBuf,
    pub stack: StackInfo,
    /// Pipeline phases in execution order.
    pub phases: Vec<PhaseInfo>,
    /// Lints run by the validate phase.
    pub lints: Vec<LintInfo>,
    /// Resources in apply order.
    pub resources: Vec<ResourceInfo>,
}

/// Information from the `[stack]` table.
#[derive(Debug)]
pub struct StackInfo {
    pub name: String,
    pub description: Option<String>,
    pub resource_count: usize,
}

#[derive(Debug)]
pub struct PhaseInfo {
    pub name: String,
    pub description: String,
}

#[derive(Debug)]
pub struct LintInfo {
    pub name: String,
    pub description: String,
}

/// One resource of the resolved order.
#[derive(Debug)]
pub struct ResourceInfo {
    pub id: String,
    pub kind: String,
    /// Direct dependencies.
    pub depends_on: Vec<String>,
    /// Resources that reference this one.
    pub dependents: Vec<String>,
    /// Attribute placeholders left for the provisioner.
    pub pending_attributes: usize,
}

impl Report for ExplainReport {
    fn render(&self, out: &mut dyn Output) {
        out.title("Plinth Pipeline Explanation");
        out.newline();

        out.key_value("Input", &self.config_path.display().to_string());
        out.key_value_indented("Stack", &self.stack.name);
        if let Some(desc) = &self.stack.description {
            out.key_value_indented("Description", desc);
        }
        out.key_value_indented("Resources", &self.stack.resource_count.to_string());
        out.newline();

        out.section("Pipeline Phases");
        for (i, phase) in self.phases.iter().enumerate() {
            out.numbered_item(i + 1, &format!("{} - {}", phase.name, phase.description));
        }
        out.newline();

        out.section("Validation Lints");
        for lint in &self.lints {
            out.list_item(&format!("{}: {}", lint.name, lint.description));
        }
        out.newline();

        out.section("Apply Order");
        for (i, resource) in self.resources.iter().enumerate() {
            out.numbered_item(i + 1, &format!("{} ({})", resource.id, resource.kind));
            if !resource.depends_on.is_empty() {
                out.key_value_indented("  after", &resource.depends_on.join(", "));
            }
            if !resource.dependents.is_empty() {
                out.key_value_indented("  before", &resource.dependents.join(", "));
            }
            if resource.pending_attributes > 0 {
                out.key_value_indented(
                    "  pending attributes",
                    &resource.pending_attributes.to_string(),
                );
            }
        }
    }
}
