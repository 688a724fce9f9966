//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from stack validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the stack file.
    pub config_path: PathBuf,
    pub stack_name: String,
    pub resource_count: usize,
    /// Resource count per kind.
    pub kinds: Vec<(String, usize)>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
    /// Rendered error of the phase that stopped the build, if any.
    pub failure: Option<String>,
}

impl CheckReport {
    /// Whether the check passed (no errors and every phase ran).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty() && self.failure.is_none()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.error(error);
        }

        for warning in &self.warnings {
            out.warning(warning);
        }

        for info in &self.infos {
            out.preformatted(&format!("info: {}", info));
        }

        if !self.errors.is_empty() {
            return;
        }

        if let Some(failure) = &self.failure {
            out.failure(failure);
            return;
        }

        if !self.warnings.is_empty() || !self.infos.is_empty() {
            out.newline();
        }

        out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        out.newline();
        out.preformatted(&format!(
            "  {}: {} resource{}",
            self.stack_name,
            self.resource_count,
            if self.resource_count == 1 { "" } else { "s" }
        ));
        for (kind, count) in &self.kinds {
            out.preformatted(&format!("    {} {}", count, kind));
        }
    }
}
