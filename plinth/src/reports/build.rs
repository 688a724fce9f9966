//! Build command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Where the manifest went.
#[derive(Debug)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

/// Report data from a manifest build.
#[derive(Debug)]
pub struct BuildReport {
    pub stack_name: String,
    pub resource_count: usize,
    /// Warning messages from the validate phase.
    pub warnings: Vec<String>,
    /// The serialized manifest.
    pub content: String,
    pub destination: Destination,
}

impl Report for BuildReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }

        match &self.destination {
            // Manifest only, so stdout can be piped
            Destination::Stdout => out.preformatted(self.content.trim_end()),
            Destination::File(path) => {
                out.preformatted(&format!(
                    "✓ {}: {} resource{} written to {}",
                    self.stack_name,
                    self.resource_count,
                    if self.resource_count == 1 { "" } else { "s" },
                    path.display()
                ));
            }
        }
    }
}
