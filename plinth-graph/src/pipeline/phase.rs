//! Pipeline phase trait.

use eyre::Result;

use super::BuildContext;

/// Name and description of a pipeline phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// A phase in the build pipeline.
///
/// Phases run in order and share one [`BuildContext`]. A phase returns an
/// error to abort the build; non-fatal findings go into the context's
/// diagnostics instead.
pub trait Phase: Send + Sync {
    /// The name of this phase (used in diagnostics and plugin hooks).
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn run(&self, ctx: &mut BuildContext) -> Result<()>;

    fn info(&self) -> PhaseInfo {
        PhaseInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
