//! Pipeline plugin trait.

use eyre::Result;

use super::BuildContext;

/// A plugin that hooks into the build pipeline.
///
/// Plugins are called before and after each phase and may inspect or
/// modify the build context. Returning an error aborts the build.
///
/// # Example
///
/// ```ignore
/// struct CountingPlugin(AtomicUsize);
///
/// impl Plugin for CountingPlugin {
///     fn name(&self) -> &'static str { "counting" }
///
///     fn on_after_phase(&self, _phase: &str, _ctx: &mut BuildContext) -> Result<()> {
///         self.0.fetch_add(1, Ordering::SeqCst);
///         Ok(())
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    fn name(&self) -> &'static str;

    /// Called before a phase runs.
    #[allow(unused_variables)]
    fn on_before_phase(&self, phase: &str, ctx: &mut BuildContext) -> Result<()> {
        Ok(())
    }

    /// Called after a phase completes successfully.
    #[allow(unused_variables)]
    fn on_after_phase(&self, phase: &str, ctx: &mut BuildContext) -> Result<()> {
        Ok(())
    }
}
