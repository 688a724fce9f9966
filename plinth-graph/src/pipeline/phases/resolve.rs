//! Resolve phase - orders the graph into a manifest.

use eyre::Result;
use tracing::debug;

use crate::pipeline::{BuildContext, Phase};

/// Phase that builds the manifest from the declared graph.
///
/// Graph errors (unresolved or cyclic references) abort the build and can
/// be recovered with `downcast_ref::<plinth_graph::Error>()`.
pub struct ResolvePhase;

impl Phase for ResolvePhase {
    fn name(&self) -> &'static str {
        "resolve"
    }

    fn description(&self) -> &'static str {
        "Check references and order resources into a manifest"
    }

    fn run(&self, ctx: &mut BuildContext) -> Result<()> {
        let manifest = ctx.graph()?.build()?;
        let meta = &ctx.stack.meta;

        debug!(resources = manifest.len(), "resolved manifest");
        ctx.manifest = Some(manifest.named(&meta.name, meta.description.clone()));
        Ok(())
    }
}
