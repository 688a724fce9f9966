//! Declare phase - lowers stack entries into graph declarations.

use eyre::Result;
use tracing::debug;

use crate::{
    Graph,
    pipeline::{BuildContext, Phase},
};

/// Phase that declares every stack entry on a fresh [`Graph`].
///
/// Entries are declared in file order, so the graph's declaration order
/// matches the stack file.
pub struct DeclarePhase;

impl Phase for DeclarePhase {
    fn name(&self) -> &'static str {
        "declare"
    }

    fn description(&self) -> &'static str {
        "Declare every stack resource on the graph"
    }

    fn run(&self, ctx: &mut BuildContext) -> Result<()> {
        let mut graph = Graph::new();
        let mut handles = Vec::with_capacity(ctx.stack.len());

        for entry in &ctx.stack.resources {
            handles.push(graph.declare(entry.kind, &entry.id, entry.properties.clone())?);
        }

        debug!(resources = graph.len(), "declared stack");
        ctx.graph = Some(graph);
        ctx.handles = handles;
        Ok(())
    }
}
