//! List operation - resources in apply order.

use clap::ValueEnum;
use plinth_graph::{DisplayStyle, ManifestDisplay, pipeline::BuildFailure};
use plinth_stack::Stack;

use super::run;
use crate::reports::ListReport;

/// How `plinth list` draws the apply order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ListStyle {
    /// Logical ids only
    Simple,
    /// Logical ids with their kind
    Kinds,
    /// Numbered with direct dependencies
    #[default]
    Deps,
    /// Dependencies drawn as a tree
    Tree,
}

impl From<ListStyle> for DisplayStyle {
    fn from(style: ListStyle) -> Self {
        match style {
            ListStyle::Simple => DisplayStyle::Simple,
            ListStyle::Kinds => DisplayStyle::WithKinds,
            ListStyle::Deps => DisplayStyle::WithDependencies,
            ListStyle::Tree => DisplayStyle::TreeBox,
        }
    }
}

/// Execute the list operation.
pub fn list(stack: Stack, style: ListStyle) -> Result<ListReport, BuildFailure> {
    let stack_name = stack.meta.name.clone();
    let (_, manifest) = run(stack)?;

    let display = ManifestDisplay::new(&manifest)
        .style(style.into())
        .indent("  ")
        .to_string();

    Ok(ListReport {
        stack_name,
        resource_count: manifest.len(),
        display,
    })
}
