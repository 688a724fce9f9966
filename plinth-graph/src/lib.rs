// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Resource graph builder for plinth stacks.
//!
//! Resources are declared on a [`Graph`] with explicit calls that return a
//! [`ResourceHandle`]; later declarations reference earlier ones through
//! their handles. [`Graph::build`] checks every reference and emits a
//! [`Manifest`](plinth_ir::Manifest) ordered so that each resource comes
//! after everything it references.
//!
//! The [`pipeline`] module drives a parsed stack file through the graph:
//! declare, validate with lints, then resolve.

mod display;
mod error;
mod graph;
pub mod pipeline;

pub use display::{DisplayStyle, ManifestDisplay};
pub use error::{Error, Result};
pub use graph::{Graph, ResourceDeclaration, ResourceHandle};
