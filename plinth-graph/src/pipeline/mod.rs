//! Build pipeline from a parsed stack to a manifest.
//!
//! The [`Pipeline`] runs three built-in phases:
//!
//! - `declare` lowers every stack entry into [`Graph::declare`](crate::Graph::declare) calls
//! - `validate` runs kind-schema lints and collects [`Diagnostic`]s
//! - `resolve` calls [`Graph::build`](crate::Graph::build) and stores the manifest
//!
//! Plugins are called before and after each phase.
//!
//! # Example
//!
//! ```ignore
//! use plinth_graph::pipeline::Pipeline;
//!
//! let ctx = Pipeline::new().run(stack)?;
//!
//! for diag in ctx.warnings() {
//!     eprintln!("{}", diag);
//! }
//! let manifest = ctx.manifest.unwrap();
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;

pub use context::BuildContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::{Phase, PhaseInfo};
pub use plugin::Plugin;
pub use runner::{BuildFailure, Pipeline};
