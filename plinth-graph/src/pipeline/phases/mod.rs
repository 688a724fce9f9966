//! Built-in pipeline phases.
//!
//! - [`DeclarePhase`] - lowers the stack into graph declarations
//! - [`ValidatePhase`] - runs lints and collects diagnostics
//! - [`ResolvePhase`] - orders the graph into a manifest

mod declare;
mod resolve;
mod validate;

pub use declare::DeclarePhase;
pub use resolve::ResolvePhase;
pub use validate::{
    Lint, LintInfo, RequiredPropertyLint, UnknownPropertyLint, UnreferencedResourceLint,
    ValidatePhase,
};
