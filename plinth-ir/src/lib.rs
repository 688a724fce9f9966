//! Manifest types for the plinth graph builder.
//!
//! A [`Manifest`] is the ordered, fully resolved output of a build, ready to
//! hand to a provisioning API.
//!
//! # Architecture
//!
//! ```text
//! stack.toml → plinth-stack (parsing) → plinth-graph (ordering) → plinth-ir (manifest)
//! ```
//!
//! Every reference in the input is replaced by a [`PendingAttribute`]: the
//! provider fills it in once the target resource exists, which is why the
//! manifest order matters.

mod manifest;
mod value;

pub use manifest::{Manifest, ResolvedResource};
pub use value::{JOIN_KEY, PENDING_PREFIX, PSEUDO_KEY, PendingAttribute, ResolvedValue};
