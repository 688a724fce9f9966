//! Core types for the plinth resource graph builder.
//!
//! This crate provides the vocabulary shared by every other plinth crate:
//! resource kinds and their schemas, logical ids, property values, and
//! references between resources.

mod file;
mod id;
mod kind;
mod policy;
mod schema;
mod template;
mod value;

// File operations
pub use file::{File, Overwrite, WriteResult};
// Identity
pub use id::{InvalidLogicalId, LogicalId, PSEUDO_NAMESPACE};
// Kinds and schemas
pub use kind::ResourceKind;
pub use policy::{Effect, PolicyStatement};
pub use schema::KindSchema;
// Values
pub use template::{Segment, Template, TemplateError, parse_value};
pub use value::{Properties, PseudoParameter, Reference, Value};
