//! Built-in lints for graph validation.

mod required_property;
mod unknown_property;
mod unreferenced_resource;

pub use required_property::RequiredPropertyLint;
pub use unknown_property::UnknownPropertyLint;
pub use unreferenced_resource::UnreferencedResourceLint;
