// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Parsing and validation of `stack.toml` files.
//!
//! A stack file names the stack and declares its resources:
//!
//! ```toml
//! [stack]
//! name = "GlueStack"
//!
//! [resources.GlueDatabase]
//! kind = "database"
//! [resources.GlueDatabase.properties]
//! database_name = "cbsgule"
//!
//! [resources.GlueCrawler]
//! kind = "crawler"
//! [resources.GlueCrawler.properties]
//! database_name = "${GlueDatabase.ref}"
//! ```
//!
//! Strings are parsed for `${resource.attribute}` placeholders while the
//! file is read, so every error in a stack file points at its source.

mod error;
mod resource;
mod stack;

pub use error::{Error, Result, SourceContext};
pub use stack::{ParseContext, ResourceEntry, Stack, StackMeta, StackToml, parse_stack};
