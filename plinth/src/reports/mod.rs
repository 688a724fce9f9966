//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod build;
mod check;
mod explain;
mod list;
mod output;

pub use build::{BuildReport, Destination};
pub use check::CheckReport;
pub use explain::{ExplainReport, LintInfo, PhaseInfo, ResourceInfo, StackInfo};
pub use list::ListReport;
pub use output::{Report, TerminalOutput};
