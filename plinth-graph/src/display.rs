//! Manifest display formatting.
//!
//! ```ignore
//! use plinth_graph::{DisplayStyle, ManifestDisplay};
//!
//! let display = ManifestDisplay::new(&manifest)
//!     .style(DisplayStyle::WithKinds)
//!     .indent("    ");
//!
//! println!("{}", display);
//! ```

use std::fmt;

use plinth_ir::{Manifest, ResolvedResource};

/// Display style for a manifest.
#[derive(Debug, Clone, Copy, Default)]
pub enum DisplayStyle {
    /// Logical ids in apply order.
    ///
    /// ```text
    /// GlueServiceRole
    /// GlueDatabase
    /// GlueJob
    /// ```
    #[default]
    Simple,

    /// Logical ids with their kind.
    ///
    /// ```text
    /// GlueServiceRole (role)
    /// GlueDatabase (database)
    /// GlueJob (job)
    /// ```
    WithKinds,

    /// Numbered apply order with direct dependencies.
    ///
    /// ```text
    /// 1. GlueServiceRole
    /// 2. GlueDatabase
    /// 3. GlueJob <- GlueServiceRole, GlueDatabase
    /// ```
    WithDependencies,

    /// Resources with their dependencies drawn as a tree.
    ///
    /// ```text
    /// ├─ GlueServiceRole (role)
    /// ├─ GlueDatabase (database)
    /// └─ GlueJob (job)
    ///    ├─ GlueServiceRole
    ///    └─ GlueDatabase
    /// ```
    TreeBox,
}

/// Declarative manifest display formatter.
#[derive(Debug, Clone)]
pub struct ManifestDisplay<'a> {
    manifest: &'a Manifest,
    style: DisplayStyle,
    indent_str: &'a str,
}

impl<'a> ManifestDisplay<'a> {
    pub fn new(manifest: &'a Manifest) -> Self {
        Self {
            manifest,
            style: DisplayStyle::default(),
            indent_str: "  ",
        }
    }

    pub fn style(mut self, style: DisplayStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the indentation string (default: two spaces).
    pub fn indent(mut self, indent: &'a str) -> Self {
        self.indent_str = indent;
        self
    }

    pub fn render(&self) -> String {
        let mut output = String::new();
        let total = self.manifest.len();

        for (i, resource) in self.manifest.iter().enumerate() {
            output.push_str(self.indent_str);
            match self.style {
                DisplayStyle::Simple => output.push_str(resource.logical_id.as_str()),
                DisplayStyle::WithKinds => output.push_str(&with_kind(resource)),
                DisplayStyle::WithDependencies => {
                    output.push_str(&format!("{}. {}", i + 1, resource.logical_id));
                    if !resource.depends_on.is_empty() {
                        output.push_str(" <- ");
                        output.push_str(&join_ids(resource));
                    }
                }
                DisplayStyle::TreeBox => {
                    self.render_tree_box(&mut output, resource, i + 1 == total);
                    continue;
                }
            }
            output.push('\n');
        }

        output
    }

    fn render_tree_box(&self, output: &mut String, resource: &ResolvedResource, is_last: bool) {
        let connector = if is_last { "└─" } else { "├─" };
        let child_prefix = if is_last { "   " } else { "│  " };

        output.push_str(connector);
        output.push(' ');
        output.push_str(&with_kind(resource));
        output.push('\n');

        let count = resource.depends_on.len();
        for (i, dep) in resource.depends_on.iter().enumerate() {
            let dep_connector = if i + 1 == count { "└─" } else { "├─" };
            output.push_str(self.indent_str);
            output.push_str(child_prefix);
            output.push_str(dep_connector);
            output.push(' ');
            output.push_str(dep.as_str());
            output.push('\n');
        }
    }
}

fn with_kind(resource: &ResolvedResource) -> String {
    format!("{} ({})", resource.logical_id, resource.kind)
}

fn join_ids(resource: &ResolvedResource) -> String {
    resource
        .depends_on
        .iter()
        .map(|id| id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for ManifestDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render().trim_end())
    }
}
