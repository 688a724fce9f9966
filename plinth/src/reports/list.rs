//! List command report data structures.

use super::output::{Output, Report};

/// Report data for `plinth list`.
#[derive(Debug)]
pub struct ListReport {
    pub stack_name: String,
    pub resource_count: usize,
    /// The apply order, already drawn in the requested style.
    pub display: String,
}

impl Report for ListReport {
    fn render(&self, out: &mut dyn Output) {
        if self.resource_count == 0 {
            out.preformatted(&format!("{} declares no resources", self.stack_name));
            return;
        }

        out.section(&format!("{} ({})", self.stack_name, self.resource_count));
        out.preformatted(&self.display);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::BufferOutput;

    #[test]
    fn test_render_empty() {
        let report = ListReport {
            stack_name: "Empty".into(),
            resource_count: 0,
            display: String::new(),
        };

        let mut out = BufferOutput::default();
        report.render(&mut out);
        assert_eq!(out.text(), "Empty declares no resources");
    }

    #[test]
    fn test_render_order() {
        let report = ListReport {
            stack_name: "s".into(),
            resource_count: 2,
            display: "  1. Role\n  2. Job <- Role".into(),
        };

        let mut out = BufferOutput::default();
        report.render(&mut out);
        assert_eq!(out.text(), "s (2):\n  1. Role\n  2. Job <- Role");
    }
}
