//! Starter stacks written by `plinth init`.

use clap::ValueEnum;

const GLUE: &str = include_str!("../templates/glue.toml");
const PIPELINE: &str = include_str!("../templates/pipeline.toml");

/// A starter stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Template {
    /// Glue catalog: bucket, service role, database, crawler, job and table
    Glue,
    /// Delivery pipeline: artifact bucket, role, pipeline with three stages
    Pipeline,
}

impl Template {
    pub const ALL: [Template; 2] = [Template::Glue, Template::Pipeline];

    pub fn name(&self) -> &'static str {
        match self {
            Template::Glue => "glue",
            Template::Pipeline => "pipeline",
        }
    }

    /// One-line summary shown in the template prompt.
    pub fn summary(&self) -> &'static str {
        match self {
            Template::Glue => "glue - Glue crawler, job and table over an imported bucket",
            Template::Pipeline => "pipeline - three-stage delivery pipeline",
        }
    }

    /// The `stack.toml` content.
    pub fn content(&self) -> &'static str {
        match self {
            Template::Glue => GLUE,
            Template::Pipeline => PIPELINE,
        }
    }
}

#[cfg(test)]
mod tests {
    use plinth_graph::pipeline::Pipeline;
    use plinth_stack::Stack;

    use super::*;

    fn build(template: Template) -> plinth_ir::Manifest {
        let stack = Stack::from_str_with_filename(template.content(), "stack.toml")
            .unwrap_or_else(|e| panic!("{} template should parse: {e}", template.name()));
        let mut ctx = Pipeline::new()
            .run(stack)
            .unwrap_or_else(|f| panic!("{} template should build: {f}", template.name()));

        assert!(!ctx.has_errors());
        assert!(!ctx.has_warnings());
        ctx.take_manifest().unwrap()
    }

    #[test]
    fn test_glue_template_order() {
        let manifest = build(Template::Glue);
        assert_eq!(
            manifest.order(),
            vec![
                "MyGlueBucket",
                "GlueServiceRole",
                "GlueDatabase",
                "GlueCrawler",
                "GlueJob",
                "GlueTable"
            ]
        );
        assert_eq!(manifest.name.as_deref(), Some("GlueStack"));
    }

    #[test]
    fn test_pipeline_template_stage_order() {
        let manifest = build(Template::Pipeline);
        let source = manifest.position("SourceStage").unwrap();
        let build_stage = manifest.position("BuildStage").unwrap();
        let deploy = manifest.position("DeployStage").unwrap();
        let pipeline = manifest.position("DeliveryPipeline").unwrap();

        assert!(pipeline < source);
        assert!(source < build_stage);
        assert!(build_stage < deploy);
    }

    #[test]
    fn test_template_names_match_value_enum() {
        for template in Template::ALL {
            let parsed = Template::from_str(template.name(), false).unwrap();
            assert_eq!(parsed, template);
        }
    }
}
