//! Pipeline orchestrator.

use plinth_stack::Stack;
use thiserror::Error;
use tracing::debug;

use super::{
    BuildContext, Diagnostic, Phase, PhaseInfo, Plugin,
    phases::{DeclarePhase, Lint, LintInfo, ResolvePhase, ValidatePhase},
};

/// A build that stopped in one of its phases.
///
/// Carries the diagnostics collected up to the failure so callers can
/// report lint findings alongside the fatal error.
#[derive(Debug, Error)]
#[error("{phase} phase failed: {error}")]
pub struct BuildFailure {
    pub phase: &'static str,
    pub error: eyre::Report,
    pub diagnostics: Vec<Diagnostic>,
}

/// The build pipeline orchestrator.
///
/// Runs the built-in phases (declare, validate, resolve) followed by any
/// user phases, calling plugin hooks before and after each one.
///
/// ```ignore
/// let pipeline = Pipeline::new()
///     .plugin(TimingPlugin::default())
///     .lint(MyLint);
///
/// let ctx = pipeline.run(stack)?;
/// ```
pub struct Pipeline {
    validate: ValidatePhase,
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    /// Create a pipeline with the built-in phases and lints.
    pub fn new() -> Self {
        Self {
            validate: ValidatePhase::new(),
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Add a lint to the validate phase.
    pub fn lint(mut self, lint: impl Lint + 'static) -> Self {
        self.validate = self.validate.with_lint(lint);
        self
    }

    /// Phases in execution order.
    pub fn phase_info(&self) -> Vec<PhaseInfo> {
        self.phases().iter().map(|p| p.info()).collect()
    }

    /// Lints run by the validate phase.
    pub fn lint_info(&self) -> Vec<LintInfo> {
        self.validate.lint_info()
    }

    /// Run the pipeline on a stack.
    ///
    /// # Errors
    ///
    /// Returns a [`BuildFailure`] naming the phase that failed, with the
    /// diagnostics collected so far.
    pub fn run(&self, stack: Stack) -> Result<BuildContext, BuildFailure> {
        let mut ctx = BuildContext::new(stack);

        for phase in self.phases() {
            if let Err(error) = self.run_phase(phase, &mut ctx) {
                debug!(phase = phase.name(), %error, "phase failed");
                return Err(BuildFailure {
                    phase: phase.name(),
                    error,
                    diagnostics: ctx.diagnostics,
                });
            }
        }

        Ok(ctx)
    }

    /// Built-in phases followed by user phases.
    fn phases(&self) -> Vec<&dyn Phase> {
        let mut phases: Vec<&dyn Phase> = vec![&DeclarePhase, &self.validate, &ResolvePhase];
        for phase in &self.phases {
            phases.push(phase.as_ref());
        }
        phases
    }

    /// Run a single phase with plugin hooks.
    fn run_phase(&self, phase: &dyn Phase, ctx: &mut BuildContext) -> eyre::Result<()> {
        let phase_name = phase.name();

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        phase.run(ctx)?;

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;
    use crate::Error;

    struct CountingPlugin {
        before_count: Arc<AtomicUsize>,
        after_count: Arc<AtomicUsize>,
    }

    impl CountingPlugin {
        fn new() -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>) {
            let before = Arc::new(AtomicUsize::new(0));
            let after = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    before_count: before.clone(),
                    after_count: after.clone(),
                },
                before,
                after,
            )
        }
    }

    impl Plugin for CountingPlugin {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn on_before_phase(&self, _phase: &str, _ctx: &mut BuildContext) -> eyre::Result<()> {
            self.before_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn on_after_phase(&self, _phase: &str, _ctx: &mut BuildContext) -> eyre::Result<()> {
            self.after_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct RecordingPhase(Arc<Mutex<Vec<String>>>);

    impl Phase for RecordingPhase {
        fn name(&self) -> &'static str {
            "record"
        }

        fn description(&self) -> &'static str {
            "Record the manifest order"
        }

        fn run(&self, ctx: &mut BuildContext) -> eyre::Result<()> {
            if let Some(manifest) = &ctx.manifest {
                let mut seen = self.0.lock().unwrap();
                seen.extend(manifest.order().into_iter().map(String::from));
            }
            Ok(())
        }
    }

    fn parse_stack(content: &str) -> Stack {
        content.parse().expect("Failed to parse test stack")
    }

    fn make_test_stack() -> Stack {
        parse_stack(
            r#"
            [stack]
            name = "GlueStack"
            description = "catalog"

            [resources.GlueJob]
            kind = "job"
            [resources.GlueJob.properties]
            role = "${GlueServiceRole.arn}"
            command = { name = "glueetl", python_version = "3" }

            [resources.GlueServiceRole]
            kind = "role"
            [resources.GlueServiceRole.properties]
            assumed_by = "glue.amazonaws.com"
        "#,
        )
    }

    #[test]
    fn test_pipeline_builds_manifest() {
        let ctx = Pipeline::new()
            .run(make_test_stack())
            .expect("pipeline should succeed");

        assert!(ctx.graph.is_some());
        assert_eq!(ctx.handles.len(), 2);

        let manifest = ctx.manifest.expect("manifest should be built");
        assert_eq!(manifest.name.as_deref(), Some("GlueStack"));
        assert_eq!(manifest.description.as_deref(), Some("catalog"));
        assert_eq!(manifest.order(), vec!["GlueServiceRole", "GlueJob"]);
    }

    #[test]
    fn test_pipeline_plugin_hooks() {
        let (plugin, before_count, after_count) = CountingPlugin::new();

        let pipeline = Pipeline::new().plugin(plugin);
        let _ = pipeline
            .run(make_test_stack())
            .expect("pipeline should succeed");

        // 3 built-in phases = 3 before + 3 after hooks
        assert_eq!(before_count.load(Ordering::SeqCst), 3);
        assert_eq!(after_count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_user_phase_runs_after_resolve() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::new().phase(RecordingPhase(seen.clone()));

        pipeline
            .run(make_test_stack())
            .expect("pipeline should succeed");

        assert_eq!(*seen.lock().unwrap(), vec!["GlueServiceRole", "GlueJob"]);
    }

    #[test]
    fn test_phase_info() {
        let pipeline = Pipeline::new().phase(RecordingPhase(Arc::default()));
        let names: Vec<_> = pipeline.phase_info().iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["declare", "validate", "resolve", "record"]);
    }

    #[test]
    fn test_lint_info() {
        let names: Vec<_> = Pipeline::new()
            .lint_info()
            .iter()
            .map(|l| l.name)
            .collect();
        assert_eq!(
            names,
            vec!["required-property", "unknown-property", "unreferenced-resource"]
        );
    }

    #[test]
    fn test_validate_failure_keeps_diagnostics() {
        let stack = parse_stack(
            r#"
            [stack]
            name = "s"

            [resources.GlueDatabase]
            kind = "database"
        "#,
        );

        let failure = Pipeline::new().run(stack).unwrap_err();

        assert_eq!(failure.phase, "validate");
        let errors: Vec<_> = failure
            .diagnostics
            .iter()
            .filter(|d| d.severity.is_error())
            .collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("database_name"));
    }

    #[test]
    fn test_resolve_failure_carries_graph_error() {
        let stack = parse_stack(
            r#"
            [stack]
            name = "s"

            [resources.A]
            kind = "stage"
            [resources.A.properties]
            pipeline = "p"
            stage_name = "A"
            after = "${B.ref}"

            [resources.B]
            kind = "stage"
            [resources.B.properties]
            pipeline = "p"
            stage_name = "B"
            after = "${A.ref}"
        "#,
        );

        let failure = Pipeline::new().run(stack).unwrap_err();

        assert_eq!(failure.phase, "resolve");
        match failure.error.downcast_ref::<Error>() {
            Some(Error::CyclicReference { path }) => assert_eq!(path.len(), 3),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
