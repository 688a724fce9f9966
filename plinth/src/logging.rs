//! Tracing setup and the phase timing plugin.

use std::{
    collections::HashMap,
    sync::Mutex,
    time::{Duration, Instant},
};

use plinth_graph::pipeline::{BuildContext, Plugin};
use tracing::{debug, info};

/// Environment variable that overrides the `-v` verbosity filter.
pub const LOG_ENV: &str = "PLINTH_LOG";

/// Install the global tracing subscriber.
///
/// `PLINTH_LOG` takes precedence; otherwise `-v` enables debug output and
/// `-vv` enables trace output. Logs go to stderr so manifests written to
/// stdout stay clean.
pub fn init_tracing(verbosity: u8) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let registry = tracing_subscriber::registry().with(env_filter);

    // Already set in tests that call this more than once
    let _ = tracing::subscriber::set_global_default(
        registry.with(fmt::layer().with_writer(std::io::stderr).with_target(false)),
    );
}

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

/// Logs how long each pipeline phase took.
#[derive(Default)]
pub struct TimingPlugin {
    started: Mutex<HashMap<String, Instant>>,
}

impl TimingPlugin {
    fn elapsed(&self, phase: &str) -> Option<Duration> {
        let mut started = self.started.lock().ok()?;
        started.remove(phase).map(|start| start.elapsed())
    }
}

impl Plugin for TimingPlugin {
    fn name(&self) -> &'static str {
        "timing"
    }

    fn on_before_phase(&self, phase: &str, _ctx: &mut BuildContext) -> eyre::Result<()> {
        debug!(phase, "phase started");
        if let Ok(mut started) = self.started.lock() {
            started.insert(phase.to_string(), Instant::now());
        }
        Ok(())
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut BuildContext) -> eyre::Result<()> {
        if let Some(elapsed) = self.elapsed(phase) {
            info!(
                phase,
                elapsed_us = elapsed.as_micros() as u64,
                diagnostics = ctx.diagnostics.len(),
                "phase finished"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(0), "warn");
        assert_eq!(default_directive(1), "debug");
        assert_eq!(default_directive(5), "trace");
    }

    #[test]
    fn test_timing_plugin_clears_finished_phases() {
        let plugin = TimingPlugin::default();
        let stack = "[stack]\nname = \"t\"\n".parse().unwrap();
        let mut ctx = BuildContext::new(stack);

        plugin.on_before_phase("declare", &mut ctx).unwrap();
        assert!(plugin.started.lock().unwrap().contains_key("declare"));

        plugin.on_after_phase("declare", &mut ctx).unwrap();
        assert!(plugin.started.lock().unwrap().is_empty());
        assert!(plugin.elapsed("declare").is_none());
    }
}
