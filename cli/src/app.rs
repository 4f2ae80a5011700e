//! Application context — unified state passed to every command handler.
//!
//! `AppContext` owns the output context, the resolved configuration, and the
//! adb bridge. The configuration is resolved once here (file, then
//! environment, then flags) and never mutated afterwards.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::{ConfigOverrides, FsmConfig};
use crate::infra::adb::AdbBridge;
use crate::infra::command_runner::TokioCommandRunner;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer, TerminalReporter};

/// Environment variable overriding the adb program.
pub const ADB_ENV: &str = "FSM_ADB";

/// adb's own device-selection variable.
pub const SERIAL_ENV: &str = "ANDROID_SERIAL";

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Resolved configuration.
    pub config: FsmConfig,
    /// adb-backed device bridge.
    pub bridge: AdbBridge<TokioCommandRunner>,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags and the config store.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or holds invalid
    /// values.
    pub fn new(
        flags: &OutputFlags,
        store: &impl ConfigStore,
        overrides: ConfigOverrides,
    ) -> Result<Self> {
        let mode = if flags.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        let overrides = ConfigOverrides {
            adb_program: overrides.adb_program.or_else(|| env_value(ADB_ENV)),
            adb_serial: overrides.adb_serial.or_else(|| env_value(SERIAL_ENV)),
            ..overrides
        };
        let config = store.load()?.with_overrides(overrides);
        config.validate()?;
        tracing::debug!(?config, "resolved configuration");

        // Progress lines would corrupt JSON on stdout.
        let quiet = flags.quiet || flags.json;
        let bridge = AdbBridge::default_runner(&config);
        Ok(Self {
            output: OutputContext::new(flags.no_color, quiet),
            mode,
            config,
            bridge,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    /// Progress reporter for application services.
    #[must_use]
    pub fn reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
