//! Output formatting module

pub mod human;
pub mod json;
pub mod progress;
pub mod reporter;
pub mod styles;

use anyhow::Result;
use console::Term;
use owo_colors::OwoColorize as _;

use crate::application::services::process::{KillOutcome, StartOutcome};
use crate::domain::{InstallReport, InstalledBinary, RemoteProcess};

pub use human::HumanRenderer;
pub use json::JsonRenderer;
pub use reporter::TerminalReporter;
pub use styles::Styles;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Check if progress indicators should be shown.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print a warning message prefixed with `⚠`. Suppressed when `quiet`.
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "⚠".style(self.styles.warning));
        }
    }

    /// Print a section header. Suppressed when `quiet`.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    /// Print a key-value pair with the key dimmed. Suppressed when `quiet`.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", key.style(self.styles.dim));
        }
    }
}

/// Renderer selected by the output mode.
pub enum Renderer<'a> {
    /// Terminal tables and status lines.
    Human(HumanRenderer<'a>),
    /// Pretty-printed JSON on stdout.
    Json(JsonRenderer),
}

impl Renderer<'_> {
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(&self, version: &str, latest: Option<&str>) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_version(version, latest);
                Ok(())
            }
            Self::Json(r) => r.render_version(version, latest),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_install(&self, report: &InstallReport) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_install(report);
                Ok(())
            }
            Self::Json(r) => r.render_install(report),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_installed(&self, dir: &str, binaries: &[InstalledBinary]) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_installed(dir, binaries);
                Ok(())
            }
            Self::Json(r) => r.render_installed(dir, binaries),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_processes(&self, processes: &[RemoteProcess]) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_processes(processes);
                Ok(())
            }
            Self::Json(r) => r.render_processes(processes),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_start(&self, outcome: &StartOutcome) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_start(outcome);
                Ok(())
            }
            Self::Json(r) => r.render_start(outcome),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_kill(&self, outcome: &KillOutcome) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_kill(outcome);
                Ok(())
            }
            Self::Json(r) => r.render_kill(outcome),
        }
    }
}
