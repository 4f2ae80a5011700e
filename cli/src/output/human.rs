//! Human-readable terminal renderer.

use owo_colors::OwoColorize as _;

use crate::application::services::process::{KillOutcome, StartOutcome};
use crate::domain::{InstallReport, InstalledBinary, RemoteProcess};
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version, and the latest server release when known.
    pub fn render_version(&self, version: &str, latest: Option<&str>) {
        println!("fsm {version}");
        if let Some(latest) = latest {
            self.ctx.kv("Latest frida-server:", latest);
        }
    }

    /// Render the summary of a completed install.
    pub fn render_install(&self, report: &InstallReport) {
        if self.ctx.quiet {
            return;
        }
        println!();
        self.ctx.kv("Path:   ", &report.remote_path);
        self.ctx.kv(
            "Version:",
            report.version.as_deref().unwrap_or("(from URL)"),
        );
        self.ctx.kv("Size:   ", &format_size(report.artifact.size));
        self.ctx.kv("SHA-256:", &report.artifact.sha256);
    }

    /// Render binaries found in an install directory.
    ///
    /// Rows are always printed; only the empty-state hint honours `quiet`.
    pub fn render_installed(&self, dir: &str, binaries: &[InstalledBinary]) {
        if binaries.is_empty() {
            if !self.ctx.quiet {
                println!("No frida-server binaries in {dir}. Install one: fsm install");
            }
            return;
        }

        self.ctx.header(&format!("Installed in {dir}:"));
        for bin in binaries {
            println!(
                "  {:<40} {}",
                bin.file_name,
                bin.version_label().style(self.ctx.styles.version)
            );
        }
    }

    /// Render a process table.
    pub fn render_processes(&self, processes: &[RemoteProcess]) {
        if processes.is_empty() {
            if !self.ctx.quiet {
                println!("No frida-server processes running.");
            }
            return;
        }

        println!(
            "  {}",
            format_process_header().style(self.ctx.styles.bold)
        );
        for process in processes {
            println!("  {}", format_process_row(process));
        }
    }

    /// Render the result of `run`.
    pub fn render_start(&self, outcome: &StartOutcome) {
        match outcome {
            StartOutcome::Running { path, processes } => {
                self.ctx.success(&format!("frida-server running from {path}"));
                if !self.ctx.quiet {
                    self.render_processes(processes);
                }
            }
            StartOutcome::Unverified { path } => self.ctx.warn(&format!(
                "Launched {path}, but it is not in the process list yet. Check with: fsm ps"
            )),
        }
    }

    /// Render the result of `kill`.
    pub fn render_kill(&self, outcome: &KillOutcome) {
        match outcome {
            KillOutcome::Killed => self.ctx.success("frida-server stopped"),
            KillOutcome::StillRunning { processes } => {
                let noun = if processes.len() == 1 { "process" } else { "processes" };
                self.ctx
                    .warn(&format!("{} {noun} still running", processes.len()));
                self.render_processes(processes);
            }
            KillOutcome::Unverified => {
                self.ctx
                    .warn("Kill sent, but the process list could not be read to confirm it");
            }
        }
    }
}

/// Column header matching [`format_process_row`].
#[must_use]
pub fn format_process_header() -> String {
    format!("{:<8} {:<10} {:>9}  {}", "PID", "USER", "RSS(KB)", "COMMAND")
}

/// One aligned process table row.
#[must_use]
pub fn format_process_row(process: &RemoteProcess) -> String {
    format!(
        "{:<8} {:<10} {:>9}  {}",
        process.pid, process.user, process.memory_kb, process.command
    )
}

/// Human-readable byte count, e.g. `52.3 MB`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b >= KB * KB {
        format!("{:.1} MB", b / (KB * KB))
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{bytes} B")
    }
}
