//! JSON output helpers.
//!
//! Provides the error-object formatter used by all `--json` code paths when
//! a command fails, and the renderer for successful results.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::application::services::process::{KillOutcome, StartOutcome};
use crate::domain::{InstallReport, InstalledBinary, RemoteProcess};

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Pretty-print any serializable value.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn to_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("JSON serialization failed")
}

/// Renders results as JSON documents on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(&self, version: &str, latest: Option<&str>) -> Result<()> {
        let mut obj = serde_json::json!({ "version": version });
        if let Some(latest) = latest {
            obj["latest_server"] = serde_json::Value::from(latest);
        }
        println!("{}", to_pretty(&obj)?);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_install(&self, report: &InstallReport) -> Result<()> {
        println!("{}", to_pretty(report)?);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_installed(&self, dir: &str, binaries: &[InstalledBinary]) -> Result<()> {
        let obj = serde_json::json!({ "dir": dir, "binaries": binaries });
        println!("{}", to_pretty(&obj)?);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_processes(&self, processes: &[RemoteProcess]) -> Result<()> {
        let obj = serde_json::json!({ "processes": processes });
        println!("{}", to_pretty(&obj)?);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_start(&self, outcome: &StartOutcome) -> Result<()> {
        println!("{}", to_pretty(outcome)?);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_kill(&self, outcome: &KillOutcome) -> Result<()> {
        println!("{}", to_pretty(outcome)?);
        Ok(())
    }
}
