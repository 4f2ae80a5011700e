//! Infrastructure implementation of the device port traits.
//!
//! `AdbBridge<R>` routes every adb invocation through a `CommandRunner` and
//! prefixes `-s <serial>` when a specific device was selected.

use std::path::Path;
use std::process::Output;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, DeviceInspector, FileTransfer, ShellExecutor};
use crate::domain::FsmConfig;
use crate::infra::command_runner::{TRANSFER_TIMEOUT, TokioCommandRunner};

/// Infrastructure adapter that talks to a device through the `adb` tool.
///
/// Generic over `R: CommandRunner` so that tests can inject a mock runner
/// without spawning real processes.
pub struct AdbBridge<R: CommandRunner> {
    runner: R,
    program: String,
    serial: Option<String>,
}

impl<R: CommandRunner> AdbBridge<R> {
    /// Create a bridge with an explicit runner.
    pub fn new(runner: R, program: impl Into<String>, serial: Option<String>) -> Self {
        Self {
            runner,
            program: program.into(),
            serial,
        }
    }

    /// Full argument list for an adb subcommand, with device selection.
    fn args<'a>(&'a self, rest: &[&'a str]) -> Vec<&'a str> {
        let mut args = Vec::with_capacity(rest.len() + 2);
        if let Some(serial) = &self.serial {
            args.push("-s");
            args.push(serial.as_str());
        }
        args.extend_from_slice(rest);
        args
    }
}

impl AdbBridge<TokioCommandRunner> {
    /// Convenience constructor for production use.
    #[must_use]
    pub fn default_runner(config: &FsmConfig) -> Self {
        Self::new(
            TokioCommandRunner::default(),
            config.adb.program.clone(),
            config.adb.serial.clone(),
        )
    }
}

impl<R: CommandRunner> DeviceInspector for AdbBridge<R> {
    async fn devices(&self) -> Result<Output> {
        // Device selection does not apply to the listing itself.
        self.runner
            .run(&self.program, &["devices"])
            .await
            .context("adb devices")
    }
}

impl<R: CommandRunner> ShellExecutor for AdbBridge<R> {
    async fn shell(&self, command: &str) -> Result<Output> {
        self.runner
            .run(&self.program, &self.args(&["shell", command]))
            .await
            .context("adb shell")
    }
}

impl<R: CommandRunner> FileTransfer for AdbBridge<R> {
    async fn push(&self, local: &Path, remote: &str) -> Result<Output> {
        let local = local
            .to_str()
            .with_context(|| format!("non UTF-8 local path: {}", local.display()))?;
        self.runner
            .run_with_timeout(
                &self.program,
                &self.args(&["push", local, remote]),
                TRANSFER_TIMEOUT,
            )
            .await
            .context("adb push")
    }
}
