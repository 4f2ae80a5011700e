//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use anyhow::Result;
use tempfile::TempPath;

use crate::domain::{ArtifactDigest, FsmConfig};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}

// ── Device Port Traits ────────────────────────────────────────────────────────

/// Device discovery through the bridging tool.
#[allow(async_fn_in_trait)]
pub trait DeviceInspector {
    /// List attached devices (`adb devices`).
    async fn devices(&self) -> Result<Output>;
}

/// Command execution on the device.
#[allow(async_fn_in_trait)]
pub trait ShellExecutor {
    /// Run `command` in the device shell and capture output.
    ///
    /// The exit status mirrors the remote command's status.
    async fn shell(&self, command: &str) -> Result<Output>;
}

/// Host-to-device file transfer.
#[allow(async_fn_in_trait)]
pub trait FileTransfer {
    /// Push a single local file to `remote`.
    async fn push(&self, local: &Path, remote: &str) -> Result<Output>;
}

/// Composite trait — any type implementing all three sub-traits is a `DeviceBridge`.
pub trait DeviceBridge: DeviceInspector + ShellExecutor + FileTransfer {}

/// Blanket implementation: any type implementing all three sub-traits is a `DeviceBridge`.
impl<T> DeviceBridge for T where T: DeviceInspector + ShellExecutor + FileTransfer {}

// ── Release Ports ─────────────────────────────────────────────────────────────

/// Upstream release index.
#[allow(async_fn_in_trait)]
pub trait ReleaseIndex {
    /// Latest published version of `repo`, without a leading `v`.
    async fn latest_version(&self, repo: &str) -> Result<String>;
}

/// A decompressed, executable artifact on local disk.
///
/// Dropping `path` deletes the file; callers that want to observe removal
/// errors close it explicitly.
#[derive(Debug)]
pub struct FetchedArtifact {
    /// Caller-owned temp file holding the binary.
    pub path: TempPath,
    /// Digest and size of the binary.
    pub digest: ArtifactDigest,
}

/// Downloads and unpacks release artifacts.
#[allow(async_fn_in_trait)]
pub trait ArtifactFetcher {
    /// Download `url`, decompress it according to its file name, and mark
    /// the result executable.
    ///
    /// Intermediate files are removed before returning, on success and on
    /// failure.
    async fn fetch(&self, url: &str) -> Result<FetchedArtifact>;
}

// ── Configuration Port ────────────────────────────────────────────────────────

/// Abstracts configuration persistence.
pub trait ConfigStore {
    /// Load the configuration, returning defaults when no file exists.
    fn load(&self) -> Result<FsmConfig>;
    /// Path of the configuration file.
    fn path(&self) -> Result<PathBuf>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}
