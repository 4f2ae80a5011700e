//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Device errors ─────────────────────────────────────────────────────────────

/// Errors raised by the connectivity gate that precedes every operation.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("No devices connected via adb. Plug in a device and enable USB debugging.")]
    NoDevice,

    #[error("adb is not installed or not in PATH: {0}")]
    BridgeUnavailable(String),
}

// ── Resolution errors ─────────────────────────────────────────────────────────

/// Errors raised while turning a version request into a concrete artifact.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("Could not determine the latest frida-server version: {0}")]
    LatestVersion(String),

    #[error("Could not determine device architecture (empty ro.product.cpu.abi).")]
    ArchitectureUnknown,

    #[error("Unsupported architecture: {0}")]
    UnsupportedAbi(String),
}

// ── Transfer errors ───────────────────────────────────────────────────────────

/// Errors raised while downloading, unpacking, or pushing an artifact.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("Could not download frida-server from {url}: {reason}")]
    Download { url: String, reason: String },

    #[error("Archive {0} contains no regular file.")]
    EmptyArchive(String),

    #[error("Failed to push frida-server to {remote}: {output}")]
    PushNotConfirmed { remote: String, output: String },
}

// ── Launch errors ─────────────────────────────────────────────────────────────

/// Errors raised while selecting or launching a binary on the device.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("frida-server not found at {0}. Install it first: fsm install")]
    NotFound(String),

    #[error("No frida-server found in {0}. Install it first: fsm install")]
    NoBinary(String),

    #[error(
        "Multiple frida-server binaries found in {dir}: {candidates}\n\nPick one with --name or --version."
    )]
    AmbiguousBinary { dir: String, candidates: String },

    #[error("Invalid {kind} '{value}': only letters, digits, '.', '_', '-' and '/' are allowed")]
    InvalidName { kind: &'static str, value: String },

    #[error("Failed to start frida-server: {0}")]
    Spawn(String),
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Machine-readable code for the JSON error object.
///
/// Walks the error chain so context added with `.context()` does not hide
/// the typed cause.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    for cause in err.chain() {
        if cause.is::<DeviceError>() {
            return "no_device";
        }
        if cause.is::<ResolutionError>() {
            return "resolution_failed";
        }
        if cause.is::<TransferError>() {
            return "transfer_failed";
        }
        if cause.is::<LaunchError>() {
            return "launch_failed";
        }
        if cause.is::<ConfigError>() {
            return "config_invalid";
        }
    }
    "error"
}
