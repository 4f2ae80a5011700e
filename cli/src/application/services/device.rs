//! Device link — connectivity gate and remote shell capture.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::Result;

use crate::application::ports::{DeviceInspector, ShellExecutor};
use crate::domain::device::{Stream, parse_devices};
use crate::domain::error::DeviceError;

/// Devices visible to adb at the time of the check.
///
/// Never cached: every operation calls [`check_connection`] again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub serials: Vec<String>,
}

/// Fail fast unless at least one device is attached.
///
/// # Errors
///
/// Returns [`DeviceError::BridgeUnavailable`] when adb cannot be run or
/// exits non-zero, and [`DeviceError::NoDevice`] when no device is in the
/// `device` state.
pub async fn check_connection(bridge: &impl DeviceInspector) -> Result<Connection> {
    let output = bridge
        .devices()
        .await
        .map_err(|e| DeviceError::BridgeUnavailable(format!("{e:#}")))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(DeviceError::BridgeUnavailable(stderr).into());
    }

    let serials = parse_devices(&String::from_utf8_lossy(&output.stdout));
    if serials.is_empty() {
        return Err(DeviceError::NoDevice.into());
    }
    tracing::debug!(devices = ?serials, "adb connection verified");
    Ok(Connection { serials })
}

/// Run a remote command and return the chosen stream, or `None` when the
/// remote command exits non-zero.
///
/// # Errors
///
/// Returns an error only if adb itself could not be run.
pub async fn shell_output(
    bridge: &impl ShellExecutor,
    command: &str,
    stream: Stream,
) -> Result<Option<String>> {
    let output = bridge.shell(command).await?;
    if !output.status.success() {
        tracing::debug!(
            command,
            status = ?output.status.code(),
            stderr = %String::from_utf8_lossy(&output.stderr).trim(),
            "remote command failed"
        );
        return Ok(None);
    }
    let bytes = match stream {
        Stream::Stdout => &output.stdout,
        Stream::Stderr => &output.stderr,
    };
    Ok(Some(String::from_utf8_lossy(bytes).into_owned()))
}
