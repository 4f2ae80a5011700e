//! Process control — start, enumerate, and kill frida-server on the device.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! Verification after start/kill is advisory: the process table may lag
//! behind, so a failed check becomes a warning outcome, not an error.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::application::ports::{DeviceBridge, DeviceInspector, ProgressReporter, ShellExecutor};
use crate::application::services::device::{check_connection, shell_output};
use crate::domain::device::{Stream, path_exists};
use crate::domain::error::LaunchError;
use crate::domain::naming::{filter_entries, remote_file_name, validate_remote_component};
use crate::domain::process::{
    LaunchTarget, kill_name_command, kill_pid_command, launch_command, parse_process_table,
    pick_single_entry,
};
use crate::domain::{FsmConfig, KillTarget, LaunchRequest, RemoteProcess};

/// Outcome of [`start`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StartOutcome {
    /// The process table shows the server.
    Running {
        path: String,
        processes: Vec<RemoteProcess>,
    },
    /// Launched, but the process table did not show it yet.
    Unverified { path: String },
}

/// Outcome of [`kill`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum KillOutcome {
    /// No matching process remains.
    Killed,
    /// Matching processes are still listed.
    StillRunning { processes: Vec<RemoteProcess> },
    /// The process table could not be read after the kill.
    Unverified,
}

/// Launch frida-server as root, detached from the adb session.
///
/// # Errors
///
/// Returns an error if no device is attached, the requested binary does not
/// exist, discovery finds zero or several candidates, or the launch command
/// itself fails.
pub async fn start(
    bridge: &impl DeviceBridge,
    reporter: &impl ProgressReporter,
    config: &FsmConfig,
    request: &LaunchRequest,
) -> Result<StartOutcome> {
    check_connection(bridge).await?;

    let dir = request.dir.as_deref().unwrap_or(&config.install_dir);
    validate_remote_component("dir", dir)?;

    let path = match request.target(dir, &config.server_name)? {
        LaunchTarget::Named(path) | LaunchTarget::Versioned(path) => {
            ensure_exists(bridge, &path).await?;
            path
        }
        LaunchTarget::LiteralPath(path) => path,
        LaunchTarget::Discover => {
            let listing = shell_output(bridge, &format!("ls {dir}"), Stream::Stdout)
                .await?
                .unwrap_or_default();
            let path = pick_single_entry(dir, &filter_entries(&listing, &config.server_name))?;
            validate_remote_component("path", &path)?;
            path
        }
    };

    let command = launch_command(&path, request.extra_params());
    reporter.step(&format!("Starting {path}"));
    tracing::debug!(%command, "launching frida-server");
    let output = bridge
        .shell(&command)
        .await
        .context("running launch command")?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(LaunchError::Spawn(stderr).into());
    }

    tokio::time::sleep(config.startup_delay()).await;

    match query_processes(bridge, remote_file_name(&path)).await {
        Ok(processes) if !processes.is_empty() => Ok(StartOutcome::Running { path, processes }),
        Ok(_) => Ok(StartOutcome::Unverified { path }),
        Err(e) => {
            tracing::debug!(error = %format!("{e:#}"), "process query failed after launch");
            Ok(StartOutcome::Unverified { path })
        }
    }
}

async fn ensure_exists(bridge: &impl ShellExecutor, path: &str) -> Result<()> {
    let probe = shell_output(bridge, &format!("ls {path}"), Stream::Stdout).await?;
    if path_exists(probe.as_deref()) {
        Ok(())
    } else {
        Err(LaunchError::NotFound(path.to_string()).into())
    }
}

/// Running processes whose `ps` line contains `filter`.
///
/// # Errors
///
/// Returns an error if no device is attached or adb cannot be run.
pub async fn list_processes(
    bridge: &(impl DeviceInspector + ShellExecutor),
    filter: &str,
) -> Result<Vec<RemoteProcess>> {
    check_connection(bridge).await?;
    query_processes(bridge, filter).await
}

/// Read the process table and filter it locally.
///
/// Falls back to plain `ps` on builds whose `ps` rejects `-A`.
async fn query_processes(bridge: &impl ShellExecutor, filter: &str) -> Result<Vec<RemoteProcess>> {
    let table = match shell_output(bridge, "ps -A", Stream::Stdout).await? {
        Some(table) => table,
        None => shell_output(bridge, "ps", Stream::Stdout)
            .await?
            .unwrap_or_default(),
    };
    Ok(parse_process_table(&table, filter))
}

/// Terminate frida-server processes. Best-effort: only the connection check
/// and input validation can fail.
///
/// # Errors
///
/// Returns an error if no device is attached or the name is not safe to use
/// in a shell command.
pub async fn kill(
    bridge: &(impl DeviceInspector + ShellExecutor),
    reporter: &impl ProgressReporter,
    config: &FsmConfig,
    target: &KillTarget,
) -> Result<KillOutcome> {
    check_connection(bridge).await?;

    let command = match target {
        KillTarget::Pid(pid) => kill_pid_command(*pid),
        KillTarget::Name(name) => {
            validate_remote_component("name", name)?;
            kill_name_command(name)
        }
        KillTarget::AllDefault => kill_name_command(&config.server_name),
    };

    tracing::debug!(%command, "killing frida-server");
    match bridge.shell(&command).await {
        Ok(output) if !output.status.success() => tracing::debug!(
            status = ?output.status.code(),
            "kill command exited non-zero"
        ),
        Ok(_) => {}
        Err(e) => reporter.warn(&format!("Kill command failed: {e:#}")),
    }

    let remaining: Result<Vec<RemoteProcess>> = match target {
        KillTarget::Pid(pid) => query_processes(bridge, "")
            .await
            .map(|all| all.into_iter().filter(|p| p.pid == *pid).collect()),
        KillTarget::Name(name) => query_processes(bridge, name).await,
        KillTarget::AllDefault => query_processes(bridge, &config.server_name).await,
    };

    Ok(match remaining {
        Ok(remaining) if remaining.is_empty() => KillOutcome::Killed,
        Ok(processes) => KillOutcome::StillRunning { processes },
        Err(e) => {
            tracing::debug!(error = %format!("{e:#}"), "process query failed after kill");
            KillOutcome::Unverified
        }
    })
}
