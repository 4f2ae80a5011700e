//! Deployment — install frida-server onto the device and list what is there.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use std::path::Path;

use anyhow::{Context, Result};
use tempfile::TempPath;

use crate::application::ports::{
    ArtifactFetcher, DeviceBridge, DeviceInspector, FileTransfer, ProgressReporter, ReleaseIndex,
    ShellExecutor,
};
use crate::application::services::device::{check_connection, shell_output};
use crate::application::services::release::resolve_release;
use crate::domain::device::{Stream, is_executable_listing, push_confirmed};
use crate::domain::error::TransferError;
use crate::domain::install::VersionSource;
use crate::domain::naming::{
    NamingPolicy, filter_entries, join_remote, normalize_version, remote_binary_path,
    validate_remote_component, version_from_filename,
};
use crate::domain::{FsmConfig, InstallReport, InstallRequest, InstalledBinary};

/// Download, push, and mark executable a frida-server build.
///
/// Sequence: connection check, release resolution, fetch, push, transfer
/// confirmation, `chmod 755`. The local artifact is removed whether or not
/// the push succeeds.
///
/// # Errors
///
/// Returns an error if no device is attached, the release cannot be
/// resolved, the download fails, or adb does not confirm the push.
pub async fn install(
    bridge: &impl DeviceBridge,
    index: &impl ReleaseIndex,
    fetcher: &impl ArtifactFetcher,
    reporter: &impl ProgressReporter,
    config: &FsmConfig,
    request: &InstallRequest,
) -> Result<InstallReport> {
    check_connection(bridge).await?;
    if let Some(name) = &request.custom_name {
        validate_remote_component("name", name)?;
    }
    // Also applies with --url, where the version only names the file.
    let request = &InstallRequest {
        version: request.version.as_deref().map(normalize_version).transpose()?,
        ..request.clone()
    };

    let spec = resolve_release(bridge, index, config, request).await?;
    let url = spec.download_url();
    let version = spec
        .version()
        .or(request.version.as_deref())
        .map(String::from);
    let remote_path = remote_binary_path(
        &config.install_dir,
        &config.server_name,
        &NamingPolicy {
            version: version.as_deref(),
            keep_name: request.keep_name,
            custom_name: request.custom_name.as_deref(),
        },
    );

    reporter.step(&format!("Downloading {url}"));
    let artifact = fetcher.fetch(&url).await?;
    reporter.success(&format!(
        "Downloaded {} bytes (sha256 {})",
        artifact.digest.size, artifact.digest.sha256
    ));

    reporter.step(&format!("Pushing to {remote_path}"));
    let pushed = push_artifact(bridge, reporter, &artifact.path, &remote_path).await;
    let digest = artifact.digest;
    discard_artifact(artifact.path);
    pushed?;

    reporter.success(&format!("Installed frida-server at {remote_path}"));
    Ok(InstallReport {
        remote_path,
        version,
        url,
        artifact: digest,
    })
}

async fn push_artifact(
    bridge: &(impl FileTransfer + ShellExecutor),
    reporter: &impl ProgressReporter,
    local: &Path,
    remote_path: &str,
) -> Result<()> {
    let output = bridge
        .push(local, remote_path)
        .await
        .context("running adb push")?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !output.status.success() || !push_confirmed(&stdout, &stderr) {
        return Err(TransferError::PushNotConfirmed {
            remote: remote_path.to_string(),
            output: format!("{} {}", stdout.trim(), stderr.trim()).trim().to_string(),
        }
        .into());
    }

    match shell_output(bridge, &format!("chmod 755 {remote_path}"), Stream::Stdout).await {
        Ok(Some(_)) => {}
        Ok(None) => reporter.warn(&format!("Could not mark {remote_path} executable")),
        Err(e) => reporter.warn(&format!("Could not mark {remote_path} executable: {e:#}")),
    }
    Ok(())
}

/// Delete a local artifact, logging rather than propagating failures.
pub fn discard_artifact(path: TempPath) {
    let shown = path.display().to_string();
    match path.close() {
        Ok(()) => tracing::debug!(path = %shown, "removed local artifact"),
        Err(e) => tracing::warn!(path = %shown, error = %e, "could not remove local artifact"),
    }
}

/// List frida-server binaries in `dir`, in directory order, with versions.
///
/// Version lookup per entry: run it with `--version`; failing that, take a
/// dotted number from the file name of an executable entry; otherwise none.
///
/// # Errors
///
/// Returns an error if no device is attached or `dir` is not a safe path.
pub async fn list_installed(
    bridge: &(impl DeviceInspector + ShellExecutor),
    dir: &str,
    server_name: &str,
) -> Result<Vec<InstalledBinary>> {
    check_connection(bridge).await?;
    validate_remote_component("dir", dir)?;

    let listing = shell_output(bridge, &format!("ls {dir}"), Stream::Stdout)
        .await?
        .unwrap_or_default();

    let mut binaries = Vec::new();
    for file_name in filter_entries(&listing, server_name) {
        let remote_path = join_remote(dir, &file_name);
        let found = if validate_remote_component("name", &file_name).is_ok() {
            probe_version(bridge, &remote_path, &file_name).await
        } else {
            None
        };
        let (version, version_source) = found.unzip();
        binaries.push(InstalledBinary {
            remote_path,
            file_name,
            version,
            version_source,
        });
    }
    Ok(binaries)
}

async fn probe_version(
    bridge: &impl ShellExecutor,
    remote_path: &str,
    file_name: &str,
) -> Option<(String, VersionSource)> {
    let reported = shell_output(bridge, &format!("{remote_path} --version"), Stream::Stdout)
        .await
        .ok()
        .flatten();
    if let Some(version) = reported.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        return Some((version.to_string(), VersionSource::Reported));
    }

    let long = shell_output(bridge, &format!("ls -la {remote_path}"), Stream::Stdout)
        .await
        .ok()
        .flatten()?;
    if !is_executable_listing(&long) {
        return None;
    }
    version_from_filename(file_name).map(|v| (v, VersionSource::FileName))
}
