//! Release resolution — version, device architecture, and download source.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::Result;

use crate::application::ports::{ReleaseIndex, ShellExecutor};
use crate::application::services::device::shell_output;
use crate::domain::arch::{ABI_PROPERTY, Architecture};
use crate::domain::device::Stream;
use crate::domain::error::ResolutionError;
use crate::domain::naming::normalize_version;
use crate::domain::{FsmConfig, InstallRequest, ReleaseSource, ReleaseSpec};

/// Return `requested` or, when absent, the latest upstream version.
///
/// # Errors
///
/// Returns [`ResolutionError::LatestVersion`] if the index cannot be reached
/// or returns something unusable, and an invalid-name error if the version
/// cannot be used in a remote file name.
pub async fn resolve_version(
    index: &impl ReleaseIndex,
    repo: &str,
    requested: Option<&str>,
) -> Result<String> {
    let version = match requested {
        Some(v) => v.to_string(),
        None => index
            .latest_version(repo)
            .await
            .map_err(|e| ResolutionError::LatestVersion(format!("{e:#}")))?,
    };
    Ok(normalize_version(&version)?)
}

/// Read the device's primary ABI and map it to a release architecture.
///
/// # Errors
///
/// Returns a [`ResolutionError`] when the property is empty, unreadable, or
/// names an unsupported ABI.
pub async fn resolve_architecture(bridge: &impl ShellExecutor) -> Result<Architecture> {
    let abi = shell_output(bridge, &format!("getprop {ABI_PROPERTY}"), Stream::Stdout)
        .await?
        .unwrap_or_default();
    let arch = Architecture::from_abi(&abi)?;
    tracing::debug!(abi = abi.trim(), %arch, "device architecture");
    Ok(arch)
}

/// Build the release spec for an install request.
///
/// An explicit URL skips both version and architecture resolution.
///
/// # Errors
///
/// Propagates version and architecture resolution failures.
pub async fn resolve_release(
    bridge: &impl ShellExecutor,
    index: &impl ReleaseIndex,
    config: &FsmConfig,
    request: &InstallRequest,
) -> Result<ReleaseSpec> {
    let source = if let Some(url) = &request.url {
        ReleaseSource::Explicit(url.clone())
    } else {
        let version = resolve_version(index, &config.repo, request.version.as_deref()).await?;
        let arch = resolve_architecture(bridge).await?;
        ReleaseSource::Versioned { version, arch }
    };
    Ok(ReleaseSpec {
        repo: config.repo.clone(),
        web_base: config.github.web_base.clone(),
        source,
    })
}
