//! Remote naming policy and path helpers — no I/O, no async.
//!
//! Every value that is interpolated into a remote shell command passes
//! through [`validate_remote_component`] first.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::LaunchError;

/// Characters allowed in remote names, versions, and directories.
pub static REMOTE_COMPONENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Safety: this is a compile-time constant pattern — cannot fail.
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z0-9._/-]+$").expect("valid regex")
});

/// Dotted release number embedded in a filename, e.g. `16.1.4`.
pub static FILENAME_VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"\d+\.\d+\.\d+").expect("valid regex")
});

/// Reject values that would change the meaning of a remote shell command.
///
/// # Errors
///
/// Returns [`LaunchError::InvalidName`] if `value` is empty or contains
/// anything outside `[A-Za-z0-9._/-]`.
pub fn validate_remote_component(kind: &'static str, value: &str) -> Result<(), LaunchError> {
    if REMOTE_COMPONENT_RE.is_match(value) {
        Ok(())
    } else {
        Err(LaunchError::InvalidName {
            kind,
            value: value.to_string(),
        })
    }
}

/// Trim a user-supplied version, drop a leading `v`, and check it is safe
/// to embed in a remote file name.
///
/// # Errors
///
/// Returns [`LaunchError::InvalidName`] for anything
/// [`validate_remote_component`] rejects.
pub fn normalize_version(raw: &str) -> Result<String, LaunchError> {
    let version = raw.trim().trim_start_matches('v');
    validate_remote_component("version", version)?;
    Ok(version.to_string())
}

/// Join a remote directory and file name with exactly one `/`.
#[must_use]
pub fn join_remote(dir: &str, name: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() {
        format!("/{name}")
    } else {
        format!("{dir}/{name}")
    }
}

/// Last component of a remote path.
#[must_use]
pub fn remote_file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Inputs to the install naming policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct NamingPolicy<'a> {
    /// Version resolved during this install, if any.
    pub version: Option<&'a str>,
    /// Keep the plain server name even when a version is known.
    pub keep_name: bool,
    /// Explicit file name chosen by the user.
    pub custom_name: Option<&'a str>,
}

impl NamingPolicy<'_> {
    /// File name for the installed binary.
    ///
    /// Priority: custom name, then `<server>-<version>` (unless `keep_name`),
    /// then the plain server name.
    #[must_use]
    pub fn file_name(&self, server_name: &str) -> String {
        match (self.custom_name, self.version) {
            (Some(custom), _) => custom.to_string(),
            (None, Some(version)) if !self.keep_name => format!("{server_name}-{version}"),
            _ => server_name.to_string(),
        }
    }
}

/// Full remote path for an install under `dir`.
#[must_use]
pub fn remote_binary_path(dir: &str, server_name: &str, policy: &NamingPolicy<'_>) -> String {
    join_remote(dir, &policy.file_name(server_name))
}

/// Versioned file name used by `run --version`.
#[must_use]
pub fn versioned_name(server_name: &str, version: &str) -> String {
    format!("{server_name}-{version}")
}

/// Extract a dotted version number from a file name.
#[must_use]
pub fn version_from_filename(file_name: &str) -> Option<String> {
    FILENAME_VERSION_RE
        .find(file_name)
        .map(|m| m.as_str().to_string())
}

/// Entries of an `ls` listing whose name contains `filter`, in listing order.
///
/// `ls` may print several names per line when attached to a terminal, so the
/// listing is split on any whitespace.
#[must_use]
pub fn filter_entries(listing: &str, filter: &str) -> Vec<String> {
    listing
        .split_whitespace()
        .filter(|entry| entry.contains(filter))
        .map(String::from)
        .collect()
}
