//! Release naming, download URL construction, and artifact format sniffing.
//!
//! This module is intentionally free of I/O, async, and external layer imports.

use serde::{Deserialize, Serialize};

use crate::domain::arch::Architecture;
use crate::domain::error::ResolutionError;

/// Asset name prefix used by frida-server releases.
pub const ARTIFACT_NAME: &str = "frida-server";

/// Where an install downloads its artifact from.
///
/// Exactly one of the two sources is used: an explicit URL is taken
/// verbatim, otherwise the URL is built from version and architecture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseSource {
    /// Constructed from `<web_base>/<repo>/releases/download/...`.
    Versioned {
        version: String,
        arch: Architecture,
    },
    /// User-supplied URL.
    Explicit(String),
}

/// Fully resolved release request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSpec {
    /// GitHub `owner/name`.
    pub repo: String,
    /// Web base, e.g. `https://github.com`.
    pub web_base: String,
    /// Source of the download.
    pub source: ReleaseSource,
}

impl ReleaseSpec {
    /// Version when the URL is version-driven.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        match &self.source {
            ReleaseSource::Versioned { version, .. } => Some(version),
            ReleaseSource::Explicit(_) => None,
        }
    }

    /// The concrete download URL.
    #[must_use]
    pub fn download_url(&self) -> String {
        match &self.source {
            ReleaseSource::Explicit(url) => url.clone(),
            ReleaseSource::Versioned { version, arch } => format!(
                "{}/{}/releases/download/{version}/{}",
                self.web_base.trim_end_matches('/'),
                self.repo,
                asset_file_name(version, *arch),
            ),
        }
    }
}

/// Asset file name, e.g. `frida-server-16.1.4-android-arm64.xz`.
#[must_use]
pub fn asset_file_name(version: &str, arch: Architecture) -> String {
    format!("{ARTIFACT_NAME}-{version}-{}.xz", arch.release_suffix())
}

/// Latest-release endpoint of the GitHub REST API.
#[must_use]
pub fn latest_release_url(api_base: &str, repo: &str) -> String {
    format!("{}/repos/{repo}/releases/latest", api_base.trim_end_matches('/'))
}

#[derive(Deserialize)]
struct LatestRelease {
    tag_name: String,
}

/// Parse a `releases/latest` JSON body into a bare version string.
///
/// # Errors
///
/// Returns [`ResolutionError::LatestVersion`] if the body is not JSON, has no
/// `tag_name`, or the tag is empty after stripping a leading `v`.
pub fn parse_latest_tag(body: &str) -> Result<String, ResolutionError> {
    let release: LatestRelease = serde_json::from_str(body)
        .map_err(|e| ResolutionError::LatestVersion(format!("malformed release index: {e}")))?;
    let version = release.tag_name.trim().trim_start_matches('v');
    if version.is_empty() {
        return Err(ResolutionError::LatestVersion(
            "release index returned an empty tag".to_string(),
        ));
    }
    Ok(version.to_string())
}

// ── Artifact format ──────────────────────────────────────────────────────────

/// Compression scheme of a downloaded artifact, sniffed from its file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchiveFormat {
    Xz,
    Gzip,
    TarGz,
    /// Already a bare binary; copied through unchanged.
    Raw,
}

impl ArchiveFormat {
    /// Sniff the format from a file name, case-insensitively.
    ///
    /// `.tar.gz` / `.tgz` is checked before `.gz`.
    #[must_use]
    pub fn from_file_name(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        if lower.ends_with(".tar.gz") || lower.ends_with(".tgz") {
            Self::TarGz
        } else if lower.ends_with(".gz") {
            Self::Gzip
        } else if lower.ends_with(".xz") {
            Self::Xz
        } else {
            Self::Raw
        }
    }
}

/// Last path segment of a URL, ignoring query string and fragment.
///
/// Falls back to `artifact` when the URL ends with `/`.
#[must_use]
pub fn file_name_from_url(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    match path.rsplit('/').next() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => "artifact".to_string(),
    }
}

/// Identity of a staged binary, reported after download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactDigest {
    /// Hex-encoded SHA-256 of the decompressed binary.
    pub sha256: String,
    /// Size in bytes of the decompressed binary.
    pub size: u64,
}

/// Lowercase hex encoding.
#[must_use]
pub fn hex_encode(bytes: &[u8]) -> String {
    use std::fmt::Write;
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut s, b| {
        let _ = write!(s, "{b:02x}");
        s
    })
}
