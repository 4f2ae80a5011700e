//! Install request and installed-binary types.

use serde::Serialize;

use crate::domain::release::ArtifactDigest;

/// Label shown when no version could be determined.
pub const UNKNOWN_VERSION: &str = "Unknown";

/// What the user asked `install` to do.
#[derive(Debug, Clone, Default)]
pub struct InstallRequest {
    /// Release version; `None` means "latest" unless `url` is given.
    pub version: Option<String>,
    /// Explicit artifact URL, used verbatim.
    pub url: Option<String>,
    /// Keep the plain server name even when a version is known.
    pub keep_name: bool,
    /// Explicit remote file name.
    pub custom_name: Option<String>,
}

/// Result of a successful install.
#[derive(Debug, Clone, Serialize)]
pub struct InstallReport {
    /// Where the binary now lives on the device.
    pub remote_path: String,
    /// Version resolved during the install, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// URL the artifact was downloaded from.
    pub url: String,
    /// Identity of the pushed binary.
    pub artifact: ArtifactDigest,
}

/// How a version label was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionSource {
    /// `<binary> --version` on the device.
    Reported,
    /// Dotted number in the file name of an executable entry.
    FileName,
}

/// A frida-server binary found in a device directory.
///
/// Inferred from a directory listing on every query; never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstalledBinary {
    pub remote_path: String,
    pub file_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_source: Option<VersionSource>,
}

impl InstalledBinary {
    /// Version label for display, `Unknown` when none was found.
    #[must_use]
    pub fn version_label(&self) -> &str {
        self.version.as_deref().unwrap_or(UNKNOWN_VERSION)
    }
}
