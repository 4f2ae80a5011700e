//! Device CPU architecture as understood by frida-server release assets.

use std::fmt;

use serde::Serialize;

use crate::domain::error::ResolutionError;

/// Android property holding the primary CPU ABI.
pub const ABI_PROPERTY: &str = "ro.product.cpu.abi";

/// Architectures frida-server is published for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Architecture {
    Arm64,
    Arm,
    X86_64,
    X86,
}

impl Architecture {
    /// Map an ABI string (e.g. `arm64-v8a`) to an architecture.
    ///
    /// Matching is by substring in a fixed priority order: `arm64` before
    /// `armeabi`, and `x86_64` before `x86`, since the later patterns are
    /// also contained in (or overlap with) the earlier ones.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::ArchitectureUnknown`] for a blank ABI and
    /// [`ResolutionError::UnsupportedAbi`] when nothing matches.
    pub fn from_abi(abi: &str) -> Result<Self, ResolutionError> {
        const PRIORITY: [(&str, Architecture); 4] = [
            ("arm64", Architecture::Arm64),
            ("armeabi", Architecture::Arm),
            ("x86_64", Architecture::X86_64),
            ("x86", Architecture::X86),
        ];

        let abi = abi.trim();
        if abi.is_empty() {
            return Err(ResolutionError::ArchitectureUnknown);
        }
        PRIORITY
            .iter()
            .find(|(pattern, _)| abi.contains(pattern))
            .map(|&(_, arch)| arch)
            .ok_or_else(|| ResolutionError::UnsupportedAbi(abi.to_string()))
    }

    /// Suffix used in release asset names, e.g. `android-arm64`.
    #[must_use]
    pub fn release_suffix(self) -> &'static str {
        match self {
            Self::Arm64 => "android-arm64",
            Self::Arm => "android-arm",
            Self::X86_64 => "android-x86_64",
            Self::X86 => "android-x86",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.release_suffix())
    }
}
