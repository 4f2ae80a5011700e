//! Domain types for fsm configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::naming::validate_remote_component;

// ── Defaults ─────────────────────────────────────────────────────────────────

pub const DEFAULT_INSTALL_DIR: &str = "/data/local/tmp";
pub const DEFAULT_REPO: &str = "frida/frida";
pub const DEFAULT_SERVER_NAME: &str = "frida-server";
pub const DEFAULT_ADB_PROGRAM: &str = "adb";
pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_WEB_BASE: &str = "https://github.com";
pub const DEFAULT_STARTUP_DELAY_MS: u64 = 1000;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.fsm/config.yaml`.
///
/// Resolved once per invocation and handed to each component; nothing
/// mutates it afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FsmConfig {
    /// Directory on the device that holds frida-server binaries.
    pub install_dir: String,
    /// GitHub `owner/name` publishing frida-server releases.
    pub repo: String,
    /// Base binary name; also the filter for listings and process queries.
    pub server_name: String,
    /// adb invocation settings.
    pub adb: AdbConfig,
    /// Release host endpoints.
    pub github: GithubConfig,
    /// Delay between launching the server and checking the process table.
    pub startup_delay_ms: u64,
}

impl Default for FsmConfig {
    fn default() -> Self {
        Self {
            install_dir: DEFAULT_INSTALL_DIR.to_string(),
            repo: DEFAULT_REPO.to_string(),
            server_name: DEFAULT_SERVER_NAME.to_string(),
            adb: AdbConfig::default(),
            github: GithubConfig::default(),
            startup_delay_ms: DEFAULT_STARTUP_DELAY_MS,
        }
    }
}

impl FsmConfig {
    /// Post-launch verification delay.
    #[must_use]
    pub fn startup_delay(&self) -> Duration {
        Duration::from_millis(self.startup_delay_ms)
    }

    /// Check values that end up inside remote shell commands or URLs.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid key.
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("install_dir", &self.install_dir),
            ("server_name", &self.server_name),
        ] {
            if validate_remote_component(key, value).is_err() {
                return Err(invalid(key, value));
            }
        }
        let repo_ok = self
            .repo
            .split_once('/')
            .is_some_and(|(owner, name)| !owner.is_empty() && !name.is_empty() && !name.contains('/'));
        if !repo_ok {
            return Err(invalid("repo", &self.repo));
        }
        if self.adb.program.trim().is_empty() {
            return Err(invalid("adb.program", &self.adb.program));
        }
        Ok(())
    }
}

/// Per-invocation values that take precedence over the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// `--repo` on `install`.
    pub repo: Option<String>,
    /// `FSM_ADB`.
    pub adb_program: Option<String>,
    /// `ANDROID_SERIAL`.
    pub adb_serial: Option<String>,
}

impl FsmConfig {
    /// Apply overrides; unset fields keep the file value.
    #[must_use]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(repo) = overrides.repo {
            self.repo = repo;
        }
        if let Some(program) = overrides.adb_program {
            self.adb.program = program;
        }
        if overrides.adb_serial.is_some() {
            self.adb.serial = overrides.adb_serial;
        }
        self
    }
}

fn invalid(key: &str, value: &str) -> anyhow::Error {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
    .into()
}

/// adb settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AdbConfig {
    /// adb executable name or path.
    pub program: String,
    /// Device serial passed as `adb -s <serial>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
}

impl Default for AdbConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_ADB_PROGRAM.to_string(),
            serial: None,
        }
    }
}

/// Release host endpoints. Overridable for mirrors and tests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GithubConfig {
    /// REST API base, used for the latest-release lookup.
    pub api_base: String,
    /// Web base, used for release asset downloads.
    pub web_base: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            web_base: DEFAULT_WEB_BASE.to_string(),
        }
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
