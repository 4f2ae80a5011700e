//! Remote process model, launch-target selection, and kill commands.
//!
//! This module is intentionally free of I/O, async, and external layer imports.
//! All functions take data in and return data out.

use serde::Serialize;

use crate::domain::error::LaunchError;
use crate::domain::naming::{join_remote, validate_remote_component, versioned_name};

/// One line of the device process table.
///
/// Re-derived from `ps -A` on every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteProcess {
    pub pid: u32,
    pub user: String,
    /// Resident set size as printed by `ps` (KB).
    pub memory_kb: String,
    pub command: String,
}

/// Parse one `ps -A` line.
///
/// Toybox `ps` prints `USER PID PPID VSZ RSS WCHAN ADDR S NAME`. Lines with
/// fewer than five fields, or a non-numeric PID (the header), yield `None`.
#[must_use]
pub fn parse_process_line(line: &str) -> Option<RemoteProcess> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 5 {
        return None;
    }
    let pid = fields[1].parse().ok()?;
    let command = if fields.len() > 8 {
        fields[8..].join(" ")
    } else {
        fields[fields.len() - 1].to_string()
    };
    Some(RemoteProcess {
        pid,
        user: fields[0].to_string(),
        memory_kb: fields[4].to_string(),
        command,
    })
}

/// Processes whose `ps` line contains `filter`, in table order.
#[must_use]
pub fn parse_process_table(table: &str, filter: &str) -> Vec<RemoteProcess> {
    table
        .lines()
        .filter(|line| line.contains(filter))
        .filter_map(parse_process_line)
        .collect()
}

// ── Launch ───────────────────────────────────────────────────────────────────

/// What the user asked `run` to start.
#[derive(Debug, Clone, Default)]
pub struct LaunchRequest {
    /// Directory override; defaults to the configured install dir.
    pub dir: Option<String>,
    /// Exact file name inside the directory.
    pub name: Option<String>,
    /// Version, resolved to `<server>-<version>` inside the directory.
    pub version: Option<String>,
    /// Extra server arguments, or a literal path when starting with `/`.
    pub params: Option<String>,
}

/// How the binary to launch was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchTarget {
    /// `--name`; must exist remotely.
    Named(String),
    /// `--version`; must exist remotely.
    Versioned(String),
    /// `--params` starting with `/`, used as-is.
    LiteralPath(String),
    /// Nothing given; pick from the directory listing.
    Discover,
}

impl LaunchRequest {
    /// Select the launch target: name, then version, then a literal path in
    /// `params`, then discovery.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError::InvalidName`] for a name, version, or path that
    /// is not safe to interpolate into a shell command.
    pub fn target(&self, dir: &str, server_name: &str) -> Result<LaunchTarget, LaunchError> {
        if let Some(name) = &self.name {
            validate_remote_component("name", name)?;
            return Ok(LaunchTarget::Named(join_remote(dir, name)));
        }
        if let Some(version) = &self.version {
            validate_remote_component("version", version)?;
            return Ok(LaunchTarget::Versioned(join_remote(
                dir,
                &versioned_name(server_name, version),
            )));
        }
        if let Some(path) = self.literal_path() {
            validate_remote_component("path", path)?;
            return Ok(LaunchTarget::LiteralPath(path.to_string()));
        }
        Ok(LaunchTarget::Discover)
    }

    /// Params used as a path (leading `/`), if any.
    #[must_use]
    pub fn literal_path(&self) -> Option<&str> {
        self.params.as_deref().filter(|p| p.starts_with('/'))
    }

    /// Params appended to the server command line (not consumed as a path).
    #[must_use]
    pub fn extra_params(&self) -> Option<&str> {
        self.params
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty() && !p.starts_with('/'))
    }
}

/// Pick the single matching entry from a directory listing.
///
/// # Errors
///
/// Returns [`LaunchError::NoBinary`] for zero entries and
/// [`LaunchError::AmbiguousBinary`] for more than one.
pub fn pick_single_entry(dir: &str, entries: &[String]) -> Result<String, LaunchError> {
    match entries {
        [] => Err(LaunchError::NoBinary(dir.to_string())),
        [only] => Ok(join_remote(dir, only)),
        many => Err(LaunchError::AmbiguousBinary {
            dir: dir.to_string(),
            candidates: many.join(", "),
        }),
    }
}

/// Privileged, detached launch command for `adb shell`.
///
/// Standard streams are redirected and the process is backgrounded under
/// `nohup` so it outlives the adb session.
#[must_use]
pub fn launch_command(path: &str, params: Option<&str>) -> String {
    let mut inner = format!("nohup {path}");
    if let Some(params) = params {
        inner.push(' ');
        inner.push_str(params);
    }
    format!("su -c '{inner} < /dev/null > /dev/null 2>&1 &'")
}

// ── Kill ─────────────────────────────────────────────────────────────────────

/// What `kill` should terminate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KillTarget {
    Pid(u32),
    Name(String),
    /// Every process matching the configured server name.
    AllDefault,
}

impl KillTarget {
    /// Choose the target: PID, then name, then all default-named processes.
    #[must_use]
    pub fn select(pid: Option<u32>, name: Option<String>) -> Self {
        match (pid, name) {
            (Some(pid), _) => Self::Pid(pid),
            (None, Some(name)) => Self::Name(name),
            (None, None) => Self::AllDefault,
        }
    }
}

/// Kill by PID with SIGKILL.
#[must_use]
pub fn kill_pid_command(pid: u32) -> String {
    format!("su -c 'kill -9 {pid}'")
}

/// Kill by pattern, falling back to `killall` when `pkill` is unavailable.
#[must_use]
pub fn kill_name_command(name: &str) -> String {
    format!("su -c 'pkill -f {name} || killall -9 {name}'")
}
