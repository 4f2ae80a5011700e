//! Shared test helpers: `Output` constructors and common fixtures.

#![allow(dead_code)]

use std::process::{ExitStatus, Output};

use fsm_cli::domain::FsmConfig;

// ── Cross-platform ExitStatus construction ───────────────────────────────────

/// Build an `ExitStatus` from a logical exit code (0 = success, non-zero = failure).
///
/// On Unix the raw wait-status encodes the exit code in bits 8–15, so we shift.
/// On Windows `ExitStatusExt::from_raw` takes the exit code directly.
#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    #[allow(clippy::cast_sign_loss)]
    ExitStatus::from_raw(code as u32)
}

// ── Output constructors ──────────────────────────────────────────────────────

pub fn ok_output(stdout: &[u8]) -> Output {
    Output {
        status: exit_status(0),
        stdout: stdout.to_vec(),
        stderr: Vec::new(),
    }
}

pub fn err_output(code: i32, stderr: &[u8]) -> Output {
    Output {
        status: exit_status(code),
        stdout: Vec::new(),
        stderr: stderr.to_vec(),
    }
}

/// Successful command that wrote to stderr only (adb push on some versions).
pub fn ok_stderr(stderr: &[u8]) -> Output {
    Output {
        status: exit_status(0),
        stdout: Vec::new(),
        stderr: stderr.to_vec(),
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub const ONE_DEVICE: &[u8] = b"List of devices attached\nemulator-5554\tdevice\n\n";

pub const PUSH_OK: &[u8] =
    b"/tmp/frida-server-x: 1 file pushed, 0 skipped. 38.2 MB/s (52341234 bytes in 1.305s)\n";

pub const PS_HEADER: &str = "USER           PID  PPID     VSZ    RSS WCHAN            ADDR S NAME\n";

/// A `ps -A` line for a process named `name`.
pub fn ps_line(pid: u32, name: &str) -> String {
    format!("root         {pid:>5}     1 1234567  48212 do_sys_poll         0 S {name}\n")
}

/// Default config without the post-launch delay.
pub fn test_config() -> FsmConfig {
    FsmConfig {
        startup_delay_ms: 0,
        ..FsmConfig::default()
    }
}
