//! Parsing of adb and device-side command output.
//!
//! Pure functions only — no I/O, no async.

/// Text adb prints after a successful single-file push.
pub const PUSH_CONFIRMATION: &str = "1 file pushed";

/// Which standard stream of a remote command carries the interesting output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Serials of devices in the `device` state from `adb devices` output.
///
/// Skips the `List of devices attached` header, blank lines, daemon notices
/// (`* daemon started successfully`), and devices that are `unauthorized`
/// or `offline`.
#[must_use]
pub fn parse_devices(listing: &str) -> Vec<String> {
    listing
        .lines()
        .filter(|line| !line.starts_with("List of") && !line.starts_with('*'))
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let serial = fields.next()?;
            (fields.next()? == "device").then(|| serial.to_string())
        })
        .collect()
}

/// Whether a push reported exactly one file transferred.
///
/// adb versions differ in which stream carries the summary, so both are
/// checked.
#[must_use]
pub fn push_confirmed(stdout: &str, stderr: &str) -> bool {
    stdout.contains(PUSH_CONFIRMATION) || stderr.contains(PUSH_CONFIRMATION)
}

/// Whether an `ls` probe shows the path exists.
///
/// `None` means the probe exited non-zero. Some toybox builds exit 0 while
/// printing the error, so the message is checked as well.
#[must_use]
pub fn path_exists(ls_output: Option<&str>) -> bool {
    ls_output.is_some_and(|out| !out.trim().is_empty() && !out.contains("No such file or directory"))
}

/// Whether an `ls -la` line shows an owner-executable regular file.
#[must_use]
pub fn is_executable_listing(ls_long: &str) -> bool {
    ls_long.contains("-rwx")
}
