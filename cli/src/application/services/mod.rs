//! Application services — the device deployment lifecycle.
//!
//! Each service checks device connectivity first and routes all I/O through
//! the port traits in [`crate::application::ports`].

pub mod deploy;
pub mod device;
pub mod process;
pub mod release;
