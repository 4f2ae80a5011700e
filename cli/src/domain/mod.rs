//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod arch;
pub mod config;
pub mod device;
pub mod error;
pub mod install;
pub mod naming;
pub mod process;
pub mod release;

pub use arch::Architecture;
pub use config::{ConfigOverrides, FsmConfig};
pub use error::{ConfigError, DeviceError, LaunchError, ResolutionError, TransferError};
pub use install::{InstallReport, InstallRequest, InstalledBinary};
pub use process::{KillTarget, LaunchRequest, RemoteProcess};
pub use release::{ArchiveFormat, ArtifactDigest, ReleaseSource, ReleaseSpec};
