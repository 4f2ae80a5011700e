//! Infrastructure layer — concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution, the adb
//! bridge, release lookups, artifact download, and config loading.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod adb;
pub mod artifact;
pub mod command_runner;
pub mod config;
pub mod release;
