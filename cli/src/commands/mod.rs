//! Command implementations

pub mod install;
pub mod kill;
pub mod list;
pub mod ps;
pub mod run;
pub mod version;
