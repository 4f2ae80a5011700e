//! Unit tests for `AppContext` construction and configuration precedence.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::PathBuf;

use anyhow::Result;
use fsm_cli::app::{AppContext, OutputFlags, OutputMode};
use fsm_cli::application::ports::ConfigStore;
use fsm_cli::domain::{ConfigOverrides, FsmConfig};

struct StaticStore(FsmConfig);

impl ConfigStore for StaticStore {
    fn load(&self) -> Result<FsmConfig> {
        Ok(self.0.clone())
    }

    fn path(&self) -> Result<PathBuf> {
        Ok(PathBuf::from("/nonexistent/config.yaml"))
    }
}

fn flags(json: bool, quiet: bool) -> OutputFlags {
    OutputFlags {
        no_color: true,
        quiet,
        json,
    }
}

fn explicit_adb() -> ConfigOverrides {
    ConfigOverrides {
        adb_program: Some("/opt/adb".to_string()),
        adb_serial: Some("emulator-5554".to_string()),
        ..ConfigOverrides::default()
    }
}

#[test]
fn test_json_mode_forces_quiet_output() {
    let app = AppContext::new(
        &flags(true, false),
        &StaticStore(FsmConfig::default()),
        explicit_adb(),
    )
    .expect("context");

    assert!(app.is_json());
    assert_eq!(app.mode, OutputMode::Json);
    assert!(app.output.quiet);
    assert!(!app.output.show_progress());
}

#[test]
fn test_human_mode_keeps_progress() {
    let app = AppContext::new(
        &flags(false, false),
        &StaticStore(FsmConfig::default()),
        explicit_adb(),
    )
    .expect("context");

    assert!(!app.is_json());
    assert!(!app.output.quiet);
}

#[test]
fn test_overrides_take_precedence_over_file() {
    let mut file = FsmConfig::default();
    file.repo = "from/file".to_string();
    file.adb.program = "adb-from-file".to_string();

    let app = AppContext::new(
        &flags(false, true),
        &StaticStore(file),
        ConfigOverrides {
            repo: Some("from/flag".to_string()),
            ..explicit_adb()
        },
    )
    .expect("context");

    assert_eq!(app.config.repo, "from/flag");
    assert_eq!(app.config.adb.program, "/opt/adb");
    assert_eq!(app.config.adb.serial.as_deref(), Some("emulator-5554"));
}

#[test]
fn test_invalid_file_values_are_rejected() {
    let mut file = FsmConfig::default();
    file.install_dir = "/data/local/tmp; reboot".to_string();

    let err = AppContext::new(&flags(false, false), &StaticStore(file), explicit_adb())
        .err()
        .expect("invalid install_dir");
    assert!(err.to_string().contains("install_dir"), "got: {err}");
}
