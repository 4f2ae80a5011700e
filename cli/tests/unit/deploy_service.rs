//! Unit tests for the deployment service (`install`, `list_installed`).
//!
//! All device and network I/O goes through scripted doubles.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use fsm_cli::application::services::deploy::{discard_artifact, install, list_installed};
use fsm_cli::domain::install::VersionSource;
use fsm_cli::domain::{
    DeviceError, InstallRequest, LaunchError, ResolutionError, TransferError,
};

use super::helpers::{PUSH_OK, err_output, ok_stderr, test_config};
use super::mocks::{FakeBridge, FakeFetcher, FixedIndex, NoopReporter, RecordingReporter};

const ARM64_URL: &str =
    "https://github.com/frida/frida/releases/download/16.1.4/frida-server-16.1.4-android-arm64.xz";

fn arm64_device() -> FakeBridge {
    FakeBridge::connected()
        .on("getprop ro.product.cpu.abi", "arm64-v8a\n")
        .on("chmod 755 /data/local/tmp/frida-server-16.1.4", "")
}

// ============================================================================
// install
// ============================================================================

#[tokio::test]
async fn test_install_latest_on_arm64_pushes_versioned_binary() {
    let bridge = arm64_device();
    let index = FixedIndex::latest("16.1.4");
    let fetcher = FakeFetcher::new();

    let report = install(
        &bridge,
        &index,
        &fetcher,
        &NoopReporter,
        &test_config(),
        &InstallRequest::default(),
    )
    .await
    .expect("install should succeed");

    assert_eq!(report.url, ARM64_URL);
    assert_eq!(report.remote_path, "/data/local/tmp/frida-server-16.1.4");
    assert_eq!(report.version.as_deref(), Some("16.1.4"));
    assert_eq!(fetcher.urls(), vec![ARM64_URL.to_string()]);

    let pushes = bridge.push_calls();
    assert_eq!(pushes.len(), 1);
    assert_eq!(pushes[0].remote, "/data/local/tmp/frida-server-16.1.4");
    assert!(pushes[0].local_existed, "artifact must exist during push");
    assert!(bridge.ran("chmod 755 /data/local/tmp/frida-server-16.1.4"));
}

#[tokio::test]
async fn test_install_removes_local_artifact_after_success() {
    let bridge = arm64_device();
    let fetcher = FakeFetcher::new();

    install(
        &bridge,
        &FixedIndex::latest("16.1.4"),
        &fetcher,
        &NoopReporter,
        &test_config(),
        &InstallRequest::default(),
    )
    .await
    .expect("install should succeed");

    let staged = fetcher.staged();
    assert_eq!(staged.len(), 1);
    assert!(!staged[0].exists(), "local artifact must be removed");
}

#[tokio::test]
async fn test_install_unconfirmed_push_fails_and_removes_artifact() {
    let bridge = arm64_device().with_push_result(err_output(1, b"adb: error: device offline"));
    let fetcher = FakeFetcher::new();

    let err = install(
        &bridge,
        &FixedIndex::latest("16.1.4"),
        &fetcher,
        &NoopReporter,
        &test_config(),
        &InstallRequest::default(),
    )
    .await
    .expect_err("push failure must propagate");

    assert!(
        matches!(
            err.downcast_ref::<TransferError>(),
            Some(TransferError::PushNotConfirmed { remote, .. })
                if remote == "/data/local/tmp/frida-server-16.1.4"
        ),
        "got: {err:#}"
    );
    assert!(!fetcher.staged()[0].exists(), "local artifact must be removed");
    assert!(
        !bridge.ran("chmod 755 /data/local/tmp/frida-server-16.1.4"),
        "no chmod after a failed push"
    );
}

#[tokio::test]
async fn test_install_zero_exit_without_confirmation_is_failure() {
    let bridge = arm64_device().with_push_result(super::helpers::ok_output(b"0 files pushed"));

    let err = install(
        &bridge,
        &FixedIndex::latest("16.1.4"),
        &FakeFetcher::new(),
        &NoopReporter,
        &test_config(),
        &InstallRequest::default(),
    )
    .await
    .expect_err("missing confirmation must fail");
    assert!(err.downcast_ref::<TransferError>().is_some(), "got: {err:#}");
}

#[tokio::test]
async fn test_install_accepts_confirmation_on_stderr() {
    let bridge = arm64_device().with_push_result(ok_stderr(PUSH_OK));

    let report = install(
        &bridge,
        &FixedIndex::latest("16.1.4"),
        &FakeFetcher::new(),
        &NoopReporter,
        &test_config(),
        &InstallRequest::default(),
    )
    .await
    .expect("stderr confirmation counts");
    assert_eq!(report.remote_path, "/data/local/tmp/frida-server-16.1.4");
}

#[tokio::test]
async fn test_install_explicit_url_skips_version_and_abi_lookup() {
    let bridge = FakeBridge::connected().on("chmod 755 /data/local/tmp/frida-server", "");
    let index = FixedIndex::latest("16.1.4");
    let fetcher = FakeFetcher::new();
    let url = "https://mirror.example/frida-server-custom.gz";

    let report = install(
        &bridge,
        &index,
        &fetcher,
        &NoopReporter,
        &test_config(),
        &InstallRequest {
            url: Some(url.to_string()),
            ..InstallRequest::default()
        },
    )
    .await
    .expect("install from URL should succeed");

    assert_eq!(report.url, url);
    assert_eq!(report.remote_path, "/data/local/tmp/frida-server");
    assert_eq!(report.version, None);
    assert_eq!(index.call_count(), 0, "latest version must not be queried");
    assert!(!bridge.ran("getprop ro.product.cpu.abi"));
}

#[tokio::test]
async fn test_install_url_with_unsafe_version_is_rejected_before_download() {
    let bridge = FakeBridge::connected();
    let fetcher = FakeFetcher::new();

    let err = install(
        &bridge,
        &FixedIndex::latest("16.1.4"),
        &fetcher,
        &NoopReporter,
        &test_config(),
        &InstallRequest {
            url: Some("https://mirror.example/fs.xz".to_string()),
            version: Some("1;reboot".to_string()),
            ..InstallRequest::default()
        },
    )
    .await
    .expect_err("unsafe version");

    assert!(matches!(
        err.downcast_ref::<LaunchError>(),
        Some(LaunchError::InvalidName { kind: "version", .. })
    ));
    assert!(fetcher.urls().is_empty(), "nothing downloaded");
    assert!(bridge.push_calls().is_empty());
    assert!(bridge.shell_calls().is_empty());
}

#[tokio::test]
async fn test_install_url_with_prefixed_version_names_file_without_prefix() {
    let bridge = FakeBridge::connected().on("chmod 755 /data/local/tmp/frida-server-16.1.4", "");

    let report = install(
        &bridge,
        &FixedIndex::unreachable(),
        &FakeFetcher::new(),
        &NoopReporter,
        &test_config(),
        &InstallRequest {
            url: Some("https://mirror.example/fs.xz".to_string()),
            version: Some("v16.1.4".to_string()),
            ..InstallRequest::default()
        },
    )
    .await
    .expect("install from URL with version");

    assert_eq!(report.remote_path, "/data/local/tmp/frida-server-16.1.4");
    assert_eq!(report.version.as_deref(), Some("16.1.4"));
}

#[test]
fn test_discard_artifact_removes_file() {
    let file = tempfile::NamedTempFile::new().expect("temp file");
    let path = file.into_temp_path();
    let kept = path.to_path_buf();

    discard_artifact(path);
    assert!(!kept.exists());
}

#[tokio::test]
async fn test_install_explicit_version_does_not_query_index() {
    let bridge = FakeBridge::connected()
        .on("getprop ro.product.cpu.abi", "x86_64\n")
        .on("chmod 755 /data/local/tmp/frida-server-15.2.2", "");
    let index = FixedIndex::unreachable();
    let fetcher = FakeFetcher::new();

    let report = install(
        &bridge,
        &index,
        &fetcher,
        &NoopReporter,
        &test_config(),
        &InstallRequest {
            version: Some("15.2.2".to_string()),
            ..InstallRequest::default()
        },
    )
    .await
    .expect("pinned version install");

    assert_eq!(index.call_count(), 0);
    assert_eq!(
        report.url,
        "https://github.com/frida/frida/releases/download/15.2.2/frida-server-15.2.2-android-x86_64.xz"
    );
    assert_eq!(report.remote_path, "/data/local/tmp/frida-server-15.2.2");
}

#[tokio::test]
async fn test_install_keep_name_uses_plain_server_name() {
    let bridge = FakeBridge::connected()
        .on("getprop ro.product.cpu.abi", "arm64-v8a\n")
        .on("chmod 755 /data/local/tmp/frida-server", "");

    let report = install(
        &bridge,
        &FixedIndex::latest("16.1.4"),
        &FakeFetcher::new(),
        &NoopReporter,
        &test_config(),
        &InstallRequest {
            keep_name: true,
            ..InstallRequest::default()
        },
    )
    .await
    .expect("install should succeed");
    assert_eq!(report.remote_path, "/data/local/tmp/frida-server");
}

#[tokio::test]
async fn test_install_custom_name_wins_over_version() {
    let bridge = FakeBridge::connected()
        .on("getprop ro.product.cpu.abi", "arm64-v8a\n")
        .on("chmod 755 /data/local/tmp/fs-arm64", "");

    let report = install(
        &bridge,
        &FixedIndex::latest("16.1.4"),
        &FakeFetcher::new(),
        &NoopReporter,
        &test_config(),
        &InstallRequest {
            keep_name: true,
            custom_name: Some("fs-arm64".to_string()),
            ..InstallRequest::default()
        },
    )
    .await
    .expect("install should succeed");
    assert_eq!(report.remote_path, "/data/local/tmp/fs-arm64");
}

#[tokio::test]
async fn test_install_rejects_custom_name_with_shell_metacharacters() {
    let bridge = FakeBridge::connected();
    let fetcher = FakeFetcher::new();

    let err = install(
        &bridge,
        &FixedIndex::latest("16.1.4"),
        &fetcher,
        &NoopReporter,
        &test_config(),
        &InstallRequest {
            custom_name: Some("fs;reboot".to_string()),
            ..InstallRequest::default()
        },
    )
    .await
    .expect_err("unsafe name");
    assert!(matches!(
        err.downcast_ref::<LaunchError>(),
        Some(LaunchError::InvalidName { .. })
    ));
    assert!(fetcher.urls().is_empty(), "nothing downloaded");
}

#[tokio::test]
async fn test_install_without_device_fails_before_download() {
    let fetcher = FakeFetcher::new();
    let index = FixedIndex::latest("16.1.4");

    let err = install(
        &FakeBridge::no_device(),
        &index,
        &fetcher,
        &NoopReporter,
        &test_config(),
        &InstallRequest::default(),
    )
    .await
    .expect_err("no device");

    assert!(matches!(
        err.downcast_ref::<DeviceError>(),
        Some(DeviceError::NoDevice)
    ));
    assert!(fetcher.urls().is_empty());
    assert_eq!(index.call_count(), 0);
}

#[tokio::test]
async fn test_install_unsupported_abi_is_resolution_error() {
    let bridge = FakeBridge::connected().on("getprop ro.product.cpu.abi", "mips\n");
    let fetcher = FakeFetcher::new();

    let err = install(
        &bridge,
        &FixedIndex::latest("16.1.4"),
        &fetcher,
        &NoopReporter,
        &test_config(),
        &InstallRequest::default(),
    )
    .await
    .expect_err("mips is not published");

    assert!(matches!(
        err.downcast_ref::<ResolutionError>(),
        Some(ResolutionError::UnsupportedAbi(abi)) if abi == "mips"
    ));
    assert!(fetcher.urls().is_empty());
}

#[tokio::test]
async fn test_install_unreachable_index_is_resolution_error() {
    let err = install(
        &arm64_device(),
        &FixedIndex::unreachable(),
        &FakeFetcher::new(),
        &NoopReporter,
        &test_config(),
        &InstallRequest::default(),
    )
    .await
    .expect_err("index down");

    assert!(matches!(
        err.downcast_ref::<ResolutionError>(),
        Some(ResolutionError::LatestVersion(_))
    ));
}

#[tokio::test]
async fn test_install_download_failure_skips_push() {
    let bridge = arm64_device();

    let err = install(
        &bridge,
        &FixedIndex::latest("16.1.4"),
        &FakeFetcher::failing(),
        &NoopReporter,
        &test_config(),
        &InstallRequest::default(),
    )
    .await
    .expect_err("download failed");

    assert!(matches!(
        err.downcast_ref::<TransferError>(),
        Some(TransferError::Download { .. })
    ));
    assert!(bridge.push_calls().is_empty());
}

#[tokio::test]
async fn test_install_chmod_failure_is_only_a_warning() {
    let bridge = FakeBridge::connected()
        .on("getprop ro.product.cpu.abi", "arm64-v8a\n")
        .fails("chmod 755 /data/local/tmp/frida-server-16.1.4");
    let reporter = RecordingReporter::default();

    install(
        &bridge,
        &FixedIndex::latest("16.1.4"),
        &FakeFetcher::new(),
        &reporter,
        &test_config(),
        &InstallRequest::default(),
    )
    .await
    .expect("chmod failure is not fatal");

    let warnings = reporter.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("executable"), "got: {warnings:?}");
}

// ============================================================================
// list_installed
// ============================================================================

#[tokio::test]
async fn test_list_installed_reports_versions_in_directory_order() {
    let bridge = FakeBridge::connected()
        .on(
            "ls /data/local/tmp",
            "frida-server-16.1.4\nnotes.txt\nfrida-server-15.2.2\n",
        )
        .on("/data/local/tmp/frida-server-16.1.4 --version", "16.1.4\n")
        .fails("/data/local/tmp/frida-server-15.2.2 --version")
        .on(
            "ls -la /data/local/tmp/frida-server-15.2.2",
            "-rwxr-xr-x 1 shell shell 52341234 2024-01-01 12:00 /data/local/tmp/frida-server-15.2.2\n",
        );

    let binaries = list_installed(&bridge, "/data/local/tmp", "frida-server")
        .await
        .expect("list should succeed");

    let names: Vec<&str> = binaries.iter().map(|b| b.file_name.as_str()).collect();
    assert_eq!(names, vec!["frida-server-16.1.4", "frida-server-15.2.2"]);
    assert_eq!(binaries[0].version.as_deref(), Some("16.1.4"));
    assert_eq!(binaries[0].version_source, Some(VersionSource::Reported));
    assert_eq!(binaries[1].version.as_deref(), Some("15.2.2"));
    assert_eq!(binaries[1].version_source, Some(VersionSource::FileName));
}

#[tokio::test]
async fn test_list_installed_non_executable_entry_is_unknown() {
    let bridge = FakeBridge::connected()
        .on("ls /data/local/tmp", "frida-server-16.1.4\n")
        .fails("/data/local/tmp/frida-server-16.1.4 --version")
        .on(
            "ls -la /data/local/tmp/frida-server-16.1.4",
            "-rw-r--r-- 1 shell shell 52341234 2024-01-01 12:00 frida-server-16.1.4\n",
        );

    let binaries = list_installed(&bridge, "/data/local/tmp", "frida-server")
        .await
        .expect("list should succeed");

    assert_eq!(binaries.len(), 1);
    assert_eq!(binaries[0].version, None);
    assert_eq!(binaries[0].version_label(), "Unknown");
}

#[tokio::test]
async fn test_list_installed_empty_directory_is_not_an_error() {
    let bridge = FakeBridge::connected().on("ls /data/local/tmp", "");

    let binaries = list_installed(&bridge, "/data/local/tmp", "frida-server")
        .await
        .expect("empty listing is fine");
    assert!(binaries.is_empty());
}

#[tokio::test]
async fn test_list_installed_rejects_unsafe_directory() {
    let err = list_installed(&FakeBridge::connected(), "/data/$(id)", "frida-server")
        .await
        .expect_err("unsafe dir");
    assert!(matches!(
        err.downcast_ref::<LaunchError>(),
        Some(LaunchError::InvalidName { kind: "dir", .. })
    ));
}
