//! Unit tests for version, architecture, and release-source resolution.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use fsm_cli::application::services::release::{
    resolve_architecture, resolve_release, resolve_version,
};
use fsm_cli::domain::{
    Architecture, InstallRequest, LaunchError, ReleaseSource, ResolutionError,
};

use super::helpers::test_config;
use super::mocks::{FakeBridge, FixedIndex};

#[tokio::test]
async fn test_resolve_version_requested_strips_leading_v() {
    let index = FixedIndex::unreachable();

    let version = resolve_version(&index, "frida/frida", Some("v16.2.1"))
        .await
        .expect("explicit version");
    assert_eq!(version, "16.2.1");
    assert_eq!(index.call_count(), 0);
}

#[tokio::test]
async fn test_resolve_version_latest_queries_configured_repo() {
    let index = FixedIndex::latest("16.1.4");

    let version = resolve_version(&index, "someone/frida-fork", None)
        .await
        .expect("latest");
    assert_eq!(version, "16.1.4");
    assert_eq!(
        *index.calls.lock().expect("mutex poisoned"),
        vec!["someone/frida-fork".to_string()]
    );
}

#[tokio::test]
async fn test_resolve_version_unreachable_index() {
    let err = resolve_version(&FixedIndex::unreachable(), "frida/frida", None)
        .await
        .expect_err("index down");
    match err.downcast_ref::<ResolutionError>() {
        Some(ResolutionError::LatestVersion(reason)) => {
            assert!(reason.contains("unreachable"), "got: {reason}");
        }
        other => panic!("expected LatestVersion, got {other:?}"),
    }
}

#[tokio::test]
async fn test_resolve_version_rejects_unsafe_tag() {
    let err = resolve_version(&FixedIndex::latest("16.1.4;rm -rf /"), "frida/frida", None)
        .await
        .expect_err("unsafe tag");
    assert!(matches!(
        err.downcast_ref::<LaunchError>(),
        Some(LaunchError::InvalidName { kind: "version", .. })
    ));
}

#[tokio::test]
async fn test_resolve_architecture_maps_abi() {
    for (abi, expected) in [
        ("arm64-v8a\n", Architecture::Arm64),
        ("armeabi-v7a\n", Architecture::Arm),
        ("x86_64\n", Architecture::X86_64),
        ("x86\n", Architecture::X86),
    ] {
        let bridge = FakeBridge::connected().on("getprop ro.product.cpu.abi", abi);
        let arch = resolve_architecture(&bridge).await.expect("known abi");
        assert_eq!(arch, expected, "abi {abi:?}");
    }
}

#[tokio::test]
async fn test_resolve_architecture_empty_property() {
    let bridge = FakeBridge::connected().on("getprop ro.product.cpu.abi", "\n");

    let err = resolve_architecture(&bridge).await.expect_err("empty abi");
    assert!(matches!(
        err.downcast_ref::<ResolutionError>(),
        Some(ResolutionError::ArchitectureUnknown)
    ));
}

#[tokio::test]
async fn test_resolve_release_explicit_url_wins() {
    let bridge = FakeBridge::connected();
    let index = FixedIndex::latest("16.1.4");
    let request = InstallRequest {
        version: Some("15.0.0".to_string()),
        url: Some("https://mirror.example/fs.xz".to_string()),
        ..InstallRequest::default()
    };

    let spec = resolve_release(&bridge, &index, &test_config(), &request)
        .await
        .expect("explicit url");

    assert_eq!(
        spec.source,
        ReleaseSource::Explicit("https://mirror.example/fs.xz".to_string())
    );
    assert_eq!(spec.version(), None);
    assert!(bridge.shell_calls().is_empty());
    assert_eq!(index.call_count(), 0);
}

#[tokio::test]
async fn test_resolve_release_uses_configured_web_base() {
    let bridge = FakeBridge::connected().on("getprop ro.product.cpu.abi", "armeabi-v7a\n");
    let mut config = test_config();
    config.github.web_base = "https://mirror.example/".to_string();

    let spec = resolve_release(
        &bridge,
        &FixedIndex::latest("16.1.4"),
        &config,
        &InstallRequest::default(),
    )
    .await
    .expect("versioned release");

    assert_eq!(
        spec.download_url(),
        "https://mirror.example/frida/frida/releases/download/16.1.4/frida-server-16.1.4-android-arm.xz"
    );
}
