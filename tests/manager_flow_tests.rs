//! End-to-end orchestration tests
//!
//! Upload, patch, release, check and apply against in-memory
//! collaborators, plus the loud-failure validation paths.

mod common;

use otaplan::domain::{Device, PlanKind};
use otaplan::error::OtaError;
use otaplan::store::ArtifactStore;
use std::sync::Arc;

#[test]
fn test_full_flow_fresh_device() {
    let h = common::harness();
    common::seed_two_versions(&h, &["Device-NEW"]);

    let device = Device::new("Device-NEW", "Pixel-8", 34, None);
    let plan = h.manager.check_for_updates(&device).unwrap().unwrap();
    assert_eq!(plan.kind(), PlanKind::Install);

    h.manager.execute_task(&device, &plan).unwrap();
    assert_eq!(device.current_version().as_deref(), Some("2.0.0"));

    let dispatches = h.agent.dispatches_for("Device-NEW");
    assert_eq!(dispatches.len(), 1);
    assert_eq!(dispatches[0].kind, PlanKind::Install);
}

#[test]
fn test_full_flow_delta_update() {
    let h = common::harness();
    common::seed_two_versions(&h, &["Device-A"]);

    let device = Device::new("Device-A", "Pixel-7", 34, Some("1.0.0"));
    let plan = h.manager.check_for_updates(&device).unwrap().unwrap();
    assert_eq!(plan.kind(), PlanKind::Update);

    h.manager.execute_task(&device, &plan).unwrap();
    assert_eq!(device.current_version().as_deref(), Some("2.0.0"));

    // The dispatched payload is the registered patch, fetchable from the
    // store with the DIFF header.
    let dispatches = h.agent.dispatches_for("Device-A");
    assert_eq!(dispatches.len(), 1);
    let pack = h.artifacts.fetch(&dispatches[0].payload).unwrap();
    assert_eq!(&pack[..4], b"DIFF");
}

#[test]
fn test_upload_validation_fails_loudly() {
    let h = common::harness();

    let err = h
        .manager
        .upload_new_version("", 24, "", b"APK")
        .unwrap_err();
    assert!(matches!(err, OtaError::InvalidUpload { .. }));

    let err = h
        .manager
        .upload_new_version("1.0.0", 0, "", b"APK")
        .unwrap_err();
    assert!(matches!(err, OtaError::InvalidUpload { .. }));

    let err = h
        .manager
        .upload_new_version("1.0.0", 24, "", b"")
        .unwrap_err();
    assert!(matches!(err, OtaError::InvalidUpload { .. }));

    // Nothing was stored by the failed attempts.
    assert!(h.manager.registry().get("1.0.0").is_none());
    assert_eq!(h.artifacts.blob_count(), 0);
}

#[test]
fn test_upload_duplicate_returns_existing_build() {
    let h = common::harness();
    let first = h
        .manager
        .upload_new_version("1.0.0", 24, "first", b"APK_v1")
        .unwrap();
    let second = h
        .manager
        .upload_new_version("1.0.0", 26, "ignored", b"APK_other")
        .unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.min_api(), 24);
}

#[test]
fn test_patch_requires_registered_versions() {
    let h = common::harness();
    h.manager
        .upload_new_version("2.0.0", 24, "", b"APK_v2")
        .unwrap();

    let err = h.manager.create_update_patch("0.0.1", "2.0.0").unwrap_err();
    assert!(matches!(err, OtaError::UnknownVersion { .. }));

    let err = h.manager.create_update_patch("2.0.0", "9.9.9").unwrap_err();
    assert!(matches!(err, OtaError::UnknownVersion { .. }));
}

#[test]
fn test_patch_requires_strict_order() {
    let h = common::harness();
    common::seed_two_versions(&h, &["Device-A"]);

    let err = h.manager.create_update_patch("2.0.0", "1.0.0").unwrap_err();
    assert!(matches!(err, OtaError::InvalidPatchOrder { .. }));

    let err = h.manager.create_update_patch("2.0.0", "2.0.0").unwrap_err();
    assert!(matches!(err, OtaError::InvalidPatchOrder { .. }));
}

#[test]
fn test_patch_is_idempotent() {
    let h = common::harness();
    common::seed_two_versions(&h, &["Device-A"]);

    let first = h.manager.create_update_patch("1.0.0", "2.0.0").unwrap();
    let second = h.manager.create_update_patch("1.0.0", "2.0.0").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_release_validation() {
    let h = common::harness();

    let err = h
        .manager
        .release_version("9.9.9", common::whitelist(&["Device-A"]))
        .unwrap_err();
    assert!(matches!(err, OtaError::UnknownVersion { .. }));

    h.manager
        .upload_new_version("1.0.0", 24, "", b"APK_v1")
        .unwrap();
    let err = h
        .manager
        .release_version("1.0.0", common::whitelist(&[]))
        .unwrap_err();
    assert!(matches!(err, OtaError::InvalidPolicy { .. }));
}

#[test]
fn test_re_release_keeps_first_policy() {
    let h = common::harness();
    h.manager
        .upload_new_version("1.0.0", 24, "", b"APK_v1")
        .unwrap();
    h.manager
        .release_version("1.0.0", common::whitelist(&["Device-A"]))
        .unwrap();
    h.manager
        .release_version(
            "1.0.0",
            Arc::new(otaplan::rollout::PercentagePolicy::new(50)),
        )
        .unwrap();

    let policy = h.manager.registry().policy_for("1.0.0").unwrap();
    assert_eq!(policy.name(), "whitelist");
}

#[test]
fn test_stale_plan_is_dropped_without_dispatch() {
    let h = common::harness();
    common::seed_two_versions(&h, &["Device-A"]);

    let device = Device::new("Device-A", "Pixel-7", 34, Some("1.0.0"));
    let plan = h.manager.check_for_updates(&device).unwrap().unwrap();

    // The device moved past the plan's target in the meantime.
    let ahead = Device::new("Device-A", "Pixel-7", 34, Some("3.0.0"));
    h.manager.execute_task(&ahead, &plan).unwrap();

    assert_eq!(ahead.current_version().as_deref(), Some("3.0.0"));
    assert_eq!(h.agent.dispatch_count(), 0);
}

#[test]
fn test_device_at_target_is_a_no_op() {
    let h = common::harness();
    common::seed_two_versions(&h, &["Device-A"]);

    let device = Device::new("Device-A", "Pixel-7", 34, Some("1.0.0"));
    let plan = h.manager.check_for_updates(&device).unwrap().unwrap();

    h.manager.execute_task(&device, &plan).unwrap();
    assert_eq!(h.agent.dispatch_count(), 1);

    // Re-applying the same plan is silently dropped.
    h.manager.execute_task(&device, &plan).unwrap();
    assert_eq!(h.agent.dispatch_count(), 1);
    assert_eq!(device.current_version().as_deref(), Some("2.0.0"));
}

#[test]
fn test_registry_snapshot_serializes() {
    let h = common::harness();
    common::seed_two_versions(&h, &["Device-A"]);

    let snapshot = h.manager.registry().snapshot();
    let json = serde_json::to_value(&snapshot).unwrap();
    let builds = json["builds"].as_array().unwrap();
    assert_eq!(builds.len(), 2);
    assert_eq!(builds[0]["version"], "1.0.0");
    assert_eq!(builds[1]["released"], true);
    assert_eq!(builds[1]["rollout"], "whitelist");
    assert_eq!(builds[1]["patch_sources"][0], "1.0.0");
}
