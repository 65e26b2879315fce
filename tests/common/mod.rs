//! Shared helpers for integration tests

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use otaplan::config::ManagerConfig;
use otaplan::manager::VersionManager;
use otaplan::rollout::{RolloutPolicy, WhitelistPolicy};
use otaplan::store::{ConcatPatchGenerator, InMemoryArtifactStore, RecordingAgent};

/// A manager wired to in-memory collaborators, with direct access to the
/// recording agent and the artifact store for assertions
pub struct Harness {
    pub manager: VersionManager,
    pub agent: Arc<RecordingAgent>,
    pub artifacts: Arc<InMemoryArtifactStore>,
}

pub fn harness() -> Harness {
    harness_with(ManagerConfig::default())
}

pub fn harness_with(config: ManagerConfig) -> Harness {
    let artifacts = Arc::new(InMemoryArtifactStore::new());
    let agent = Arc::new(RecordingAgent::new());
    let manager = VersionManager::with_config(
        artifacts.clone(),
        Arc::new(ConcatPatchGenerator),
        agent.clone(),
        config,
    );
    Harness {
        manager,
        agent,
        artifacts,
    }
}

/// Whitelist policy over the given device ids
pub fn whitelist(ids: &[&str]) -> Arc<dyn RolloutPolicy> {
    Arc::new(WhitelistPolicy::new(ids.iter().copied()))
}

/// Upload 1.0.0 and 2.0.0 (min API 24), patch 1.0.0 -> 2.0.0, release
/// 2.0.0 to the given devices
pub fn seed_two_versions(harness: &Harness, released_to: &[&str]) {
    harness
        .manager
        .upload_new_version("1.0.0", 24, "initial", b"APK_v1")
        .unwrap();
    harness
        .manager
        .upload_new_version("2.0.0", 24, "second", b"APK_v2")
        .unwrap();
    harness
        .manager
        .create_update_patch("1.0.0", "2.0.0")
        .unwrap();
    harness
        .manager
        .release_version("2.0.0", whitelist(released_to))
        .unwrap();
}
