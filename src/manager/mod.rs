//! Version manager: the orchestration engine
//!
//! Composes the registry, the rollout policies and the plan resolver, and
//! enforces the concurrency discipline:
//! - registry mutations go through atomic insert-if-absent, never
//!   read-then-write
//! - plan application holds exactly one per-device lock, never a device
//!   lock and a registry structure at the same time
//! - validation failures never partially mutate state

mod locks;

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::{ManagerConfig, MissingPatchPolicy};
use crate::domain::{Build, Device, PlanKind, UpdatePlan};
use crate::error::{Result, invalid_patch_order, invalid_upload, unknown_version};
use crate::registry::VersionRegistry;
use crate::resolver::{DeltaSynthesizer, UpdatePlanResolver};
use crate::rollout::RolloutPolicy;
use crate::store::{ArtifactStore, DeviceAgent, Handle, PatchGenerator, PayloadKind};
use self::locks::DeviceLockTable;

/// Orchestrator for upload, patch, release, check and apply operations
pub struct VersionManager {
    registry: VersionRegistry,
    artifacts: Arc<dyn ArtifactStore>,
    patcher: Arc<dyn PatchGenerator>,
    agent: Arc<dyn DeviceAgent>,
    locks: DeviceLockTable,
    config: ManagerConfig,
}

impl VersionManager {
    /// Create a manager with the default configuration
    pub fn new(
        artifacts: Arc<dyn ArtifactStore>,
        patcher: Arc<dyn PatchGenerator>,
        agent: Arc<dyn DeviceAgent>,
    ) -> Self {
        Self::with_config(artifacts, patcher, agent, ManagerConfig::default())
    }

    pub fn with_config(
        artifacts: Arc<dyn ArtifactStore>,
        patcher: Arc<dyn PatchGenerator>,
        agent: Arc<dyn DeviceAgent>,
        config: ManagerConfig,
    ) -> Self {
        Self {
            registry: VersionRegistry::new(),
            artifacts,
            patcher,
            agent,
            locks: DeviceLockTable::new(),
            config,
        }
    }

    /// The registry owned by this manager
    pub fn registry(&self) -> &VersionRegistry {
        &self.registry
    }

    /// Validate and register a new build.
    ///
    /// Idempotent on the version string: uploading an already-registered
    /// version returns the existing build untouched. Validation failures
    /// leave the registry and the artifact store unchanged.
    pub fn upload_new_version(
        &self,
        version: &str,
        min_api: u32,
        description: &str,
        artifact: &[u8],
    ) -> Result<Arc<Build>> {
        if version.trim().is_empty() {
            return Err(invalid_upload("version string is empty"));
        }
        if min_api == 0 {
            return Err(invalid_upload("minimum API level must be positive"));
        }
        if artifact.is_empty() {
            return Err(invalid_upload(format!("artifact for '{version}' is empty")));
        }

        if let Some(existing) = self.registry.get(version) {
            debug!(version, "version already uploaded; returning existing build");
            return Ok(existing);
        }

        let handle = self.artifacts.store(artifact, PayloadKind::Artifact)?;
        let build = Build::new(version, min_api, description, handle);
        let stored = self.registry.register(build);
        info!(version, min_api, "build uploaded");
        Ok(stored)
    }

    /// Create (or return) the delta patch transforming `from` into `to`.
    ///
    /// Both versions must be registered and `from` must be strictly lower
    /// than `to`. Racing callers converge on one stored handle: the
    /// first published patch wins and losers receive it instead of their
    /// own result.
    pub fn create_update_patch(&self, from: &str, to: &str) -> Result<Handle> {
        let from_build = self.registry.get(from).ok_or_else(|| unknown_version(from))?;
        let to_build = self.registry.get(to).ok_or_else(|| unknown_version(to))?;

        if crate::version::cmp_version_strs(from, to) != std::cmp::Ordering::Less {
            return Err(invalid_patch_order(from, to));
        }

        if let Some(existing) = to_build.patch_from(from) {
            debug!(from, to, "patch already exists");
            return Ok(existing);
        }

        let handle = self.synthesize_patch(&from_build, &to_build)?;
        let winner = to_build.publish_patch(from, handle);
        info!(from, to, handle = %winner, "patch published");
        Ok(winner)
    }

    /// Release a build under `policy` (publish-once, see
    /// [`VersionRegistry::release`])
    pub fn release_version(&self, version: &str, policy: Arc<dyn RolloutPolicy>) -> Result<()> {
        self.registry.release(version, policy)
    }

    /// Whether `version` is released and `device` passes its API gate and
    /// rollout policy
    pub fn is_version_supported(&self, version: &str, device: &Device) -> bool {
        UpdatePlanResolver::new(&self.registry).is_supported(version, device)
    }

    /// Resolve the update decision for `device`.
    ///
    /// Takes no device lock; pure read unless the manager is configured
    /// to synthesize missing patches on demand.
    pub fn check_for_updates(&self, device: &Device) -> Result<Option<UpdatePlan>> {
        let resolver = match self.config.missing_patch {
            MissingPatchPolicy::FullInstall => UpdatePlanResolver::new(&self.registry),
            MissingPatchPolicy::SynthesizeDelta => {
                UpdatePlanResolver::with_synthesizer(&self.registry, self)
            }
        };
        resolver.resolve(device)
    }

    /// Apply a resolved plan to a device under per-device mutual
    /// exclusion.
    ///
    /// The device's version is re-read inside the critical section; a
    /// plan whose target is not strictly newer than the version found
    /// there is stale and silently dropped, so concurrent winners racing
    /// to the same target dispatch at most once. On successful dispatch
    /// the device's version advances to the plan's target.
    pub fn execute_task(&self, device: &Device, plan: &UpdatePlan) -> Result<()> {
        let lock = self.locks.lock_for(device.id());
        let _guard = lock.lock();

        let current = device.current_version();
        if !crate::version::is_newer(plan.target(), current.as_deref()) {
            debug!(
                device = device.id(),
                target = plan.target(),
                current = current.as_deref().unwrap_or("-"),
                "stale plan dropped"
            );
            return Ok(());
        }

        match plan.kind() {
            PlanKind::Install => self.agent.install_full(device.id(), plan.payload())?,
            PlanKind::Update => self.agent.apply_delta(device.id(), plan.payload())?,
        }
        device.set_current_version(plan.target().to_string());
        info!(device = device.id(), version = plan.target(), "device advanced");
        Ok(())
    }

    fn synthesize_patch(&self, from: &Build, to: &Build) -> Result<Handle> {
        let from_bytes = self.artifacts.fetch(from.artifact())?;
        let to_bytes = self.artifacts.fetch(to.artifact())?;
        let pack = self.patcher.diff(&from_bytes, &to_bytes)?;
        self.artifacts.store(&pack, PayloadKind::Patch)
    }
}

impl DeltaSynthesizer for VersionManager {
    fn synthesize(&self, from: &Build, to: &Build) -> Result<Handle> {
        self.synthesize_patch(from, to)
    }
}
