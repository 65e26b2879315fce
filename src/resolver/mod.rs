//! Update plan resolution
//!
//! Maps a device snapshot plus the registry's released set to at most one
//! [`UpdatePlan`]. Resolution is a pure read against the registry: it
//! takes no device lock and may race harmlessly with concurrent releases
//! and patch publications; callers get a plan computed from one
//! consistent snapshot, not global sequential consistency.
//!
//! The only exception is the synthesize-on-demand variant, which writes a
//! freshly generated patch handle back into the target build's patch map
//! (write-once, first writer wins).

use std::sync::Arc;

use tracing::debug;

use crate::domain::{Build, Device, UpdatePlan};
use crate::error::Result;
use crate::registry::VersionRegistry;
use crate::store::Handle;
use crate::version::is_newer;

/// Callback used by the synthesize-on-demand variant to produce and store
/// a patch between two registered builds
pub trait DeltaSynthesizer {
    fn synthesize(&self, from: &Build, to: &Build) -> Result<Handle>;
}

/// Pure resolver over a registry snapshot
pub struct UpdatePlanResolver<'a> {
    registry: &'a VersionRegistry,
    synthesizer: Option<&'a dyn DeltaSynthesizer>,
}

impl<'a> UpdatePlanResolver<'a> {
    /// Resolver that falls back to a full install when no precomputed
    /// patch exists for the selected target
    pub fn new(registry: &'a VersionRegistry) -> Self {
        Self {
            registry,
            synthesizer: None,
        }
    }

    /// Resolver that synthesizes a missing patch on the fly
    pub fn with_synthesizer(
        registry: &'a VersionRegistry,
        synthesizer: &'a dyn DeltaSynthesizer,
    ) -> Self {
        Self {
            registry,
            synthesizer: Some(synthesizer),
        }
    }

    /// Whether `version` is released and the device passes both the API
    /// level gate and the rollout policy
    pub fn is_supported(&self, version: &str, device: &Device) -> bool {
        let Some(build) = self.registry.get(version) else {
            return false;
        };
        if !self.registry.is_released(version) {
            return false;
        }
        if device.api_level() < build.min_api() {
            return false;
        }
        self.registry
            .policy_for(version)
            .is_some_and(|policy| policy.is_eligible(device))
    }

    /// Resolve the update decision for `device`, or `None` when the
    /// device is already as new as anything it is eligible for.
    pub fn resolve(&self, device: &Device) -> Result<Option<UpdatePlan>> {
        let released = self.registry.released_sorted();
        if released.is_empty() {
            return Ok(None);
        }

        let current = device.current_version();

        // Ascending scan; the last eligible candidate is the highest
        // version the device may move to.
        let mut target: Option<Arc<Build>> = None;
        for candidate in &released {
            if !is_newer(candidate, current.as_deref()) {
                continue;
            }
            if !self.is_supported(candidate, device) {
                continue;
            }
            target = self.registry.get(candidate);
        }

        let Some(target) = target else {
            debug!(device = device.id(), "no eligible target");
            return Ok(None);
        };

        let plan = match current {
            None => UpdatePlan::install(None, target.version(), target.artifact().clone()),
            Some(current) => self.plan_from(&current, &target)?,
        };
        debug!(device = device.id(), %plan, "resolved update plan");
        Ok(Some(plan))
    }

    /// Decide between a delta and a full install for a device already
    /// running `current`
    fn plan_from(&self, current: &str, target: &Arc<Build>) -> Result<UpdatePlan> {
        if let Some(patch) = target.patch_from(current) {
            return Ok(UpdatePlan::delta(current, target.version(), patch));
        }

        // No precomputed patch. Synthesize one if configured and the
        // current version is a registered build; otherwise fall back to
        // a full install of the target artifact.
        if let Some(synthesizer) = self.synthesizer {
            if let Some(from) = self.registry.get(current) {
                let fresh = synthesizer.synthesize(&from, target)?;
                let winner = target.publish_patch(current, fresh);
                return Ok(UpdatePlan::delta(current, target.version(), winner));
            }
        }

        Ok(UpdatePlan::install(
            Some(current.to_string()),
            target.version(),
            target.artifact().clone(),
        ))
    }
}
