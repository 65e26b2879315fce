//! Version registry: known builds and their release status
//!
//! The registry is the single shared structure behind upload, patch and
//! release operations. All mutations are linearizable at the level of a
//! single key through `DashMap`'s entry API (insert-if-absent), so racing
//! callers never lose updates; the first writer wins and later writers
//! observe the winner.
//!
//! The registry is constructed once per process and injected into the
//! orchestrator; there is no implicit static state.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde::Serialize;
use tracing::{debug, info};

use crate::domain::Build;
use crate::error::{Result, duplicate_version, invalid_policy, unknown_version};
use crate::rollout::RolloutPolicy;
use crate::version::cmp_version_strs;

/// In-memory registry of builds and their rollout policies
#[derive(Default)]
pub struct VersionRegistry {
    /// version string -> build
    builds: DashMap<String, Arc<Build>>,
    /// version string -> rollout policy, present only for released builds
    releases: DashMap<String, Arc<dyn RolloutPolicy>>,
}

impl VersionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a build, keeping any already-registered build for the
    /// same version.
    ///
    /// Idempotent: racing callers all receive the one stored build.
    pub fn register(&self, build: Build) -> Arc<Build> {
        let version = build.version().to_string();
        let stored = self
            .builds
            .entry(version)
            .or_insert_with(|| Arc::new(build))
            .clone();
        debug!(version = stored.version(), "build registered");
        stored
    }

    /// Register a build, failing with `DuplicateVersion` if the version
    /// string is already taken.
    pub fn register_new(&self, build: Build) -> Result<Arc<Build>> {
        let version = build.version().to_string();
        match self.builds.entry(version) {
            Entry::Occupied(occupied) => Err(duplicate_version(occupied.key().clone())),
            Entry::Vacant(vacant) => Ok(vacant.insert(Arc::new(build)).clone()),
        }
    }

    /// Look up a build; absence is not an error at this layer
    pub fn get(&self, version: &str) -> Option<Arc<Build>> {
        self.builds.get(version).map(|entry| entry.value().clone())
    }

    /// Mark a build released under `policy`, publish-once.
    ///
    /// Fails with `UnknownVersion` for unregistered versions and
    /// `InvalidPolicy` for a policy that admits no device. Re-releasing
    /// an already-released version is a no-op; the first policy wins and
    /// is never replaced.
    pub fn release(&self, version: &str, policy: Arc<dyn RolloutPolicy>) -> Result<()> {
        let build = self.get(version).ok_or_else(|| unknown_version(version))?;
        if !policy.admits_any() {
            return Err(invalid_policy(policy.name()));
        }

        match self.releases.entry(version.to_string()) {
            Entry::Occupied(_) => {
                debug!(version, "already released; keeping the original policy");
            }
            Entry::Vacant(vacant) => {
                info!(version, policy = policy.name(), "build released");
                vacant.insert(policy);
            }
        }
        build.mark_released();
        Ok(())
    }

    /// Whether a version has been released
    pub fn is_released(&self, version: &str) -> bool {
        self.releases.contains_key(version)
    }

    /// The rollout policy a version was released under, if released
    pub fn policy_for(&self, version: &str) -> Option<Arc<dyn RolloutPolicy>> {
        self.releases.get(version).map(|entry| entry.value().clone())
    }

    /// Released version strings, ascending by version order
    pub fn released_sorted(&self) -> Vec<String> {
        let mut versions: Vec<String> = self
            .releases
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        versions.sort_by(|a, b| cmp_version_strs(a, b));
        versions
    }

    /// Serializable summary of the registry's current state
    pub fn snapshot(&self) -> RegistrySnapshot {
        let mut builds: Vec<BuildSummary> = self
            .builds
            .iter()
            .map(|entry| {
                let build = entry.value();
                let mut patch_sources = build.patch_sources();
                patch_sources.sort_by(|a, b| cmp_version_strs(a, b));
                BuildSummary {
                    version: build.version().to_string(),
                    min_api: build.min_api(),
                    released: build.is_released(),
                    rollout: self
                        .policy_for(build.version())
                        .map(|p| p.name().to_string()),
                    patch_sources,
                }
            })
            .collect();
        builds.sort_by(|a, b| cmp_version_strs(&a.version, &b.version));
        RegistrySnapshot { builds }
    }
}

/// Point-in-time summary of the registry, for inspection and export
#[derive(Debug, Clone, Serialize)]
pub struct RegistrySnapshot {
    pub builds: Vec<BuildSummary>,
}

/// Summary of one registered build
#[derive(Debug, Clone, Serialize)]
pub struct BuildSummary {
    pub version: String,
    pub min_api: u32,
    pub released: bool,
    /// Name of the rollout policy, for released builds
    pub rollout: Option<String>,
    /// Source versions this build has a patch from, ascending
    pub patch_sources: Vec<String>,
}
