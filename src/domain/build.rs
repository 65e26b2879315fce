//! Build domain type
//!
//! A `Build` is one registered application version: its identity (the
//! version string, immutable and unique within the registry), the minimum
//! platform API level it supports, its full artifact handle, a released
//! flag, and the map of delta patches leading to it from older versions.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use dashmap::DashMap;

use crate::store::Handle;

/// A registered application version
#[derive(Debug)]
pub struct Build {
    version: String,
    min_api: u32,
    description: String,
    artifact: Handle,
    released: AtomicBool,
    /// source version string -> patch handle, write-once per source
    patches: DashMap<String, Handle>,
}

impl Build {
    /// Create a new unreleased build
    pub fn new(
        version: impl Into<String>,
        min_api: u32,
        description: impl Into<String>,
        artifact: Handle,
    ) -> Self {
        Self {
            version: version.into(),
            min_api,
            description: description.into(),
            artifact,
            released: AtomicBool::new(false),
            patches: DashMap::new(),
        }
    }

    /// The version string identifying this build
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Minimum platform API level required to run this build
    pub fn min_api(&self) -> u32 {
        self.min_api
    }

    /// Human-readable release notes
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Handle of the full installable artifact
    pub fn artifact(&self) -> &Handle {
        &self.artifact
    }

    /// Whether the build has been released under a rollout policy
    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::Acquire)
    }

    pub(crate) fn mark_released(&self) {
        self.released.store(true, Ordering::Release);
    }

    /// Look up the patch handle transforming `from` into this build
    pub fn patch_from(&self, from: &str) -> Option<Handle> {
        self.patches.get(from).map(|entry| entry.value().clone())
    }

    /// Publish a patch from `from` into this build, write-once.
    ///
    /// The first writer wins; a racing caller gets the already-published
    /// handle back and its own handle is discarded.
    pub fn publish_patch(&self, from: impl Into<String>, handle: Handle) -> Handle {
        self.patches.entry(from.into()).or_insert(handle).clone()
    }

    /// Source versions this build has a delta from, in no particular order
    pub fn patch_sources(&self) -> Vec<String> {
        self.patches.iter().map(|entry| entry.key().clone()).collect()
    }
}

impl fmt::Display for Build {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Build {} (min API {}, released: {})",
            self.version,
            self.min_api,
            self.is_released()
        )
    }
}
