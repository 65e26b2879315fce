//! Collaborator boundary: artifact storage, patch generation, device agent
//!
//! This core never performs real I/O, binary diffing or on-device
//! installation; those concerns live behind the traits in this module.
//! The in-memory implementations here are the reference collaborators
//! used by tests and single-process deployments:
//! - [`InMemoryArtifactStore`]: content-addressed blob store
//! - [`ConcatPatchGenerator`]: naive header-plus-concat "diff"
//! - [`RecordingAgent`]: installer double that records every dispatch

pub mod agent;
pub mod artifacts;
pub mod diff;

pub use agent::{DeviceAgent, Dispatch, RecordingAgent};
pub use artifacts::{ArtifactStore, InMemoryArtifactStore};
pub use diff::{ConcatPatchGenerator, PatchGenerator};

use std::fmt;

use serde::Serialize;

/// Opaque retrieval token issued by an [`ArtifactStore`].
///
/// The core never inspects handle structure; equality and cloning are the
/// only operations it relies on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Handle(String);

impl Handle {
    pub(crate) fn new(token: String) -> Self {
        Self(token)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a stored payload is, reflected in the issued handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// Full installable artifact
    Artifact,
    /// Delta patch between two builds
    Patch,
}

impl PayloadKind {
    pub(crate) fn prefix(self) -> &'static str {
        match self {
            PayloadKind::Artifact => "apk",
            PayloadKind::Patch => "patch",
        }
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}
