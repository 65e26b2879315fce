//! Update plan value type
//!
//! An `UpdatePlan` is the resolved decision for one device at one point in
//! time: install the target's full artifact, or apply a delta from the
//! device's current version. Plans are immutable values, produced by the
//! resolver and consumed immediately by `VersionManager::execute_task`;
//! they are never persisted.

use std::fmt;

use serde::Serialize;

use crate::store::Handle;

/// Whether the plan installs a full artifact or applies a delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlanKind {
    /// Full install of the target artifact
    Install,
    /// Delta update from the device's current version
    Update,
}

impl fmt::Display for PlanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanKind::Install => write!(f, "INSTALL"),
            PlanKind::Update => write!(f, "UPDATE"),
        }
    }
}

/// The resolved update decision for one device
#[derive(Debug, Clone, Serialize)]
pub struct UpdatePlan {
    kind: PlanKind,
    current: Option<String>,
    target: String,
    payload: Handle,
}

impl UpdatePlan {
    /// Plan a full install of `target`, carrying its artifact handle
    pub fn install(current: Option<String>, target: impl Into<String>, artifact: Handle) -> Self {
        Self {
            kind: PlanKind::Install,
            current,
            target: target.into(),
            payload: artifact,
        }
    }

    /// Plan a delta update from `current` to `target`, carrying the patch handle
    pub fn delta(current: impl Into<String>, target: impl Into<String>, patch: Handle) -> Self {
        Self {
            kind: PlanKind::Update,
            current: Some(current.into()),
            target: target.into(),
            payload: patch,
        }
    }

    pub fn kind(&self) -> PlanKind {
        self.kind
    }

    /// The device's version at resolution time, if any
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// The version this plan moves the device to
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Artifact handle for `Install` plans, patch handle for `Update` plans
    pub fn payload(&self) -> &Handle {
        &self.payload
    }
}

impl fmt::Display for UpdatePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {} via {}",
            self.kind,
            self.current.as_deref().unwrap_or("-"),
            self.target,
            self.payload
        )
    }
}
