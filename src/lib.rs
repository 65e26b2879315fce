//! Otaplan - update distribution control plane
//!
//! In-memory orchestration core for rolling out application updates to a
//! fleet of devices: a build registry, incremental patches between builds,
//! rollout policies gating exposure, and per-device resolution of whether
//! to install a fresh build or apply a delta.
//!
//! The crate deliberately stops at the collaborator boundary: artifact
//! storage, byte-level diffing and the on-device installer are traits in
//! [`store`], with in-memory implementations suitable for tests and
//! single-process use. Network transport, persistence and device
//! authentication are out of scope.

pub mod config;
pub mod domain;
pub mod error;
pub mod manager;
pub mod registry;
pub mod resolver;
pub mod rollout;
pub mod store;
pub mod version;

pub use config::{ManagerConfig, MissingPatchPolicy};
pub use domain::{Build, Device, PlanKind, UpdatePlan};
pub use error::{OtaError, Result};
pub use manager::VersionManager;
pub use registry::VersionRegistry;
pub use resolver::UpdatePlanResolver;
pub use rollout::{PercentagePolicy, RolloutPolicy, WhitelistPolicy};
pub use store::{ArtifactStore, DeviceAgent, Handle, PatchGenerator, PayloadKind};
