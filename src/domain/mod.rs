//! Domain models for Otaplan
//!
//! This module contains the core business entities: registered builds,
//! fleet devices, and the per-device update decision. These types carry
//! the data-model invariants (immutable build identity, write-once patch
//! map, monotonic device version) but no orchestration logic.

pub mod build;
pub mod device;
pub mod plan;

pub use build::Build;
pub use device::Device;
pub use plan::{PlanKind, UpdatePlan};
