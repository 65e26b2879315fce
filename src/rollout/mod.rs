//! Rollout policies gating which devices may receive a released build
//!
//! A policy is a trait object so new variants (region rollout,
//! canary-by-cohort, ...) slot in without touching the resolver. Shipped
//! variants:
//! - [`WhitelistPolicy`]: explicit set of device ids
//! - [`PercentagePolicy`]: deterministic hash-bucket percentage rollout

pub mod percentage;
pub mod whitelist;

pub use percentage::PercentagePolicy;
pub use whitelist::WhitelistPolicy;

use crate::domain::Device;

/// Eligibility predicate over a device
pub trait RolloutPolicy: Send + Sync {
    /// Whether `device` may receive the build released under this policy
    fn is_eligible(&self, device: &Device) -> bool;

    /// Short policy name used in logs and snapshots
    fn name(&self) -> &str;

    /// Whether any device could ever match this policy.
    ///
    /// Releasing under a policy that admits nobody is rejected as
    /// `InvalidPolicy`; an empty whitelist or a 0% rollout has no usable
    /// eligibility rule.
    fn admits_any(&self) -> bool {
        true
    }
}
