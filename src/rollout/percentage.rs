//! Percentage rollout policy

use super::RolloutPolicy;
use crate::domain::Device;

/// Deterministic percentage rollout.
///
/// Each device id hashes to a stable bucket in `0..100`; a device is
/// eligible when its bucket falls below the configured percentage. The
/// same device always lands in the same bucket, so widening the rollout
/// from 10% to 50% keeps the original 10% included.
#[derive(Debug, Clone, Copy)]
pub struct PercentagePolicy {
    percent: u8,
}

impl PercentagePolicy {
    /// Create a policy exposing roughly `percent` of the fleet (clamped to 100)
    pub fn new(percent: u8) -> Self {
        Self {
            percent: percent.min(100),
        }
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    fn bucket(device_id: &str) -> u8 {
        let digest = blake3::hash(device_id.as_bytes());
        // First digest byte scaled into 0..100
        (u16::from(digest.as_bytes()[0]) * 100 / 256) as u8
    }
}

impl RolloutPolicy for PercentagePolicy {
    fn is_eligible(&self, device: &Device) -> bool {
        Self::bucket(device.id()) < self.percent
    }

    fn name(&self) -> &str {
        "percentage"
    }

    fn admits_any(&self) -> bool {
        self.percent > 0
    }
}
