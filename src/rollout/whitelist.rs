//! Whitelist rollout policy

use std::collections::HashSet;

use super::RolloutPolicy;
use crate::domain::Device;

/// Allow-by-whitelist policy over explicit device ids.
///
/// The id set is copied defensively at construction. An empty set admits
/// nobody and is rejected at release time.
#[derive(Debug, Clone)]
pub struct WhitelistPolicy {
    device_ids: HashSet<String>,
}

impl WhitelistPolicy {
    pub fn new<I, S>(device_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            device_ids: device_ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of whitelisted devices
    pub fn len(&self) -> usize {
        self.device_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.device_ids.is_empty()
    }
}

impl RolloutPolicy for WhitelistPolicy {
    fn is_eligible(&self, device: &Device) -> bool {
        self.device_ids.contains(device.id())
    }

    fn name(&self) -> &str {
        "whitelist"
    }

    fn admits_any(&self) -> bool {
        !self.is_empty()
    }
}
