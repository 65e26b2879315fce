//! Per-device lock table
//!
//! One mutual-exclusion domain per device id. Locks are created lazily on
//! first use and never dropped; the table only grows with the fleet, and
//! devices never reference each other, so there is no lock ordering to
//! get wrong. The `Arc` is cloned out of the map before locking so no
//! map shard guard is held while a device lock is taken.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;

#[derive(Debug, Default)]
pub(crate) struct DeviceLockTable {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl DeviceLockTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// The lock guarding one device's mutation-and-dispatch section
    pub(crate) fn lock_for(&self, device_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(device_id.to_string())
            .or_default()
            .clone()
    }
}
