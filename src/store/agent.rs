//! Device agent trait and recording implementation
//!
//! The recording agent lives in non-test code so that integration tests
//! (and callers embedding the crate) can observe exactly which dispatches
//! reached the device side, mirroring how the rest of the collaborators
//! ship with in-memory reference implementations.

use parking_lot::Mutex;
use tracing::info;

use super::Handle;
use crate::domain::PlanKind;
use crate::error::Result;

/// On-device installer boundary.
///
/// Fire-and-forget from the core's perspective; failures surface to the
/// caller of the operation that dispatched, and the core does not retry.
pub trait DeviceAgent: Send + Sync {
    /// Install the full artifact on the device
    fn install_full(&self, device_id: &str, artifact: &Handle) -> Result<()>;

    /// Apply a delta patch to the device's current install
    fn apply_delta(&self, device_id: &str, patch: &Handle) -> Result<()>;
}

/// One dispatch observed by a [`RecordingAgent`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub device_id: String,
    pub kind: PlanKind,
    pub payload: Handle,
}

/// Agent double that records every dispatch it receives
#[derive(Debug, Default)]
pub struct RecordingAgent {
    dispatches: Mutex<Vec<Dispatch>>,
}

impl RecordingAgent {
    pub fn new() -> Self {
        Self::default()
    }

    /// All dispatches so far, in arrival order
    pub fn dispatches(&self) -> Vec<Dispatch> {
        self.dispatches.lock().clone()
    }

    pub fn dispatch_count(&self) -> usize {
        self.dispatches.lock().len()
    }

    /// Dispatches that targeted one device
    pub fn dispatches_for(&self, device_id: &str) -> Vec<Dispatch> {
        self.dispatches
            .lock()
            .iter()
            .filter(|d| d.device_id == device_id)
            .cloned()
            .collect()
    }

    fn record(&self, device_id: &str, kind: PlanKind, payload: &Handle) {
        info!(device = device_id, %kind, %payload, "dispatching to device agent");
        self.dispatches.lock().push(Dispatch {
            device_id: device_id.to_string(),
            kind,
            payload: payload.clone(),
        });
    }
}

impl DeviceAgent for RecordingAgent {
    fn install_full(&self, device_id: &str, artifact: &Handle) -> Result<()> {
        self.record(device_id, PlanKind::Install, artifact);
        Ok(())
    }

    fn apply_delta(&self, device_id: &str, patch: &Handle) -> Result<()> {
        self.record(device_id, PlanKind::Update, patch);
        Ok(())
    }
}
