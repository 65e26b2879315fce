//! Device domain type

use std::fmt;

use parking_lot::Mutex;

/// A fleet device known to the control plane.
///
/// Only the currently installed version is mutable, and only the
/// `VersionManager` advances it (monotonically, under the per-device
/// lock). `None` means no app installed yet.
#[derive(Debug)]
pub struct Device {
    id: String,
    model: String,
    api_level: u32,
    current: Mutex<Option<String>>,
}

impl Device {
    /// Create a device snapshot with an optional installed version
    pub fn new(
        id: impl Into<String>,
        model: impl Into<String>,
        api_level: u32,
        current: Option<&str>,
    ) -> Self {
        Self {
            id: id.into(),
            model: model.into(),
            api_level,
            current: Mutex::new(current.map(str::to_string)),
        }
    }

    /// Unique device identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Hardware model, opaque to this core
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Platform API level of the device
    pub fn api_level(&self) -> u32 {
        self.api_level
    }

    /// The currently installed version, if any
    pub fn current_version(&self) -> Option<String> {
        self.current.lock().clone()
    }

    pub(crate) fn set_current_version(&self, version: String) {
        *self.current.lock() = Some(version);
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Device {} ({}, API {}, running {})",
            self.id,
            self.model,
            self.api_level,
            self.current_version().as_deref().unwrap_or("-")
        )
    }
}
