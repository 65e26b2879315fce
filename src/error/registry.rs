//! Version registry errors

use super::OtaError;

/// Creates a duplicate version error
pub fn duplicate_version(version: impl Into<String>) -> OtaError {
    OtaError::DuplicateVersion {
        version: version.into(),
    }
}

/// Creates an unknown version error
pub fn unknown_version(version: impl Into<String>) -> OtaError {
    OtaError::UnknownVersion {
        version: version.into(),
    }
}
