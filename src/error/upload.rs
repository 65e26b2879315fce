//! Build upload validation errors

use super::OtaError;

/// Creates an invalid upload error
pub fn invalid(reason: impl Into<String>) -> OtaError {
    OtaError::InvalidUpload {
        reason: reason.into(),
    }
}
