//! Release and rollout errors

use super::OtaError;

/// Creates an invalid policy error
pub fn invalid_policy(name: impl Into<String>) -> OtaError {
    OtaError::InvalidPolicy { name: name.into() }
}
