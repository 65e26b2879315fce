//! Patch creation errors

use super::OtaError;

/// Creates an invalid patch order error
pub fn invalid_order(from: impl Into<String>, to: impl Into<String>) -> OtaError {
    OtaError::InvalidPatchOrder {
        from: from.into(),
        to: to.into(),
    }
}
