//! Artifact store errors

use super::OtaError;

/// Creates an empty payload error
pub fn empty_payload(kind: impl Into<String>) -> OtaError {
    OtaError::EmptyPayload { kind: kind.into() }
}

/// Creates an unknown handle error
pub fn unknown_handle(handle: impl Into<String>) -> OtaError {
    OtaError::UnknownHandle {
        handle: handle.into(),
    }
}
