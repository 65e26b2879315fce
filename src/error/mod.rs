//! Error types and handling for Otaplan
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`upload`]: Build upload validation errors
//! - [`registry`]: Version registry errors
//! - [`patch`]: Patch creation errors
//! - [`release`]: Release/rollout errors
//! - [`store`]: Artifact store errors
//!
//! Every operation that can fail reports loudly through [`Result`]; no
//! operation returns a silent sentinel. A stale plan application is a
//! no-op, never an error (see `VersionManager::execute_task`).

pub mod patch;
pub mod registry;
pub mod release;
pub mod store;
pub mod upload;

pub use patch::invalid_order as invalid_patch_order;
pub use registry::{duplicate_version, unknown_version};
pub use release::invalid_policy;
pub use store::{empty_payload, unknown_handle};
pub use upload::invalid as invalid_upload;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Otaplan operations
#[derive(Error, Diagnostic, Debug)]
pub enum OtaError {
    // Upload errors
    #[error("Invalid upload: {reason}")]
    #[diagnostic(
        code(otaplan::upload::invalid),
        help("Uploads need a non-empty version string, a positive minimum API level and a non-empty artifact")
    )]
    InvalidUpload { reason: String },

    // Registry errors
    #[error("Version '{version}' is already registered")]
    #[diagnostic(code(otaplan::registry::duplicate_version))]
    DuplicateVersion { version: String },

    #[error("Unknown version: {version}")]
    #[diagnostic(
        code(otaplan::registry::unknown_version),
        help("Upload the build before referencing it in patch, release or check operations")
    )]
    UnknownVersion { version: String },

    // Patch errors
    #[error("Invalid patch order: '{from}' must be strictly lower than '{to}'")]
    #[diagnostic(
        code(otaplan::patch::invalid_order),
        help("Patches transform an older build into a newer one; swap the endpoints")
    )]
    InvalidPatchOrder { from: String, to: String },

    // Release errors
    #[error("Rollout policy '{name}' admits no device")]
    #[diagnostic(
        code(otaplan::release::invalid_policy),
        help("Releasing under a policy nobody can match is always a mistake; widen the policy first")
    )]
    InvalidPolicy { name: String },

    // Artifact store errors
    #[error("Refusing to store an empty {kind} payload")]
    #[diagnostic(code(otaplan::store::empty_payload))]
    EmptyPayload { kind: String },

    #[error("No payload stored under handle '{handle}'")]
    #[diagnostic(
        code(otaplan::store::unknown_handle),
        help("Handles are only valid against the store that issued them")
    )]
    UnknownHandle { handle: String },

    // Configuration errors
    #[error("Failed to parse configuration: {reason}")]
    #[diagnostic(code(otaplan::config::parse_failed))]
    ConfigParseFailed { reason: String },
}

impl From<serde_yaml::Error> for OtaError {
    fn from(err: serde_yaml::Error) -> Self {
        OtaError::ConfigParseFailed {
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, OtaError>;
