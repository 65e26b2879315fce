//! Patch generator trait and naive implementation

use crate::error::{Result, empty_payload};

/// Byte-level delta producer between two artifacts.
///
/// The payload content is opaque to the core; the only contract is a
/// non-empty output for non-empty inputs.
pub trait PatchGenerator: Send + Sync {
    fn diff(&self, from: &[u8], to: &[u8]) -> Result<Vec<u8>>;
}

/// Magic bytes prefixed to every generated patch pack
pub const PATCH_MAGIC: &[u8; 4] = b"DIFF";

/// Placeholder generator: a `DIFF` header followed by both payloads.
///
/// Real binary diffing is out of scope; this keeps the payloads flowing
/// end to end with a recognizable shape.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConcatPatchGenerator;

impl PatchGenerator for ConcatPatchGenerator {
    fn diff(&self, from: &[u8], to: &[u8]) -> Result<Vec<u8>> {
        if from.is_empty() || to.is_empty() {
            return Err(empty_payload("patch input"));
        }

        let mut pack = Vec::with_capacity(PATCH_MAGIC.len() + from.len() + to.len());
        pack.extend_from_slice(PATCH_MAGIC);
        pack.extend_from_slice(from);
        pack.extend_from_slice(to);
        Ok(pack)
    }
}
