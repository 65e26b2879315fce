//! Artifact store trait and in-memory implementation

use dashmap::DashMap;
use tracing::debug;

use super::{Handle, PayloadKind};
use crate::error::{Result, empty_payload, unknown_handle};

/// Opaque blob store accepting bytes and returning retrieval handles
pub trait ArtifactStore: Send + Sync {
    /// Store a payload and return its handle; empty input is rejected
    fn store(&self, bytes: &[u8], kind: PayloadKind) -> Result<Handle>;

    /// Retrieve a payload by handle
    fn fetch(&self, handle: &Handle) -> Result<Vec<u8>>;
}

/// In-memory, content-addressed artifact store.
///
/// Handles are `<kind>:blake3:<hex>`, derived from the payload itself, so
/// storing the same bytes twice is naturally idempotent and racing
/// writers converge on one handle.
#[derive(Debug, Default)]
pub struct InMemoryArtifactStore {
    blobs: DashMap<Handle, Vec<u8>>,
}

impl InMemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct payloads stored
    pub fn blob_count(&self) -> usize {
        self.blobs.len()
    }
}

impl ArtifactStore for InMemoryArtifactStore {
    fn store(&self, bytes: &[u8], kind: PayloadKind) -> Result<Handle> {
        if bytes.is_empty() {
            return Err(empty_payload(kind.prefix()));
        }

        let digest = blake3::hash(bytes);
        let handle = Handle::new(format!("{}:blake3:{}", kind.prefix(), digest.to_hex()));
        self.blobs
            .entry(handle.clone())
            .or_insert_with(|| bytes.to_vec());
        debug!(handle = %handle, bytes = bytes.len(), "stored payload");
        Ok(handle)
    }

    fn fetch(&self, handle: &Handle) -> Result<Vec<u8>> {
        self.blobs
            .get(handle)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| unknown_handle(handle.as_str()))
    }
}
