use async_trait::async_trait;
use bytes::Bytes;

use crate::{FragmentRecord, StoreResult};

/// Core storage operations - must be implemented by all storage backends.
///
/// Metadata and payload live in two logically separate stores keyed by
/// `(owner_id, id)`. Absent entries are `Ok(None)`, never errors; only
/// [`delete_fragment`](FragmentStore::delete_fragment) reifies absence as
/// [`StoreError::NotFound`](crate::StoreError::NotFound), because it has no
/// useful "absent" return value.
///
/// Backends own their concurrency discipline. The trait makes no ordering
/// guarantee between concurrent writes to different fragments.
#[async_trait]
pub trait FragmentStore: Send + Sync {
    /// Insert or replace a fragment's metadata.
    async fn write_fragment(&self, record: &FragmentRecord) -> StoreResult<()>;

    /// Read a fragment's metadata.
    async fn read_fragment(&self, owner_id: &str, id: &str) -> StoreResult<Option<FragmentRecord>>;

    /// Insert or replace a fragment's payload bytes.
    async fn write_fragment_data(&self, owner_id: &str, id: &str, data: Bytes) -> StoreResult<()>;

    /// Read a fragment's payload bytes.
    async fn read_fragment_data(&self, owner_id: &str, id: &str) -> StoreResult<Option<Bytes>>;

    /// List all fragment metadata for an owner, in insertion order.
    async fn list_fragments(&self, owner_id: &str) -> StoreResult<Vec<FragmentRecord>>;

    /// Remove a fragment's metadata and payload. Fails with `NotFound` if no
    /// metadata exists for the pair; a deleted id never resurfaces.
    async fn delete_fragment(&self, owner_id: &str, id: &str) -> StoreResult<()>;
}
