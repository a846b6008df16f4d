use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use crate::{FragmentRecord, FragmentStore, StoreError, StoreResult};

/// Per-owner slice of the two in-memory stores.
///
/// `order` tracks first-metadata-write order so listings come back in
/// insertion order. Payload writes are accepted for ids that have no
/// metadata yet; such orphans are invisible to listings.
#[derive(Debug, Default)]
struct OwnerBucket {
    order: Vec<String>,
    metadata: HashMap<String, FragmentRecord>,
    data: HashMap<String, Bytes>,
}

/// In-memory reference backend.
///
/// A single `RwLock` over the owner map is the only concurrency control;
/// there is no cross-request locking per fragment. Useful for tests and
/// local development, not for multi-process deployments.
#[derive(Debug, Default)]
pub struct MemoryFragmentStore {
    owners: RwLock<HashMap<String, OwnerBucket>>,
}

impl MemoryFragmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FragmentStore for MemoryFragmentStore {
    async fn write_fragment(&self, record: &FragmentRecord) -> StoreResult<()> {
        let mut owners = self.owners.write().await;
        let bucket = owners.entry(record.owner_id.clone()).or_default();
        if !bucket.metadata.contains_key(&record.id) {
            bucket.order.push(record.id.clone());
        }
        bucket.metadata.insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn read_fragment(&self, owner_id: &str, id: &str) -> StoreResult<Option<FragmentRecord>> {
        let owners = self.owners.read().await;
        Ok(owners
            .get(owner_id)
            .and_then(|bucket| bucket.metadata.get(id))
            .cloned())
    }

    async fn write_fragment_data(&self, owner_id: &str, id: &str, data: Bytes) -> StoreResult<()> {
        let mut owners = self.owners.write().await;
        let bucket = owners.entry(owner_id.to_string()).or_default();
        bucket.data.insert(id.to_string(), data);
        Ok(())
    }

    async fn read_fragment_data(&self, owner_id: &str, id: &str) -> StoreResult<Option<Bytes>> {
        let owners = self.owners.read().await;
        Ok(owners
            .get(owner_id)
            .and_then(|bucket| bucket.data.get(id))
            .cloned())
    }

    async fn list_fragments(&self, owner_id: &str) -> StoreResult<Vec<FragmentRecord>> {
        let owners = self.owners.read().await;
        let Some(bucket) = owners.get(owner_id) else {
            return Ok(Vec::new());
        };
        Ok(bucket
            .order
            .iter()
            .filter_map(|id| bucket.metadata.get(id))
            .cloned()
            .collect())
    }

    async fn delete_fragment(&self, owner_id: &str, id: &str) -> StoreResult<()> {
        let mut owners = self.owners.write().await;
        let bucket = owners
            .get_mut(owner_id)
            .ok_or_else(|| StoreError::not_found(id))?;
        if bucket.metadata.remove(id).is_none() {
            return Err(StoreError::not_found(id));
        }
        bucket.order.retain(|listed| listed != id);
        bucket.data.remove(id);
        Ok(())
    }
}
