//! The fragment entity: one stored unit of user content plus its metadata.
//!
//! A `Fragment` is a transient in-memory view; the store owns the persisted
//! representation and the entity is reconstructed on every read. All
//! metadata/payload persistence goes through the [`FragmentStore`]
//! collaborator the entity holds.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use frag_store::{FragmentRecord, FragmentStore, StoreError};
use uuid::Uuid;

use crate::convert::{convert, ConvertOutcome};
use crate::registry::SupportedType;
use crate::{FragmentError, FragmentResult};

/// Construction input for a fragment: what the HTTP layer knows at creation
/// time.
#[derive(Debug, Clone, Default)]
pub struct FragmentDraft {
    pub id: Option<String>,
    pub owner_id: String,
    pub content_type: String,
    pub size: Option<u64>,
}

impl FragmentDraft {
    pub fn new<O: Into<String>, T: Into<String>>(owner_id: O, content_type: T) -> Self {
        Self {
            id: None,
            owner_id: owner_id.into(),
            content_type: content_type.into(),
            size: None,
        }
    }

    pub fn with_id<S: Into<String>>(mut self, id: S) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }
}

/// Listing of an owner's fragments, either as bare ids or fully expanded.
pub enum FragmentListing {
    Ids(Vec<String>),
    Expanded(Vec<Fragment>),
}

pub struct Fragment {
    record: FragmentRecord,
    base: SupportedType,
    store: Arc<dyn FragmentStore>,
}

impl std::fmt::Debug for Fragment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fragment")
            .field("record", &self.record)
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}

impl Fragment {
    /// Validate a draft and produce an in-memory fragment (metadata only, no
    /// payload, nothing persisted yet).
    ///
    /// Fails with `InvalidArgument` when the owner id or type is empty, and
    /// with `UnsupportedType` when the type's base is outside the registry.
    pub fn build(store: Arc<dyn FragmentStore>, draft: FragmentDraft) -> FragmentResult<Self> {
        if draft.owner_id.trim().is_empty() {
            return Err(FragmentError::invalid_argument("owner id is required"));
        }
        if draft.content_type.trim().is_empty() {
            return Err(FragmentError::invalid_argument("content type is required"));
        }
        let Some(base) = SupportedType::from_header(&draft.content_type) else {
            return Err(FragmentError::unsupported_type(&draft.content_type));
        };

        let id = draft.id.unwrap_or_else(|| Uuid::new_v4().to_string());
        let mut record = FragmentRecord::new(id, draft.owner_id, draft.content_type);
        record.size = draft.size.unwrap_or(0);

        Ok(Self {
            record,
            base,
            store,
        })
    }

    /// Rehydrate an entity from its persisted record, re-running the type
    /// validation the record passed at creation.
    fn from_record(store: Arc<dyn FragmentStore>, record: FragmentRecord) -> FragmentResult<Self> {
        let Some(base) = SupportedType::from_header(&record.content_type) else {
            return Err(FragmentError::unsupported_type(&record.content_type));
        };
        Ok(Self {
            record,
            base,
            store,
        })
    }

    /// List an owner's fragments in storage iteration order: bare ids, or
    /// full entities when `expand` is set.
    pub async fn by_user(
        store: &Arc<dyn FragmentStore>,
        owner_id: &str,
        expand: bool,
    ) -> FragmentResult<FragmentListing> {
        let records = store
            .list_fragments(owner_id)
            .await
            .map_err(|source| FragmentError::persistence("list_fragments", source))?;

        if expand {
            let fragments = records
                .into_iter()
                .map(|record| Self::from_record(Arc::clone(store), record))
                .collect::<FragmentResult<Vec<_>>>()?;
            Ok(FragmentListing::Expanded(fragments))
        } else {
            Ok(FragmentListing::Ids(
                records.into_iter().map(|record| record.id).collect(),
            ))
        }
    }

    /// Load one fragment's metadata. Absence is `Ok(None)`, not an error.
    pub async fn by_id(
        store: &Arc<dyn FragmentStore>,
        owner_id: &str,
        id: &str,
    ) -> FragmentResult<Option<Self>> {
        let record = store
            .read_fragment(owner_id, id)
            .await
            .map_err(|source| FragmentError::persistence("read_fragment", source))?;
        record
            .map(|record| Self::from_record(Arc::clone(store), record))
            .transpose()
    }

    /// Remove a fragment's metadata and payload. Fails with `NotFound` when
    /// no such fragment exists for the owner.
    pub async fn delete(
        store: &Arc<dyn FragmentStore>,
        owner_id: &str,
        id: &str,
    ) -> FragmentResult<()> {
        store
            .delete_fragment(owner_id, id)
            .await
            .map_err(|source| match source {
                StoreError::NotFound { id } => FragmentError::not_found(id),
                other => FragmentError::persistence("delete_fragment", other),
            })
    }

    /// Refresh `updated` and persist the current metadata.
    pub async fn save(&mut self) -> FragmentResult<()> {
        self.record.updated = Utc::now();
        self.store
            .write_fragment(&self.record)
            .await
            .map_err(|source| FragmentError::persistence("write_fragment", source))
    }

    /// Attach payload bytes: update `size`, persist the payload, then the
    /// metadata.
    ///
    /// Payload goes first so metadata stays the sole "fragment exists"
    /// signal; a failure between the two steps never produces a listed
    /// fragment whose size disagrees with a missing payload.
    pub async fn set_data(&mut self, data: Bytes) -> FragmentResult<()> {
        self.record.size = data.len() as u64;
        self.store
            .write_fragment_data(&self.record.owner_id, &self.record.id, data)
            .await
            .map_err(|source| FragmentError::persistence("write_fragment_data", source))?;
        self.save().await
    }

    /// Read this fragment's payload. Absence is `Ok(None)`, distinct from a
    /// backend failure.
    pub async fn get_data(&self) -> FragmentResult<Option<Bytes>> {
        self.store
            .read_fragment_data(&self.record.owner_id, &self.record.id)
            .await
            .map_err(|source| FragmentError::persistence("read_fragment_data", source))
    }

    /// Convert this fragment's payload into the type `extension` requests.
    pub fn convert_to(&self, data: &[u8], extension: &str) -> FragmentResult<ConvertOutcome> {
        convert(self.base, data, extension)
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn owner_id(&self) -> &str {
        &self.record.owner_id
    }

    /// The declared type, verbatim, parameters included.
    pub fn content_type(&self) -> &str {
        &self.record.content_type
    }

    /// The base media type, parameters stripped:
    /// `text/html; charset=utf-8` → `text/html`.
    pub fn mime_type(&self) -> &'static str {
        self.base.as_mime()
    }

    pub fn base_type(&self) -> SupportedType {
        self.base
    }

    /// True when this fragment is a `text/*` type.
    pub fn is_text(&self) -> bool {
        self.base.is_text()
    }

    /// The types this fragment can be requested as.
    pub fn formats(&self) -> &'static [SupportedType] {
        self.base.legal_outputs()
    }

    pub fn size(&self) -> u64 {
        self.record.size
    }

    /// The persisted metadata shape (the exact six keys API clients see).
    pub fn record(&self) -> &FragmentRecord {
        &self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frag_store::MemoryFragmentStore;

    fn store() -> Arc<dyn FragmentStore> {
        Arc::new(MemoryFragmentStore::new())
    }

    #[test]
    fn build_rejects_empty_owner() {
        let err = Fragment::build(store(), FragmentDraft::new("", "text/plain")).unwrap_err();
        assert!(matches!(err, FragmentError::InvalidArgument { .. }));
    }

    #[test]
    fn build_rejects_empty_type() {
        let err = Fragment::build(store(), FragmentDraft::new("u1", "")).unwrap_err();
        assert!(matches!(err, FragmentError::InvalidArgument { .. }));
    }

    #[test]
    fn build_rejects_unsupported_type() {
        let err = Fragment::build(store(), FragmentDraft::new("u1", "audio/mp4")).unwrap_err();
        assert!(matches!(err, FragmentError::UnsupportedType { .. }));
    }

    #[test]
    fn build_generates_an_id_and_defaults_size_to_zero() {
        let fragment =
            Fragment::build(store(), FragmentDraft::new("u1", "text/plain")).unwrap();
        assert!(!fragment.id().is_empty());
        assert_eq!(fragment.size(), 0);
        assert_eq!(fragment.record().created, fragment.record().updated);
    }

    #[test]
    fn declared_type_is_stored_verbatim_and_base_is_derived() {
        let fragment = Fragment::build(
            store(),
            FragmentDraft::new("u1", "text/html; charset=utf-8"),
        )
        .unwrap();
        assert_eq!(fragment.content_type(), "text/html; charset=utf-8");
        assert_eq!(fragment.mime_type(), "text/html");
        assert!(fragment.is_text());
    }

    #[test]
    fn formats_always_contains_the_own_mime_type() {
        let fragment =
            Fragment::build(store(), FragmentDraft::new("u1", "application/json")).unwrap();
        assert!(fragment.formats().contains(&fragment.base_type()));
    }

    #[tokio::test]
    async fn set_data_updates_size_and_round_trips() {
        let store = store();
        let mut fragment =
            Fragment::build(Arc::clone(&store), FragmentDraft::new("u1", "text/plain")).unwrap();
        fragment.set_data(Bytes::from_static(b"aa")).await.unwrap();
        assert_eq!(fragment.size(), 2);

        let loaded = Fragment::by_id(&store, "u1", fragment.id())
            .await
            .unwrap()
            .expect("fragment must exist after set_data");
        assert_eq!(loaded.size(), 2);
        assert_eq!(
            loaded.get_data().await.unwrap(),
            Some(Bytes::from_static(b"aa"))
        );
    }

    #[tokio::test]
    async fn by_id_is_idempotent_across_reads() {
        let store = store();
        let mut fragment =
            Fragment::build(Arc::clone(&store), FragmentDraft::new("u1", "text/plain")).unwrap();
        fragment.set_data(Bytes::from_static(b"hello")).await.unwrap();

        let first = Fragment::by_id(&store, "u1", fragment.id()).await.unwrap().unwrap();
        let second = Fragment::by_id(&store, "u1", fragment.id()).await.unwrap().unwrap();
        assert_eq!(first.record(), second.record());
    }

    #[tokio::test]
    async fn by_id_returns_none_for_unknown_id() {
        let store = store();
        assert!(Fragment::by_id(&store, "u1", "missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn by_user_lists_ids_or_expanded_records() {
        let store = store();
        let mut first =
            Fragment::build(Arc::clone(&store), FragmentDraft::new("u1", "text/plain")).unwrap();
        first.set_data(Bytes::from_static(b"one")).await.unwrap();
        let mut second =
            Fragment::build(Arc::clone(&store), FragmentDraft::new("u1", "text/markdown")).unwrap();
        second.set_data(Bytes::from_static(b"two")).await.unwrap();

        let FragmentListing::Ids(ids) = Fragment::by_user(&store, "u1", false).await.unwrap()
        else {
            panic!("expected ids");
        };
        assert_eq!(ids, vec![first.id().to_string(), second.id().to_string()]);

        let FragmentListing::Expanded(fragments) =
            Fragment::by_user(&store, "u1", true).await.unwrap()
        else {
            panic!("expected expanded fragments");
        };
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].record(), first.record());
        assert_eq!(fragments[1].record(), second.record());
    }

    #[tokio::test]
    async fn delete_removes_both_stores_and_is_then_not_found() {
        let store = store();
        let mut fragment =
            Fragment::build(Arc::clone(&store), FragmentDraft::new("u1", "text/plain")).unwrap();
        fragment.set_data(Bytes::from_static(b"gone")).await.unwrap();
        let id = fragment.id().to_string();

        Fragment::delete(&store, "u1", &id).await.unwrap();

        assert!(Fragment::by_id(&store, "u1", &id).await.unwrap().is_none());
        let FragmentListing::Ids(ids) = Fragment::by_user(&store, "u1", false).await.unwrap()
        else {
            panic!("expected ids");
        };
        assert!(ids.is_empty());

        let err = Fragment::delete(&store, "u1", &id).await.unwrap_err();
        assert!(matches!(err, FragmentError::NotFound { .. }));
    }

    #[tokio::test]
    async fn markdown_fragment_converts_to_html() {
        let store = store();
        let mut fragment =
            Fragment::build(Arc::clone(&store), FragmentDraft::new("u1", "text/markdown")).unwrap();
        fragment.set_data(Bytes::from_static(b"# Title")).await.unwrap();
        assert_eq!(fragment.size(), 7);

        let data = fragment.get_data().await.unwrap().unwrap();
        let outcome = fragment.convert_to(&data, ".html").unwrap();
        let ConvertOutcome::Converted { data, content_type } = outcome else {
            panic!("markdown -> html must convert");
        };
        assert_eq!(content_type, SupportedType::TextHtml);
        assert!(String::from_utf8(data.to_vec()).unwrap().contains("<h1>Title</h1>"));
    }

    #[tokio::test]
    async fn plain_fragment_cannot_become_png() {
        let store = store();
        let fragment =
            Fragment::build(Arc::clone(&store), FragmentDraft::new("u1", "text/plain")).unwrap();
        let outcome = fragment.convert_to(b"hello", ".png").unwrap();
        assert_eq!(outcome, ConvertOutcome::Unsupported);
    }
}
