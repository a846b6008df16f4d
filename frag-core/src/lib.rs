//! # frag-core: fragment domain logic
//!
//! The decision-making core of the Fragrs service: which content types are
//! accepted, which conversions are legal from a given source type, and how a
//! requested output extension resolves to a target type and a conversion
//! action.
//!
//! - [`registry`]: the closed set of supported media types, the conversion
//!   matrix, and the finite transform table. Defined once, consumed by
//!   construction validation, the `formats` derivation, and conversion
//!   legality alike.
//! - [`fragment`]: the [`Fragment`] entity: validation, persistence through
//!   the [`frag_store::FragmentStore`] collaborator, derived type queries.
//! - [`convert`]: the conversion engine producing converted bytes or the
//!   routine [`ConvertOutcome::Unsupported`] outcome.
//!
//! ```rust
//! use std::sync::Arc;
//! use frag_core::{ConvertOutcome, Fragment, FragmentDraft};
//! use frag_store::{FragmentStore, MemoryFragmentStore};
//!
//! # #[tokio::main]
//! # async fn main() -> frag_core::FragmentResult<()> {
//! let store: Arc<dyn FragmentStore> = Arc::new(MemoryFragmentStore::new());
//!
//! let mut fragment = Fragment::build(
//!     Arc::clone(&store),
//!     FragmentDraft::new("owner-1", "text/markdown"),
//! )?;
//! fragment.set_data(bytes::Bytes::from_static(b"# Hi")).await?;
//!
//! let data = fragment.get_data().await?.unwrap();
//! match fragment.convert_to(&data, ".html")? {
//!     ConvertOutcome::Converted { content_type, .. } => {
//!         assert_eq!(content_type.as_mime(), "text/html");
//!     }
//!     ConvertOutcome::Unsupported => unreachable!("markdown renders to html"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod convert;
pub mod error;
pub mod fragment;
pub mod registry;

pub use convert::{convert, ConvertOutcome};
pub use error::{FragmentError, FragmentResult};
pub use fragment::{Fragment, FragmentDraft, FragmentListing};
pub use registry::{
    is_supported_type, legal_outputs, transform_between, SupportedType, Transform,
    SUPPORTED_TYPES,
};
