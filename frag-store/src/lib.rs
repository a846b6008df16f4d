//! # frag-store: fragment persistence primitives
//!
//! `frag-store` defines the narrow storage contract the Fragrs service is
//! layered over: a metadata store and a byte store, addressed by
//! `(owner, id)` pairs. Backends implement [`FragmentStore`]; everything
//! above this crate only ever sees that trait.
//!
//! The crate ships one backend, [`MemoryFragmentStore`], which keeps both
//! stores in process memory. It is the reference implementation used by the
//! test suites and by local development servers.
//!
//! ```rust
//! use frag_store::{FragmentRecord, FragmentStore, MemoryFragmentStore};
//!
//! # #[tokio::main]
//! # async fn main() -> frag_store::StoreResult<()> {
//! let store = MemoryFragmentStore::new();
//!
//! let record = FragmentRecord::new("a1", "owner-1", "text/plain");
//! store.write_fragment(&record).await?;
//! store
//!     .write_fragment_data("owner-1", "a1", bytes::Bytes::from_static(b"hi"))
//!     .await?;
//!
//! assert!(store.read_fragment("owner-1", "a1").await?.is_some());
//! # Ok(())
//! # }
//! ```

mod error;
mod memory;
mod record;
mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryFragmentStore;
pub use record::FragmentRecord;
pub use store::FragmentStore;
