//! Storage layer for the single persisted vector collection.
//!
//! # Architecture
//!
//! - **CollectionStore**: builds, opens and destroys the collection
//! - **VectorIndex**: loaded collection with cosine search
//! - **RetryPolicy**: bounded cleanup retries with backoff
//! - **CollectionValidator**: consistency checks on open
//!
//! # Storage Structure
//!
//! ```text
//! {data_dir}/
//! ├── vector_db/              # The collection
//! │   ├── collection.json     # Metadata (written last)
//! │   └── entries.json        # Chunks + vectors
//! └── vector_db.building/     # Staging, only during a build
//! ```

pub mod collection;
pub mod retry;
pub mod validator;

pub use collection::{
    ChunkLayout, CollectionInfo, CollectionMetadata, CollectionStore, IndexEntry, VectorIndex,
    SCHEMA_VERSION,
};
pub use retry::RetryPolicy;
pub use validator::{CollectionValidator, ValidationReport};
