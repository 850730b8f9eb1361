//! Object-store contract and providers for entity images.
//!
//! Entities are keyed in the store by their own id. Repository reads attach
//! images opportunistically: a missing object means "no image", never a
//! failed read. Only the `fetch`/`store` contract is part of the core; the
//! wire protocol behind it is a provider concern.

pub mod local;
pub mod memory;

pub use local::LocalObjectStore;
pub use memory::MemoryObjectStore;

use async_trait::async_trait;

/// Content type assumed when a provider has no recorded type for an object.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No object is stored under the requested key.
    #[error("object not found")]
    NotFound,

    /// The requested key cannot name an object.
    #[error("invalid object key: {0}")]
    InvalidKey(String),

    #[error("storage I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

/// An object fetched from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub content: Vec<u8>,
    pub content_type: String,
    pub file_name: String,
}

/// Narrow contract over whatever backs image persistence.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Retrieve the object stored under `id`.
    ///
    /// Returns [`StorageError::NotFound`] when nothing is stored there;
    /// callers decide whether that is an error.
    async fn fetch(&self, id: &str) -> Result<StoredObject, StorageError>;

    /// Persist `content` under `id`, replacing any previous object.
    async fn store(&self, id: &str, content: &[u8], content_type: &str)
        -> Result<(), StorageError>;
}
