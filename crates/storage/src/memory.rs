//! In-memory object store used by tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{ObjectStore, StorageError, StoredObject};

#[derive(Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, (Vec<u8>, String)>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn fetch(&self, id: &str) -> Result<StoredObject, StorageError> {
        let objects = self.objects.lock().expect("object map lock poisoned");
        let (content, content_type) = objects.get(id).ok_or(StorageError::NotFound)?;
        Ok(StoredObject {
            content: content.clone(),
            content_type: content_type.clone(),
            file_name: id.to_string(),
        })
    }

    async fn store(
        &self,
        id: &str,
        content: &[u8],
        content_type: &str,
    ) -> Result<(), StorageError> {
        let mut objects = self.objects.lock().expect("object map lock poisoned");
        objects.insert(id.to_string(), (content.to_vec(), content_type.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn round_trip_and_replace() {
        let store = MemoryObjectStore::new();

        store.store("k", b"v1", "text/plain").await.unwrap();
        store.store("k", b"v2", "text/plain").await.unwrap();

        let object = store.fetch("k").await.unwrap();
        assert_eq!(object.content, b"v2");
    }

    #[tokio::test]
    async fn empty_store_is_not_found() {
        let store = MemoryObjectStore::new();
        assert!(matches!(
            store.fetch("k").await,
            Err(StorageError::NotFound)
        ));
    }
}
