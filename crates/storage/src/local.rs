//! Filesystem-backed object store.
//!
//! Objects live under a single root directory, one file per object named by
//! its key, with the content type recorded in a `<key>.content-type`
//! sidecar file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::{ObjectStore, StorageError, StoredObject, DEFAULT_CONTENT_TYPE};

pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn object_path(&self, id: &str) -> Result<PathBuf, StorageError> {
        // Keys are entity ids; anything that could escape the root is not
        // a valid key.
        if id.is_empty() || id.contains('/') || id.contains('\\') || id.contains("..") {
            return Err(StorageError::InvalidKey(id.to_string()));
        }
        Ok(self.root.join(id))
    }

    fn sidecar_path(path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_owned();
        name.push(".content-type");
        PathBuf::from(name)
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn fetch(&self, id: &str) -> Result<StoredObject, StorageError> {
        let path = self.object_path(id)?;
        let content = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Err(StorageError::NotFound),
            Err(err) => return Err(err.into()),
        };

        let content_type = match tokio::fs::read_to_string(Self::sidecar_path(&path)).await {
            Ok(recorded) => recorded.trim().to_string(),
            Err(err) if err.kind() == ErrorKind::NotFound => DEFAULT_CONTENT_TYPE.to_string(),
            Err(err) => return Err(err.into()),
        };

        Ok(StoredObject {
            content,
            content_type,
            file_name: id.to_string(),
        })
    }

    async fn store(
        &self,
        id: &str,
        content: &[u8],
        content_type: &str,
    ) -> Result<(), StorageError> {
        let path = self.object_path(id)?;
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(&path, content).await?;
        tokio::fs::write(Self::sidecar_path(&path), content_type).await?;
        tracing::debug!(id, bytes = content.len(), "stored object");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_then_fetch_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalObjectStore::new(dir.path());

        store.store("asset-1", b"png bytes", "image/png").await.unwrap();

        let object = store.fetch("asset-1").await.unwrap();
        assert_eq!(object.content, b"png bytes");
        assert_eq!(object.content_type, "image/png");
        assert_eq!(object.file_name, "asset-1");
    }

    #[tokio::test]
    async fn missing_object_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalObjectStore::new(dir.path());

        let err = store.fetch("absent").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn missing_sidecar_falls_back_to_default_type() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalObjectStore::new(dir.path());

        tokio::fs::write(dir.path().join("bare"), b"data").await.unwrap();

        let object = store.fetch("bare").await.unwrap();
        assert_eq!(object.content_type, DEFAULT_CONTENT_TYPE);
    }

    #[tokio::test]
    async fn traversal_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalObjectStore::new(dir.path());

        let err = store.fetch("../escape").await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }
}
