use stockroom_core::error::CoreError;
use stockroom_storage::StorageError;

/// Error surface of the repository layer.
///
/// Validation and referenced-entity errors surface as [`CoreError`]; any
/// statement failure inside a transaction unit surfaces as the underlying
/// [`sqlx::Error`] after the unit is rolled back; object-store failures
/// other than the not-found downgrade surface as [`StorageError`].
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("object store error: {0}")]
    Storage(#[from] StorageError),
}

pub type RepoResult<T> = Result<T, RepoError>;
