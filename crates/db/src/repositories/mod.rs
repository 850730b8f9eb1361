//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods that
//! accept `&PgPool` as the first argument. Multi-statement writes open one
//! explicit transaction; a failed statement propagates its error and the
//! dropped transaction rolls the whole unit back. Visibility-gated queries
//! carry the `$n::UUID = ANY(sharable_groups)` predicate inline, so a
//! forbidden id and a missing id are indistinguishable to callers.

pub mod category_repo;
pub mod favourite_repo;
pub mod inventory_repo;
pub mod maintenance_plan_repo;
pub mod profile_repo;
pub mod report_repo;
pub mod status_repo;
pub mod storage_location_repo;

pub use category_repo::CategoryRepo;
pub use favourite_repo::FavouriteRepo;
pub use inventory_repo::InventoryRepo;
pub use maintenance_plan_repo::MaintenancePlanRepo;
pub use profile_repo::ProfileRepo;
pub use report_repo::ReportRepo;
pub use status_repo::StatusRepo;
pub use storage_location_repo::StorageLocationRepo;

use stockroom_core::types::EntityId;
use stockroom_storage::{ObjectStore, StorageError};

use crate::error::RepoResult;

/// Best-effort image lookup for an entity read.
///
/// A missing object is "no image"; any other store failure propagates.
pub(crate) async fn attach_image(
    store: &dyn ObjectStore,
    id: EntityId,
) -> RepoResult<Option<Vec<u8>>> {
    match store.fetch(&id.to_string()).await {
        Ok(object) => Ok(Some(object.content)),
        Err(StorageError::NotFound) => Ok(None),
        Err(err) => Err(err.into()),
    }
}
