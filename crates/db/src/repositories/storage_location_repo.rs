//! Repository for the storage-location lookup dimension.
//!
//! Locations are deduplicated by reference, not by value: resolving the
//! same text twice without holding the id yields two rows.

use sqlx::PgPool;
use stockroom_core::types::EntityId;
use uuid::Uuid;

use crate::models::storage_location::StorageLocation;

/// Column list for `storage_locations` queries.
const STORAGE_LOCATION_COLUMNS: &str = "id, location, created_by, created_at, updated_at";

pub struct StorageLocationRepo;

impl StorageLocationRepo {
    /// Find a storage location by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: EntityId,
    ) -> Result<Option<StorageLocation>, sqlx::Error> {
        let query = format!("SELECT {STORAGE_LOCATION_COLUMNS} FROM storage_locations WHERE id = $1");
        sqlx::query_as::<_, StorageLocation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new canonical location row. Exactly one row per call.
    pub async fn create(
        pool: &PgPool,
        location: &str,
        created_by: EntityId,
    ) -> Result<StorageLocation, sqlx::Error> {
        let query = format!(
            "INSERT INTO storage_locations (location, created_by) VALUES ($1, $2) \
             RETURNING {STORAGE_LOCATION_COLUMNS}"
        );
        sqlx::query_as::<_, StorageLocation>(&query)
            .bind(location)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Resolve raw caller input to a storage-location id and its canonical
    /// string.
    ///
    /// Input that parses as the id of an existing row reuses that row;
    /// anything else (including a well-formed id with no row behind it)
    /// takes the create branch. Runs on the pool, outside any enclosing
    /// transaction, so a crash in the caller can leave an unreferenced
    /// location row behind.
    pub async fn resolve(
        pool: &PgPool,
        raw_location: &str,
        owner: EntityId,
    ) -> Result<(EntityId, String), sqlx::Error> {
        if let Ok(id) = Uuid::parse_str(raw_location.trim()) {
            if let Some(existing) = Self::find_by_id(pool, id).await? {
                return Ok((existing.id, existing.location));
            }
        }

        let created = Self::create(pool, raw_location, owner).await?;
        tracing::debug!(id = %created.id, "created storage location");
        Ok((created.id, created.location))
    }

    /// List all storage locations.
    pub async fn list(pool: &PgPool) -> Result<Vec<StorageLocation>, sqlx::Error> {
        let query =
            format!("SELECT {STORAGE_LOCATION_COLUMNS} FROM storage_locations ORDER BY location");
        sqlx::query_as::<_, StorageLocation>(&query)
            .fetch_all(pool)
            .await
    }
}
