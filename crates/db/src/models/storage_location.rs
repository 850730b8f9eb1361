//! Storage location lookup rows.

use serde::Serialize;
use sqlx::FromRow;
use stockroom_core::types::{EntityId, Timestamp};

/// A row from the `storage_locations` lookup table.
///
/// Shared by reference across inventory rows; never access-gated.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StorageLocation {
    pub id: EntityId,
    pub location: String,
    pub created_by: Option<EntityId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
