//! Category models, DTOs, and the category/asset association record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stockroom_core::geo::GeoPoint;
use stockroom_core::types::{EntityId, Timestamp};

use crate::models::status::StatusSummary;

// ---------------------------------------------------------------------------
// Entity structs
// ---------------------------------------------------------------------------

/// Flat scan target for enriched category reads.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct CategoryRow {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub color: Option<String>,
    pub status_id: Option<EntityId>,
    pub status_name: Option<String>,
    pub status_description: Option<String>,
    pub lon: Option<f64>,
    pub lat: Option<f64>,
    pub associated_image_url: Option<String>,
    pub created_by: EntityId,
    pub creator_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_by: EntityId,
    pub updater_name: Option<String>,
    pub updated_at: Timestamp,
    pub sharable_groups: Vec<EntityId>,
}

/// An enriched category as returned to callers.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub color: Option<String>,
    pub status: Option<StatusSummary>,
    pub location: Option<GeoPoint>,
    pub associated_image_url: Option<String>,
    pub created_by: EntityId,
    pub creator_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_by: EntityId,
    pub updater_name: Option<String>,
    pub updated_at: Timestamp,
    pub sharable_groups: Vec<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Vec<u8>>,
}

impl Category {
    pub(crate) fn from_row(row: CategoryRow, image: Option<Vec<u8>>) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            color: row.color,
            status: StatusSummary::from_parts(
                row.status_id,
                row.status_name,
                row.status_description,
            ),
            location: GeoPoint::from_parts(row.lon, row.lat),
            associated_image_url: row.associated_image_url,
            created_by: row.created_by,
            creator_name: row.creator_name,
            created_at: row.created_at,
            updated_by: row.updated_by,
            updater_name: row.updater_name,
            updated_at: row.updated_at,
            sharable_groups: row.sharable_groups,
            image,
        }
    }
}

/// An association row linking a category to an inventory asset, enriched
/// with the linked asset's display fields.
///
/// Associations carry their own audit fields and group set; their
/// visibility is evaluated against that set, never the parent's.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoryItem {
    pub id: EntityId,
    pub category_id: EntityId,
    pub item_id: EntityId,
    pub item_name: Option<String>,
    pub item_description: Option<String>,
    pub item_price: Option<Decimal>,
    pub item_quantity: Option<i32>,
    pub item_location: Option<String>,
    pub created_by: EntityId,
    pub creator_name: String,
    pub created_at: Timestamp,
    pub updated_by: EntityId,
    pub updater_name: String,
    pub updated_at: Timestamp,
    pub sharable_groups: Vec<EntityId>,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating a category.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub description: String,
    pub color: Option<String>,
    /// Status reference: an id or a unique status name.
    pub status: String,
    pub location: Option<GeoPoint>,
    pub created_by: EntityId,
    pub sharable_groups: Vec<EntityId>,
}

/// DTO for a full in-place update of a category.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCategory {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub color: Option<String>,
    pub status: String,
    pub location: Option<GeoPoint>,
    pub updated_by: EntityId,
    pub sharable_groups: Vec<EntityId>,
}
