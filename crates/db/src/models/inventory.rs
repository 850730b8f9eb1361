//! Inventory asset models and DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stockroom_core::types::{EntityId, Timestamp};

use crate::models::status::StatusSummary;

// ---------------------------------------------------------------------------
// Entity structs
// ---------------------------------------------------------------------------

/// Flat scan target for enriched inventory reads.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct InventoryRow {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub status_id: Option<EntityId>,
    pub status_name: Option<String>,
    pub status_description: Option<String>,
    pub barcode: Option<String>,
    pub sku: Option<String>,
    pub color: Option<String>,
    pub quantity: i32,
    pub bought_at: Option<String>,
    pub location: Option<String>,
    pub storage_location_id: Option<EntityId>,
    pub is_returnable: bool,
    pub return_location: Option<String>,
    pub return_datetime: Option<Timestamp>,
    pub return_notes: Option<String>,
    pub min_weight: Option<i32>,
    pub max_weight: Option<i32>,
    pub min_height: Option<i32>,
    pub max_height: Option<i32>,
    pub associated_image_url: Option<String>,
    pub created_by: EntityId,
    pub creator_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_by: EntityId,
    pub updater_name: Option<String>,
    pub updated_at: Timestamp,
    pub sharable_groups: Vec<EntityId>,
}

/// An enriched inventory asset as returned to callers.
#[derive(Debug, Clone, Serialize)]
pub struct Inventory {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub status: Option<StatusSummary>,
    pub barcode: Option<String>,
    pub sku: Option<String>,
    pub color: Option<String>,
    pub quantity: i32,
    pub bought_at: Option<String>,
    /// Canonical location string copied from the resolved storage location.
    pub location: Option<String>,
    pub storage_location_id: Option<EntityId>,
    pub is_returnable: bool,
    pub return_location: Option<String>,
    pub return_datetime: Option<Timestamp>,
    pub return_notes: Option<String>,
    pub min_weight: Option<i32>,
    pub max_weight: Option<i32>,
    pub min_height: Option<i32>,
    pub max_height: Option<i32>,
    pub associated_image_url: Option<String>,
    pub created_by: EntityId,
    pub creator_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_by: EntityId,
    pub updater_name: Option<String>,
    pub updated_at: Timestamp,
    pub sharable_groups: Vec<EntityId>,
    /// Best-effort image payload fetched from the object store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Vec<u8>>,
}

impl Inventory {
    pub(crate) fn from_row(row: InventoryRow, image: Option<Vec<u8>>) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            status: StatusSummary::from_parts(
                row.status_id,
                row.status_name,
                row.status_description,
            ),
            barcode: row.barcode,
            sku: row.sku,
            color: row.color,
            quantity: row.quantity,
            bought_at: row.bought_at,
            location: row.location,
            storage_location_id: row.storage_location_id,
            is_returnable: row.is_returnable,
            return_location: row.return_location,
            return_datetime: row.return_datetime,
            return_notes: row.return_notes,
            min_weight: row.min_weight,
            max_weight: row.max_weight,
            min_height: row.min_height,
            max_height: row.max_height,
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

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating an inventory asset.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInventory {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    /// Status reference: an id or a unique status name.
    pub status: String,
    pub barcode: Option<String>,
    pub sku: Option<String>,
    pub color: Option<String>,
    pub quantity: i32,
    pub bought_at: Option<String>,
    /// Raw location input: an existing storage-location id, or free text
    /// naming a new location.
    pub location: String,
    pub is_returnable: bool,
    pub return_location: Option<String>,
    pub return_datetime: Option<Timestamp>,
    pub return_notes: Option<String>,
    pub min_weight: Option<i32>,
    pub max_weight: Option<i32>,
    pub min_height: Option<i32>,
    pub max_height: Option<i32>,
    pub created_by: EntityId,
    pub sharable_groups: Vec<EntityId>,
}

impl CreateInventory {
    /// Return fields only carry meaning on returnable assets.
    pub(crate) fn scrub_return_fields(&mut self) {
        if !self.is_returnable {
            self.return_location = None;
            self.return_datetime = None;
            self.return_notes = None;
        }
    }
}

/// DTO for a full in-place update of an inventory asset.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateInventory {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub status: String,
    pub barcode: Option<String>,
    pub sku: Option<String>,
    pub color: Option<String>,
    pub quantity: i32,
    pub bought_at: Option<String>,
    pub location: String,
    pub is_returnable: bool,
    pub return_location: Option<String>,
    pub return_datetime: Option<Timestamp>,
    pub return_notes: Option<String>,
    pub min_weight: Option<i32>,
    pub max_weight: Option<i32>,
    pub min_height: Option<i32>,
    pub max_height: Option<i32>,
    pub updated_by: EntityId,
    pub sharable_groups: Vec<EntityId>,
}

impl UpdateInventory {
    pub(crate) fn scrub_return_fields(&mut self) {
        if !self.is_returnable {
            self.return_location = None;
            self.return_datetime = None;
            self.return_notes = None;
        }
    }
}
