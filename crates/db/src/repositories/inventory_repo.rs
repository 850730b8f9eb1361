//! Repository for inventory assets.
//!
//! Reads are enriched with joined status fields, resolved creator/updater
//! display names, and a best-effort image payload. Listing is scoped to the
//! caller's own created assets; every other read and write is gated on the
//! sharable-groups predicate.

use sqlx::PgPool;
use stockroom_core::access;
use stockroom_core::asset::{self, AssetColumnChange};
use stockroom_core::error::CoreError;
use stockroom_core::types::{EntityId, Timestamp};
use stockroom_storage::ObjectStore;

use crate::error::RepoResult;
use crate::models::inventory::{CreateInventory, Inventory, InventoryRow, UpdateInventory};
use crate::repositories::{attach_image, StatusRepo, StorageLocationRepo};

/// Column list for enriched `inventory` queries.
const INVENTORY_COLUMNS: &str = "\
    inv.id, inv.name, inv.description, inv.price, \
    inv.status AS status_id, s.name AS status_name, s.description AS status_description, \
    inv.barcode, inv.sku, inv.color, inv.quantity, inv.bought_at, \
    inv.location, inv.storage_location_id, \
    inv.is_returnable, inv.return_location, inv.return_datetime, inv.return_notes, \
    inv.min_weight, inv.max_weight, inv.min_height, inv.max_height, \
    inv.associated_image_url, \
    inv.created_by, \
    COALESCE(cp.username, cp.full_name, cp.email_address) AS creator_name, \
    inv.created_at, \
    inv.updated_by, \
    COALESCE(up.username, up.full_name, up.email_address) AS updater_name, \
    inv.updated_at, \
    inv.sharable_groups";

/// Join clause shared by enriched `inventory` queries.
const INVENTORY_JOINS: &str = "\
    FROM inventory inv \
    LEFT JOIN statuses s ON s.id = inv.status \
    LEFT JOIN profiles cp ON cp.id = inv.created_by \
    LEFT JOIN profiles up ON up.id = inv.updated_by";

/// Default page size for asset listing.
const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size for asset listing; also the bulk-create snapshot size.
const MAX_LIMIT: i64 = 1000;

/// Provides CRUD operations for inventory assets.
pub struct InventoryRepo;

impl InventoryRepo {
    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// List the caller's own created assets, most recently updated first,
    /// optionally restricted to those updated at or after `since`.
    pub async fn list_for_user(
        pool: &PgPool,
        store: &dyn ObjectStore,
        user_id: EntityId,
        since: Option<Timestamp>,
        limit: Option<i64>,
    ) -> RepoResult<Vec<Inventory>> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);

        let query = if since.is_some() {
            format!(
                "SELECT {INVENTORY_COLUMNS} {INVENTORY_JOINS} \
                 WHERE inv.created_by = $1 AND inv.updated_at >= $2 \
                 ORDER BY inv.updated_at DESC LIMIT $3"
            )
        } else {
            format!(
                "SELECT {INVENTORY_COLUMNS} {INVENTORY_JOINS} \
                 WHERE inv.created_by = $1 \
                 ORDER BY inv.updated_at DESC LIMIT $2"
            )
        };

        let mut q = sqlx::query_as::<_, InventoryRow>(&query).bind(user_id);
        if let Some(since) = since {
            q = q.bind(since);
        }
        let rows = q.bind(limit).fetch_all(pool).await?;

        let mut assets = Vec::with_capacity(rows.len());
        for row in rows {
            let image = attach_image(store, row.id).await?;
            assets.push(Inventory::from_row(row, image));
        }
        Ok(assets)
    }

    /// Find an asset visible to the caller. A forbidden id reads the same
    /// as a missing one.
    pub async fn find_by_id(
        pool: &PgPool,
        store: &dyn ObjectStore,
        user_id: EntityId,
        id: EntityId,
    ) -> RepoResult<Option<Inventory>> {
        let query = format!(
            "SELECT {INVENTORY_COLUMNS} {INVENTORY_JOINS} \
             WHERE $1::UUID = ANY(inv.sharable_groups) AND inv.id = $2"
        );
        let row = sqlx::query_as::<_, InventoryRow>(&query)
            .bind(user_id)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        match row {
            Some(row) => {
                let image = attach_image(store, row.id).await?;
                Ok(Some(Inventory::from_row(row, image)))
            }
            None => Ok(None),
        }
    }

    /// Post-commit re-read by id, ungated: callers observe exactly what a
    /// subsequent `find_by_id` would return.
    async fn fetch_enriched(
        pool: &PgPool,
        store: &dyn ObjectStore,
        id: EntityId,
    ) -> RepoResult<Inventory> {
        let query = format!("SELECT {INVENTORY_COLUMNS} {INVENTORY_JOINS} WHERE inv.id = $1");
        let row = sqlx::query_as::<_, InventoryRow>(&query)
            .bind(id)
            .fetch_one(pool)
            .await?;
        let image = attach_image(store, row.id).await?;
        Ok(Inventory::from_row(row, image))
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Create an asset and return it fully enriched.
    ///
    /// The location input is resolved (or created) before the insert
    /// transaction opens; see `StorageLocationRepo::resolve` for the
    /// orphan-row caveat.
    pub async fn create(
        pool: &PgPool,
        store: &dyn ObjectStore,
        draft: &CreateInventory,
    ) -> RepoResult<Inventory> {
        asset::validate_bounds(
            draft.min_weight,
            draft.max_weight,
            draft.min_height,
            draft.max_height,
        )?;
        let status = StatusRepo::find(pool, &draft.status)
            .await?
            .ok_or_else(|| CoreError::NotFound {
                entity: "status",
                reference: draft.status.clone(),
            })?;
        let (storage_location_id, canonical_location) =
            StorageLocationRepo::resolve(pool, &draft.location, draft.created_by).await?;

        let mut draft = draft.clone();
        draft.scrub_return_fields();
        let groups = access::groups_with_creator(&draft.sharable_groups, draft.created_by);

        let mut tx = pool.begin().await?;
        let id: EntityId = sqlx::query_scalar(
            "INSERT INTO inventory (\
                name, description, price, status, barcode, sku, color, quantity, bought_at, \
                location, storage_location_id, is_returnable, \
                return_location, return_datetime, return_notes, \
                min_weight, max_weight, min_height, max_height, \
                created_by, updated_by, sharable_groups\
             ) VALUES (\
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, \
                $13, $14, $15, $16, $17, $18, $19, $20, $21, $22\
             ) RETURNING id",
        )
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(status.id)
        .bind(draft.barcode.as_deref())
        .bind(draft.sku.as_deref())
        .bind(draft.color.as_deref())
        .bind(draft.quantity)
        .bind(draft.bought_at.as_deref())
        .bind(&canonical_location)
        .bind(storage_location_id)
        .bind(draft.is_returnable)
        .bind(draft.return_location.as_deref())
        .bind(draft.return_datetime)
        .bind(draft.return_notes.as_deref())
        .bind(draft.min_weight)
        .bind(draft.max_weight)
        .bind(draft.min_height)
        .bind(draft.max_height)
        .bind(draft.created_by)
        .bind(draft.created_by)
        .bind(&groups)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        Self::fetch_enriched(pool, store, id).await
    }

    /// Create a batch of assets in one all-or-nothing transaction, then
    /// return a fresh snapshot of the caller's inventory list.
    ///
    /// The snapshot is read in a second transaction after the insert
    /// commits, so a concurrent writer can appear in it.
    pub async fn create_bulk(
        pool: &PgPool,
        store: &dyn ObjectStore,
        user_id: EntityId,
        drafts: &[CreateInventory],
    ) -> RepoResult<Vec<Inventory>> {
        // Validate and resolve references for the whole batch before any
        // insert runs.
        let mut resolved = Vec::with_capacity(drafts.len());
        for draft in drafts {
            asset::validate_bounds(
                draft.min_weight,
                draft.max_weight,
                draft.min_height,
                draft.max_height,
            )?;
            let status = StatusRepo::find(pool, &draft.status)
                .await?
                .ok_or_else(|| CoreError::NotFound {
                    entity: "status",
                    reference: draft.status.clone(),
                })?;
            let location = StorageLocationRepo::resolve(pool, &draft.location, user_id).await?;
            resolved.push((status.id, location));
        }

        let mut tx = pool.begin().await?;
        for (draft, (status_id, (storage_location_id, canonical_location))) in
            drafts.iter().zip(&resolved)
        {
            let mut draft = draft.clone();
            draft.scrub_return_fields();
            let groups = access::groups_with_creator(&draft.sharable_groups, user_id);

            sqlx::query(
                "INSERT INTO inventory (\
                    name, description, price, status, barcode, sku, color, quantity, bought_at, \
                    location, storage_location_id, is_returnable, \
                    return_location, return_datetime, return_notes, \
                    min_weight, max_weight, min_height, max_height, \
                    created_by, updated_by, sharable_groups\
                 ) VALUES (\
                    $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, \
                    $13, $14, $15, $16, $17, $18, $19, $20, $21, $22\
                 )",
            )
            .bind(&draft.name)
            .bind(&draft.description)
            .bind(draft.price)
            .bind(status_id)
            .bind(draft.barcode.as_deref())
            .bind(draft.sku.as_deref())
            .bind(draft.color.as_deref())
            .bind(draft.quantity)
            .bind(draft.bought_at.as_deref())
            .bind(canonical_location)
            .bind(storage_location_id)
            .bind(draft.is_returnable)
            .bind(draft.return_location.as_deref())
            .bind(draft.return_datetime)
            .bind(draft.return_notes.as_deref())
            .bind(draft.min_weight)
            .bind(draft.max_weight)
            .bind(draft.min_height)
            .bind(draft.max_height)
            .bind(user_id)
            .bind(user_id)
            .bind(&groups)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        Self::list_for_user(pool, store, user_id, None, Some(MAX_LIMIT)).await
    }

    /// Replace an asset in place and return it fully enriched.
    pub async fn update(
        pool: &PgPool,
        store: &dyn ObjectStore,
        draft: &UpdateInventory,
    ) -> RepoResult<Inventory> {
        asset::validate_bounds(
            draft.min_weight,
            draft.max_weight,
            draft.min_height,
            draft.max_height,
        )?;
        let status = StatusRepo::find(pool, &draft.status)
            .await?
            .ok_or_else(|| CoreError::NotFound {
                entity: "status",
                reference: draft.status.clone(),
            })?;
        let (storage_location_id, canonical_location) =
            StorageLocationRepo::resolve(pool, &draft.location, draft.updated_by).await?;

        let mut draft = draft.clone();
        draft.scrub_return_fields();

        let mut tx = pool.begin().await?;
        let updated_id: EntityId = sqlx::query_scalar(
            "UPDATE inventory inv SET \
                name = $3, description = $4, price = $5, status = $6, \
                barcode = $7, sku = $8, color = $9, quantity = $10, bought_at = $11, \
                location = $12, storage_location_id = $13, is_returnable = $14, \
                return_location = $15, return_datetime = $16, return_notes = $17, \
                min_weight = $18, max_weight = $19, min_height = $20, max_height = $21, \
                sharable_groups = $22, \
                updated_by = $2, updated_at = NOW() \
             WHERE inv.id = $1 AND $2::UUID = ANY(inv.sharable_groups) \
             RETURNING inv.id",
        )
        .bind(draft.id)
        .bind(draft.updated_by)
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(status.id)
        .bind(draft.barcode.as_deref())
        .bind(draft.sku.as_deref())
        .bind(draft.color.as_deref())
        .bind(draft.quantity)
        .bind(draft.bought_at.as_deref())
        .bind(&canonical_location)
        .bind(storage_location_id)
        .bind(draft.is_returnable)
        .bind(draft.return_location.as_deref())
        .bind(draft.return_datetime)
        .bind(draft.return_notes.as_deref())
        .bind(draft.min_weight)
        .bind(draft.max_weight)
        .bind(draft.min_height)
        .bind(draft.max_height)
        .bind(&draft.sharable_groups)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        Self::fetch_enriched(pool, store, updated_id).await
    }

    /// Apply a single-column change through the closed allow-list.
    ///
    /// The change is already validated and typed; each variant maps to its
    /// own fixed statement.
    pub async fn update_column(
        pool: &PgPool,
        store: &dyn ObjectStore,
        user_id: EntityId,
        asset_id: EntityId,
        change: &AssetColumnChange,
    ) -> RepoResult<Inventory> {
        let mut tx = pool.begin().await?;
        let updated_id: EntityId = match change {
            AssetColumnChange::Price(price) => {
                sqlx::query_scalar(
                    "UPDATE inventory inv \
                     SET price = $1, updated_by = $2, updated_at = NOW() \
                     WHERE $2::UUID = ANY(inv.sharable_groups) AND inv.id = $3 \
                     RETURNING inv.id",
                )
                .bind(price)
                .bind(user_id)
                .bind(asset_id)
                .fetch_one(&mut *tx)
                .await?
            }
            AssetColumnChange::Quantity(quantity) => {
                sqlx::query_scalar(
                    "UPDATE inventory inv \
                     SET quantity = $1, updated_by = $2, updated_at = NOW() \
                     WHERE $2::UUID = ANY(inv.sharable_groups) AND inv.id = $3 \
                     RETURNING inv.id",
                )
                .bind(quantity)
                .bind(user_id)
                .bind(asset_id)
                .fetch_one(&mut *tx)
                .await?
            }
        };
        tx.commit().await?;

        Self::fetch_enriched(pool, store, updated_id).await
    }

    /// Point an asset at its stored image.
    ///
    /// Returns `true` on a single-row affect; a missing or forbidden id
    /// surfaces the underlying row-not-found error.
    pub async fn update_image(
        pool: &PgPool,
        user_id: EntityId,
        id: EntityId,
        image_url: &str,
    ) -> RepoResult<bool> {
        let mut tx = pool.begin().await?;
        let _updated: EntityId = sqlx::query_scalar(
            "UPDATE inventory inv \
             SET associated_image_url = $1, updated_by = $2, updated_at = NOW() \
             WHERE $2::UUID = ANY(inv.sharable_groups) AND inv.id = $3 \
             RETURNING inv.id",
        )
        .bind(image_url)
        .bind(user_id)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(true)
    }

    /// Delete assets by id set. Idempotent: ids that do not exist (or are
    /// not visible to the caller) are no-ops, and the input list is
    /// returned unchanged as acknowledgment.
    pub async fn delete(
        pool: &PgPool,
        user_id: EntityId,
        ids: &[EntityId],
    ) -> RepoResult<Vec<EntityId>> {
        sqlx::query(
            "DELETE FROM inventory \
             WHERE id = ANY($1) AND $2::UUID = ANY(sharable_groups)",
        )
        .bind(ids)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(ids.to_vec())
    }
}
