//! Repository for maintenance plans and their asset associations.

use sqlx::PgPool;
use stockroom_core::access;
use stockroom_core::error::CoreError;
use stockroom_core::geo::GeoPoint;
use stockroom_core::types::EntityId;
use stockroom_storage::ObjectStore;

use crate::error::RepoResult;
use crate::models::maintenance_plan::{
    CreateMaintenancePlan, MaintenanceItem, MaintenancePlan, MaintenancePlanRow,
    UpdateMaintenancePlan,
};
use crate::repositories::{attach_image, StatusRepo};

/// Column list for enriched `maintenance_plan` queries.
const PLAN_COLUMNS: &str = "\
    mp.id, mp.name, mp.description, mp.color, \
    mp.status AS status_id, s.name AS status_name, s.description AS status_description, \
    mp.plan_type, mp.plan_due, mp.lon, mp.lat, mp.associated_image_url, \
    mp.created_by, \
    COALESCE(cp.full_name, cp.username, cp.email_address) AS creator_name, \
    mp.created_at, \
    mp.updated_by, \
    COALESCE(up.full_name, up.username, up.email_address) AS updater_name, \
    mp.updated_at, \
    mp.sharable_groups";

/// Join clause shared by enriched `maintenance_plan` queries.
const PLAN_JOINS: &str = "\
    FROM maintenance_plan mp \
    LEFT JOIN statuses s ON s.id = mp.status \
    LEFT JOIN profiles cp ON cp.id = mp.created_by \
    LEFT JOIN profiles up ON up.id = mp.updated_by";

/// Column list for enriched `maintenance_item` queries.
const PLAN_ITEM_COLUMNS: &str = "\
    mi.id, mi.maintenance_plan_id, mi.item_id, \
    i.name AS item_name, i.description AS item_description, \
    i.price AS item_price, i.quantity AS item_quantity, i.location AS item_location, \
    mi.created_by, \
    COALESCE(cp.username, cp.full_name, cp.email_address, 'Anonymous') AS creator_name, \
    mi.created_at, \
    mi.updated_by, \
    COALESCE(up.username, up.full_name, up.email_address, 'Anonymous') AS updater_name, \
    mi.updated_at, \
    mi.sharable_groups";

/// Join clause shared by enriched `maintenance_item` queries.
const PLAN_ITEM_JOINS: &str = "\
    FROM maintenance_item mi \
    LEFT JOIN inventory i ON i.id = mi.item_id \
    LEFT JOIN profiles cp ON cp.id = mi.created_by \
    LEFT JOIN profiles up ON up.id = mi.updated_by";

/// Default page size for plan and association listing.
const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size; also the post-insert association snapshot size.
const MAX_LIMIT: i64 = 1000;

/// Provides CRUD operations for maintenance plans and their associations.
pub struct MaintenancePlanRepo;

impl MaintenancePlanRepo {
    // -----------------------------------------------------------------------
    // Plan CRUD
    // -----------------------------------------------------------------------

    /// List plans visible to the caller, most recently updated first.
    pub async fn list_for_user(
        pool: &PgPool,
        store: &dyn ObjectStore,
        user_id: EntityId,
        limit: Option<i64>,
    ) -> RepoResult<Vec<MaintenancePlan>> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        let query = format!(
            "SELECT {PLAN_COLUMNS} {PLAN_JOINS} \
             WHERE $1::UUID = ANY(mp.sharable_groups) \
             ORDER BY mp.updated_at DESC LIMIT $2"
        );
        let rows = sqlx::query_as::<_, MaintenancePlanRow>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await?;

        let mut plans = Vec::with_capacity(rows.len());
        for row in rows {
            let image = attach_image(store, row.id).await?;
            plans.push(MaintenancePlan::from_row(row, image));
        }
        Ok(plans)
    }

    /// Find a plan visible to the caller. A forbidden id reads the same as
    /// a missing one.
    pub async fn find_by_id(
        pool: &PgPool,
        store: &dyn ObjectStore,
        user_id: EntityId,
        id: EntityId,
    ) -> RepoResult<Option<MaintenancePlan>> {
        let query = format!(
            "SELECT {PLAN_COLUMNS} {PLAN_JOINS} \
             WHERE $1::UUID = ANY(mp.sharable_groups) AND mp.id = $2"
        );
        let row = sqlx::query_as::<_, MaintenancePlanRow>(&query)
            .bind(user_id)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        match row {
            Some(row) => {
                let image = attach_image(store, row.id).await?;
                Ok(Some(MaintenancePlan::from_row(row, image)))
            }
            None => Ok(None),
        }
    }

    /// Post-commit re-read by id, ungated.
    async fn fetch_enriched(
        pool: &PgPool,
        store: &dyn ObjectStore,
        id: EntityId,
    ) -> RepoResult<MaintenancePlan> {
        let query = format!("SELECT {PLAN_COLUMNS} {PLAN_JOINS} WHERE mp.id = $1");
        let row = sqlx::query_as::<_, MaintenancePlanRow>(&query)
            .bind(id)
            .fetch_one(pool)
            .await?;
        let image = attach_image(store, row.id).await?;
        Ok(MaintenancePlan::from_row(row, image))
    }

    /// Create a plan and return it fully enriched.
    pub async fn create(
        pool: &PgPool,
        store: &dyn ObjectStore,
        draft: &CreateMaintenancePlan,
    ) -> RepoResult<MaintenancePlan> {
        let status = StatusRepo::find(pool, &draft.status)
            .await?
            .ok_or_else(|| CoreError::NotFound {
                entity: "status",
                reference: draft.status.clone(),
            })?;
        let groups = access::groups_with_creator(&draft.sharable_groups, draft.created_by);
        let (lon, lat) = GeoPoint::parts(draft.location);

        let mut tx = pool.begin().await?;
        let id: EntityId = sqlx::query_scalar(
            "INSERT INTO maintenance_plan (\
                name, description, color, status, plan_type, plan_due, lon, lat, \
                created_by, updated_by, sharable_groups\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9, $10) \
             RETURNING id",
        )
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.color.as_deref())
        .bind(status.id)
        .bind(&draft.plan_type)
        .bind(draft.plan_due)
        .bind(lon)
        .bind(lat)
        .bind(draft.created_by)
        .bind(&groups)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        Self::fetch_enriched(pool, store, id).await
    }

    /// Replace a plan in place and return it fully enriched.
    pub async fn update(
        pool: &PgPool,
        store: &dyn ObjectStore,
        draft: &UpdateMaintenancePlan,
    ) -> RepoResult<MaintenancePlan> {
        let status = StatusRepo::find(pool, &draft.status)
            .await?
            .ok_or_else(|| CoreError::NotFound {
                entity: "status",
                reference: draft.status.clone(),
            })?;
        let (lon, lat) = GeoPoint::parts(draft.location);

        let mut tx = pool.begin().await?;
        let updated_id: EntityId = sqlx::query_scalar(
            "UPDATE maintenance_plan mp SET \
                name = $3, description = $4, color = $5, status = $6, \
                plan_type = $7, plan_due = $8, lon = $9, lat = $10, \
                sharable_groups = $11, \
                updated_by = $2, updated_at = NOW() \
             WHERE mp.id = $1 AND $2::UUID = ANY(mp.sharable_groups) \
             RETURNING mp.id",
        )
        .bind(draft.id)
        .bind(draft.updated_by)
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.color.as_deref())
        .bind(status.id)
        .bind(&draft.plan_type)
        .bind(draft.plan_due)
        .bind(lon)
        .bind(lat)
        .bind(&draft.sharable_groups)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        Self::fetch_enriched(pool, store, updated_id).await
    }

    /// Delete plans by id set. Idempotent; returns the input list unchanged
    /// as acknowledgment.
    pub async fn delete(
        pool: &PgPool,
        user_id: EntityId,
        ids: &[EntityId],
    ) -> RepoResult<Vec<EntityId>> {
        sqlx::query(
            "DELETE FROM maintenance_plan \
             WHERE id = ANY($1) AND $2::UUID = ANY(sharable_groups)",
        )
        .bind(ids)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(ids.to_vec())
    }

    /// Point a plan at its stored image.
    pub async fn update_image(
        pool: &PgPool,
        user_id: EntityId,
        id: EntityId,
        image_url: &str,
    ) -> RepoResult<bool> {
        let mut tx = pool.begin().await?;
        let _updated: EntityId = sqlx::query_scalar(
            "UPDATE maintenance_plan mp \
             SET associated_image_url = $1, updated_by = $2, updated_at = NOW() \
             WHERE $2::UUID = ANY(mp.sharable_groups) AND mp.id = $3 \
             RETURNING mp.id",
        )
        .bind(image_url)
        .bind(user_id)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Associations
    // -----------------------------------------------------------------------

    /// Link assets to a plan in a single all-or-nothing transaction, then
    /// return the plan's full current association set as a fresh
    /// post-commit snapshot.
    pub async fn add_items(
        pool: &PgPool,
        plan_id: EntityId,
        item_ids: &[EntityId],
        actor: EntityId,
        groups: &[EntityId],
    ) -> RepoResult<Vec<MaintenanceItem>> {
        let groups = access::groups_with_creator(groups, actor);

        let mut tx = pool.begin().await?;
        Self::insert_items_inner(&mut tx, plan_id, item_ids, actor, &groups).await?;
        tx.commit().await?;

        Self::list_items(pool, actor, plan_id, Some(MAX_LIMIT)).await
    }

    /// Unlink associations from a plan by association id set. Zero matches
    /// is not an error.
    pub async fn remove_items(
        pool: &PgPool,
        plan_id: EntityId,
        association_ids: &[EntityId],
    ) -> RepoResult<()> {
        let mut tx = pool.begin().await?;
        sqlx::query(
            "DELETE FROM maintenance_item \
             WHERE maintenance_plan_id = $1 AND id = ANY($2)",
        )
        .bind(plan_id)
        .bind(association_ids)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(())
    }

    /// List a plan's associations visible to the caller, evaluated against
    /// each association's own group set.
    pub async fn list_items(
        pool: &PgPool,
        user_id: EntityId,
        plan_id: EntityId,
        limit: Option<i64>,
    ) -> RepoResult<Vec<MaintenanceItem>> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        let query = format!(
            "SELECT {PLAN_ITEM_COLUMNS} {PLAN_ITEM_JOINS} \
             WHERE $1::UUID = ANY(mi.sharable_groups) AND mi.maintenance_plan_id = $2 \
             ORDER BY mi.updated_at DESC LIMIT $3"
        );
        let items = sqlx::query_as::<_, MaintenanceItem>(&query)
            .bind(user_id)
            .bind(plan_id)
            .bind(limit)
            .fetch_all(pool)
            .await?;
        Ok(items)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Insert association rows within an existing transaction.
    async fn insert_items_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        plan_id: EntityId,
        item_ids: &[EntityId],
        actor: EntityId,
        groups: &[EntityId],
    ) -> Result<(), sqlx::Error> {
        for &item_id in item_ids {
            sqlx::query(
                "INSERT INTO maintenance_item (\
                    maintenance_plan_id, item_id, created_by, updated_by, sharable_groups\
                 ) VALUES ($1, $2, $3, $3, $4)",
            )
            .bind(plan_id)
            .bind(item_id)
            .bind(actor)
            .bind(groups)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}
