//! Repository for categories and their asset associations.

use sqlx::PgPool;
use stockroom_core::access;
use stockroom_core::error::CoreError;
use stockroom_core::geo::GeoPoint;
use stockroom_core::types::EntityId;
use stockroom_storage::ObjectStore;

use crate::error::RepoResult;
use crate::models::category::{
    Category, CategoryItem, CategoryRow, CreateCategory, UpdateCategory,
};
use crate::repositories::{attach_image, StatusRepo};

/// Column list for enriched `category` queries.
const CATEGORY_COLUMNS: &str = "\
    c.id, c.name, c.description, c.color, \
    c.status AS status_id, s.name AS status_name, s.description AS status_description, \
    c.lon, c.lat, c.associated_image_url, \
    c.created_by, \
    COALESCE(cp.full_name, cp.username, cp.email_address) AS creator_name, \
    c.created_at, \
    c.updated_by, \
    COALESCE(up.full_name, up.username, up.email_address) AS updater_name, \
    c.updated_at, \
    c.sharable_groups";

/// Join clause shared by enriched `category` queries.
const CATEGORY_JOINS: &str = "\
    FROM category c \
    LEFT JOIN statuses s ON s.id = c.status \
    LEFT JOIN profiles cp ON cp.id = c.created_by \
    LEFT JOIN profiles up ON up.id = c.updated_by";

/// Column list for enriched `category_item` queries. Association reads fall
/// back to 'Anonymous' for unresolvable display names.
const CATEGORY_ITEM_COLUMNS: &str = "\
    ci.id, ci.category_id, ci.item_id, \
    i.name AS item_name, i.description AS item_description, \
    i.price AS item_price, i.quantity AS item_quantity, i.location AS item_location, \
    ci.created_by, \
    COALESCE(cp.username, cp.full_name, cp.email_address, 'Anonymous') AS creator_name, \
    ci.created_at, \
    ci.updated_by, \
    COALESCE(up.username, up.full_name, up.email_address, 'Anonymous') AS updater_name, \
    ci.updated_at, \
    ci.sharable_groups";

/// Join clause shared by enriched `category_item` queries.
const CATEGORY_ITEM_JOINS: &str = "\
    FROM category_item ci \
    LEFT JOIN inventory i ON i.id = ci.item_id \
    LEFT JOIN profiles cp ON cp.id = ci.created_by \
    LEFT JOIN profiles up ON up.id = ci.updated_by";

/// Default page size for category and association listing.
const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size; also the post-insert association snapshot size.
const MAX_LIMIT: i64 = 1000;

/// Provides CRUD operations for categories and their associations.
pub struct CategoryRepo;

impl CategoryRepo {
    // -----------------------------------------------------------------------
    // Category CRUD
    // -----------------------------------------------------------------------

    /// List categories visible to the caller, most recently updated first.
    pub async fn list_for_user(
        pool: &PgPool,
        store: &dyn ObjectStore,
        user_id: EntityId,
        limit: Option<i64>,
    ) -> RepoResult<Vec<Category>> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        let query = format!(
            "SELECT {CATEGORY_COLUMNS} {CATEGORY_JOINS} \
             WHERE $1::UUID = ANY(c.sharable_groups) \
             ORDER BY c.updated_at DESC LIMIT $2"
        );
        let rows = sqlx::query_as::<_, CategoryRow>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await?;

        let mut categories = Vec::with_capacity(rows.len());
        for row in rows {
            let image = attach_image(store, row.id).await?;
            categories.push(Category::from_row(row, image));
        }
        Ok(categories)
    }

    /// Find a category visible to the caller. A forbidden id reads the
    /// same as a missing one.
    pub async fn find_by_id(
        pool: &PgPool,
        store: &dyn ObjectStore,
        user_id: EntityId,
        id: EntityId,
    ) -> RepoResult<Option<Category>> {
        let query = format!(
            "SELECT {CATEGORY_COLUMNS} {CATEGORY_JOINS} \
             WHERE $1::UUID = ANY(c.sharable_groups) AND c.id = $2"
        );
        let row = sqlx::query_as::<_, CategoryRow>(&query)
            .bind(user_id)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        match row {
            Some(row) => {
                let image = attach_image(store, row.id).await?;
                Ok(Some(Category::from_row(row, image)))
            }
            None => Ok(None),
        }
    }

    /// Post-commit re-read by id, ungated.
    async fn fetch_enriched(
        pool: &PgPool,
        store: &dyn ObjectStore,
        id: EntityId,
    ) -> RepoResult<Category> {
        let query = format!("SELECT {CATEGORY_COLUMNS} {CATEGORY_JOINS} WHERE c.id = $1");
        let row = sqlx::query_as::<_, CategoryRow>(&query)
            .bind(id)
            .fetch_one(pool)
            .await?;
        let image = attach_image(store, row.id).await?;
        Ok(Category::from_row(row, image))
    }

    /// Create a category and return it fully enriched.
    pub async fn create(
        pool: &PgPool,
        store: &dyn ObjectStore,
        draft: &CreateCategory,
    ) -> RepoResult<Category> {
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
            "INSERT INTO category (\
                name, description, color, status, lon, lat, \
                created_by, updated_by, sharable_groups\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $7, $8) \
             RETURNING id",
        )
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.color.as_deref())
        .bind(status.id)
        .bind(lon)
        .bind(lat)
        .bind(draft.created_by)
        .bind(&groups)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        Self::fetch_enriched(pool, store, id).await
    }

    /// Replace a category in place and return it fully enriched.
    pub async fn update(
        pool: &PgPool,
        store: &dyn ObjectStore,
        draft: &UpdateCategory,
    ) -> RepoResult<Category> {
        let status = StatusRepo::find(pool, &draft.status)
            .await?
            .ok_or_else(|| CoreError::NotFound {
                entity: "status",
                reference: draft.status.clone(),
            })?;
        let (lon, lat) = GeoPoint::parts(draft.location);

        let mut tx = pool.begin().await?;
        let updated_id: EntityId = sqlx::query_scalar(
            "UPDATE category c SET \
                name = $3, description = $4, color = $5, status = $6, \
                lon = $7, lat = $8, sharable_groups = $9, \
                updated_by = $2, updated_at = NOW() \
             WHERE c.id = $1 AND $2::UUID = ANY(c.sharable_groups) \
             RETURNING c.id",
        )
        .bind(draft.id)
        .bind(draft.updated_by)
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.color.as_deref())
        .bind(status.id)
        .bind(lon)
        .bind(lat)
        .bind(&draft.sharable_groups)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        Self::fetch_enriched(pool, store, updated_id).await
    }

    /// Delete categories by id set. Idempotent; returns the input list
    /// unchanged as acknowledgment.
    pub async fn delete(
        pool: &PgPool,
        user_id: EntityId,
        ids: &[EntityId],
    ) -> RepoResult<Vec<EntityId>> {
        sqlx::query(
            "DELETE FROM category \
             WHERE id = ANY($1) AND $2::UUID = ANY(sharable_groups)",
        )
        .bind(ids)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(ids.to_vec())
    }

    /// Point a category at its stored image.
    pub async fn update_image(
        pool: &PgPool,
        user_id: EntityId,
        id: EntityId,
        image_url: &str,
    ) -> RepoResult<bool> {
        let mut tx = pool.begin().await?;
        let _updated: EntityId = sqlx::query_scalar(
            "UPDATE category c \
             SET associated_image_url = $1, updated_by = $2, updated_at = NOW() \
             WHERE $2::UUID = ANY(c.sharable_groups) AND c.id = $3 \
             RETURNING c.id",
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

    /// Link assets to a category, one association row per asset, in a
    /// single all-or-nothing transaction. Returns the parent's full current
    /// association set, a fresh post-commit snapshot rather than just the
    /// new rows.
    pub async fn add_items(
        pool: &PgPool,
        category_id: EntityId,
        item_ids: &[EntityId],
        actor: EntityId,
        groups: &[EntityId],
    ) -> RepoResult<Vec<CategoryItem>> {
        let groups = access::groups_with_creator(groups, actor);

        let mut tx = pool.begin().await?;
        Self::insert_items_inner(&mut tx, category_id, item_ids, actor, &groups).await?;
        tx.commit().await?;

        Self::list_items(pool, actor, category_id, Some(MAX_LIMIT)).await
    }

    /// Unlink associations from a category by association id set. Zero
    /// matches is not an error.
    pub async fn remove_items(
        pool: &PgPool,
        category_id: EntityId,
        association_ids: &[EntityId],
    ) -> RepoResult<()> {
        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM category_item WHERE category_id = $1 AND id = ANY($2)")
            .bind(category_id)
            .bind(association_ids)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    /// List a category's associations visible to the caller. Visibility is
    /// evaluated against each association's own group set, never the
    /// parent's.
    pub async fn list_items(
        pool: &PgPool,
        user_id: EntityId,
        category_id: EntityId,
        limit: Option<i64>,
    ) -> RepoResult<Vec<CategoryItem>> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        let query = format!(
            "SELECT {CATEGORY_ITEM_COLUMNS} {CATEGORY_ITEM_JOINS} \
             WHERE $1::UUID = ANY(ci.sharable_groups) AND ci.category_id = $2 \
             ORDER BY ci.updated_at DESC LIMIT $3"
        );
        let items = sqlx::query_as::<_, CategoryItem>(&query)
            .bind(user_id)
            .bind(category_id)
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
        category_id: EntityId,
        item_ids: &[EntityId],
        actor: EntityId,
        groups: &[EntityId],
    ) -> Result<(), sqlx::Error> {
        for &item_id in item_ids {
            sqlx::query(
                "INSERT INTO category_item (\
                    category_id, item_id, created_by, updated_by, sharable_groups\
                 ) VALUES ($1, $2, $3, $3, $4)",
            )
            .bind(category_id)
            .bind(item_id)
            .bind(actor)
            .bind(groups)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}
