//! Repository for favourite pointers to categories and maintenance plans.

use sqlx::PgPool;
use stockroom_core::types::EntityId;

use crate::models::profile::{CreateFavouriteItem, FavouriteItem};

/// Column list for enriched `favourite_items` queries.
const FAVOURITE_COLUMNS: &str = "\
    fi.id, \
    fi.category_id, c.name AS category_name, cs.name AS category_status, \
    fi.maintenance_plan_id, mp.name AS maintenance_plan_name, ms.name AS maintenance_plan_status";

/// Join clause shared by enriched `favourite_items` queries.
const FAVOURITE_JOINS: &str = "\
    FROM favourite_items fi \
    LEFT JOIN category c ON c.id = fi.category_id \
    LEFT JOIN statuses cs ON cs.id = c.status \
    LEFT JOIN maintenance_plan mp ON mp.id = fi.maintenance_plan_id \
    LEFT JOIN statuses ms ON ms.id = mp.status";

/// Default page size for favourite listing.
const DEFAULT_LIMIT: i64 = 50;

/// Snapshot size returned after saving a favourite.
const REFRESH_LIMIT: i64 = 1000;

pub struct FavouriteRepo;

impl FavouriteRepo {
    /// List the caller's favourites, enriched with the target entity's
    /// name and status name.
    pub async fn list(
        pool: &PgPool,
        user_id: EntityId,
        limit: Option<i64>,
    ) -> Result<Vec<FavouriteItem>, sqlx::Error> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        let query = format!(
            "SELECT {FAVOURITE_COLUMNS} {FAVOURITE_JOINS} \
             WHERE fi.created_by = $1 \
             ORDER BY fi.created_at DESC LIMIT $2"
        );
        sqlx::query_as::<_, FavouriteItem>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Mark a category or maintenance plan as a favourite, then return the
    /// caller's refreshed favourite list.
    pub async fn save(
        pool: &PgPool,
        draft: &CreateFavouriteItem,
    ) -> Result<Vec<FavouriteItem>, sqlx::Error> {
        let groups = vec![draft.created_by];

        let mut tx = pool.begin().await?;
        let _id: EntityId = sqlx::query_scalar(
            "INSERT INTO favourite_items (\
                category_id, maintenance_plan_id, created_by, updated_by, sharable_groups\
             ) VALUES ($1, $2, $3, $3, $4) \
             RETURNING id",
        )
        .bind(draft.category_id)
        .bind(draft.maintenance_plan_id)
        .bind(draft.created_by)
        .bind(&groups)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        Self::list(pool, draft.created_by, Some(REFRESH_LIMIT)).await
    }

    /// Remove a favourite the caller can see. Returns the input id as
    /// acknowledgment; a forbidden or missing id is a no-op.
    pub async fn remove(
        pool: &PgPool,
        user_id: EntityId,
        item_id: EntityId,
    ) -> Result<EntityId, sqlx::Error> {
        sqlx::query(
            "DELETE FROM favourite_items fi \
             WHERE fi.id = $1 AND $2::UUID = ANY(fi.sharable_groups)",
        )
        .bind(item_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(item_id)
    }
}
