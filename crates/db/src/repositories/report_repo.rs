//! Read-only valuation aggregates over a user's visible inventory.

use rust_decimal::Decimal;
use sqlx::PgPool;
use stockroom_core::types::{EntityId, Timestamp};

use crate::models::report::AssetReport;

pub struct ReportRepo;

impl ReportRepo {
    /// Compute valuation totals over the caller's visible inventory
    /// updated at or after `since`, optionally widened to assets whose
    /// return date falls inside the window.
    ///
    /// No matching rows yields zero totals, not an error.
    pub async fn compute(
        pool: &PgPool,
        user_id: EntityId,
        since: Timestamp,
        include_overdue: bool,
    ) -> Result<AssetReport, sqlx::Error> {
        let overdue_clause = if include_overdue {
            " OR inv.return_datetime >= $2"
        } else {
            ""
        };

        let query = format!(
            "WITH filtered_inventory AS (\
                SELECT inv.id, inv.price \
                FROM inventory inv \
                WHERE (inv.updated_at >= $2{overdue_clause}) \
                  AND $1::UUID = ANY(inv.sharable_groups)\
             ) \
             SELECT \
                COALESCE((SELECT SUM(price) FROM filtered_inventory), 0) AS item_valuation, \
                COALESCE((\
                    SELECT SUM(fi.price) \
                    FROM filtered_inventory fi \
                    JOIN (SELECT DISTINCT item_id FROM category_item) ci ON ci.item_id = fi.id\
                ), 0) AS total_category_items_cost"
        );

        let (item_valuation, total_category_items_cost): (Decimal, Decimal) =
            sqlx::query_as(&query)
                .bind(user_id)
                .bind(since)
                .fetch_one(pool)
                .await?;

        Ok(AssetReport {
            item_valuation,
            total_category_items_cost,
            since,
        })
    }
}
