//! Repository for the shared status lookup table.

use sqlx::PgPool;
use stockroom_core::types::EntityId;
use uuid::Uuid;

use crate::models::status::Status;

/// Column list for `statuses` queries.
const STATUS_COLUMNS: &str = "id, name, description, created_at, updated_at";

pub struct StatusRepo;

impl StatusRepo {
    /// Resolve a status reference: a UUID string looks up by id, anything
    /// else by unique name.
    pub async fn find(pool: &PgPool, reference: &str) -> Result<Option<Status>, sqlx::Error> {
        match Uuid::parse_str(reference.trim()) {
            Ok(id) => Self::find_by_id(pool, id).await,
            Err(_) => {
                let query = format!("SELECT {STATUS_COLUMNS} FROM statuses WHERE name = $1");
                sqlx::query_as::<_, Status>(&query)
                    .bind(reference.trim())
                    .fetch_optional(pool)
                    .await
            }
        }
    }

    /// Find a status by ID.
    pub async fn find_by_id(pool: &PgPool, id: EntityId) -> Result<Option<Status>, sqlx::Error> {
        let query = format!("SELECT {STATUS_COLUMNS} FROM statuses WHERE id = $1");
        sqlx::query_as::<_, Status>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all statuses.
    pub async fn list(pool: &PgPool) -> Result<Vec<Status>, sqlx::Error> {
        let query = format!("SELECT {STATUS_COLUMNS} FROM statuses ORDER BY name");
        sqlx::query_as::<_, Status>(&query).fetch_all(pool).await
    }
}
