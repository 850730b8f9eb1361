//! Status lookup rows shared by inventory, categories, and plans.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stockroom_core::types::{EntityId, Timestamp};

/// A row from the `statuses` lookup table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Status {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Status fields left-joined onto an entity read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub id: EntityId,
    pub name: String,
    pub description: String,
}

impl StatusSummary {
    /// Compose from left-joined columns; an absent status reads as `None`,
    /// never as an error.
    pub fn from_parts(
        id: Option<EntityId>,
        name: Option<String>,
        description: Option<String>,
    ) -> Option<Self> {
        match (id, name) {
            (Some(id), Some(name)) => Some(Self {
                id,
                name,
                description: description.unwrap_or_default(),
            }),
            _ => None,
        }
    }
}
