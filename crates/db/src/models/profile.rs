//! User profile and favourite-item models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stockroom_core::types::{EntityId, Timestamp};

/// A user profile row. The avatar is surfaced base64-encoded.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: EntityId,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub avatar_base64: Option<String>,
    pub email_address: Option<String>,
    pub phone_number: Option<String>,
    pub about_me: Option<String>,
    pub online_status: bool,
    pub appearance: bool,
    pub grid_view: bool,
    pub role: Option<String>,
    pub updated_at: Timestamp,
}

/// DTO for updating a user's own profile fields.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfile {
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub email_address: Option<String>,
    pub phone_number: Option<String>,
    pub about_me: Option<String>,
    pub online_status: bool,
    pub appearance: bool,
    pub grid_view: bool,
}

/// A favourite pointer to a category or a maintenance plan, enriched with
/// the target's name and status name. Either target may be absent.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FavouriteItem {
    pub id: EntityId,
    pub category_id: Option<EntityId>,
    pub category_name: Option<String>,
    pub category_status: Option<String>,
    pub maintenance_plan_id: Option<EntityId>,
    pub maintenance_plan_name: Option<String>,
    pub maintenance_plan_status: Option<String>,
}

/// DTO for marking a category or maintenance plan as a favourite.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFavouriteItem {
    pub category_id: Option<EntityId>,
    pub maintenance_plan_id: Option<EntityId>,
    pub created_by: EntityId,
}
