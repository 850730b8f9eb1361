use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use stockroom_db::models::category::CreateCategory;
use stockroom_db::models::inventory::CreateInventory;
use stockroom_db::models::maintenance_plan::CreateMaintenancePlan;

/// Insert a bare profile row and return its id.
///
/// Only the username is set, so every display-name COALESCE order resolves
/// to it.
pub async fn seed_profile(pool: &PgPool, username: &str) -> Uuid {
    sqlx::query_scalar("INSERT INTO profiles (username) VALUES ($1) RETURNING id")
        .bind(username)
        .fetch_one(pool)
        .await
        .expect("profile seed should insert")
}

/// Build an inventory draft with small sane defaults.
pub fn new_inventory(created_by: Uuid, name: &str, location: &str) -> CreateInventory {
    CreateInventory {
        name: name.to_string(),
        description: String::new(),
        price: Decimal::ZERO,
        status: "active".to_string(),
        barcode: None,
        sku: None,
        color: None,
        quantity: 1,
        bought_at: None,
        location: location.to_string(),
        is_returnable: false,
        return_location: None,
        return_datetime: None,
        return_notes: None,
        min_weight: None,
        max_weight: None,
        min_height: None,
        max_height: None,
        created_by,
        sharable_groups: vec![created_by],
    }
}

/// Build a category draft with small sane defaults.
pub fn new_category(created_by: Uuid, name: &str) -> CreateCategory {
    CreateCategory {
        name: name.to_string(),
        description: String::new(),
        color: None,
        status: "draft".to_string(),
        location: None,
        created_by,
        sharable_groups: vec![created_by],
    }
}

/// Build a maintenance plan draft with small sane defaults.
pub fn new_plan(created_by: Uuid, name: &str) -> CreateMaintenancePlan {
    CreateMaintenancePlan {
        name: name.to_string(),
        description: String::new(),
        color: None,
        status: "draft".to_string(),
        plan_type: "annual".to_string(),
        plan_due: None,
        location: None,
        created_by,
        sharable_groups: vec![created_by],
    }
}
