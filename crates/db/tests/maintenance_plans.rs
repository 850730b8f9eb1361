//! Integration tests for maintenance plan CRUD and plan/asset associations.

mod common;

use sqlx::PgPool;
use stockroom_db::models::maintenance_plan::UpdateMaintenancePlan;
use stockroom_db::repositories::{InventoryRepo, MaintenancePlanRepo};
use stockroom_storage::MemoryObjectStore;

use common::{new_inventory, new_plan, seed_profile};

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_plan_create_with_due_date(pool: PgPool) {
    let store = MemoryObjectStore::new();
    let user = seed_profile(&pool, "ursa").await;

    let due = chrono::Utc::now() + chrono::Duration::days(90);
    let mut draft = new_plan(user, "Quarterly check");
    draft.plan_type = "quarterly".to_string();
    draft.plan_due = Some(due);

    let created = MaintenancePlanRepo::create(&pool, &store, &draft).await.unwrap();
    assert_eq!(created.plan_type, "quarterly");
    assert_eq!(
        created.plan_due.unwrap().timestamp(),
        due.timestamp()
    );
    assert_eq!(created.sharable_groups, vec![user]);
    assert_eq!(created.creator_name.as_deref(), Some("ursa"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_plan_update_replaces_fields(pool: PgPool) {
    let store = MemoryObjectStore::new();
    let user = seed_profile(&pool, "veda").await;

    let created = MaintenancePlanRepo::create(&pool, &store, &new_plan(user, "Bike service"))
        .await
        .unwrap();

    let updated = MaintenancePlanRepo::update(
        &pool,
        &store,
        &UpdateMaintenancePlan {
            id: created.id,
            name: "Bike service (road)".to_string(),
            description: "chain, brakes, tyres".to_string(),
            color: Some("#112233".to_string()),
            status: "active".to_string(),
            plan_type: "monthly".to_string(),
            plan_due: None,
            location: None,
            updated_by: user,
            sharable_groups: vec![user],
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.name, "Bike service (road)");
    assert_eq!(updated.plan_type, "monthly");
    assert_eq!(updated.status.as_ref().unwrap().name, "active");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_plan_associations_round_trip(pool: PgPool) {
    let store = MemoryObjectStore::new();
    let user = seed_profile(&pool, "wade").await;

    let plan = MaintenancePlanRepo::create(&pool, &store, &new_plan(user, "Mower upkeep"))
        .await
        .unwrap();
    let mower = InventoryRepo::create(&pool, &store, &new_inventory(user, "Mower", "Shed"))
        .await
        .unwrap();
    let trimmer = InventoryRepo::create(&pool, &store, &new_inventory(user, "Trimmer", "Shed"))
        .await
        .unwrap();

    let associations = MaintenancePlanRepo::add_items(
        &pool,
        plan.id,
        &[mower.id, trimmer.id],
        user,
        &[user],
    )
    .await
    .unwrap();
    assert_eq!(associations.len(), 2);
    assert!(associations.iter().all(|a| a.maintenance_plan_id == plan.id));

    let mower_assoc = associations
        .iter()
        .find(|a| a.item_id == mower.id)
        .expect("mower association should be listed");
    assert_eq!(mower_assoc.item_name.as_deref(), Some("Mower"));

    MaintenancePlanRepo::remove_items(&pool, plan.id, &[mower_assoc.id])
        .await
        .unwrap();

    let remaining = MaintenancePlanRepo::list_items(&pool, user, plan.id, None)
        .await
        .unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].item_id, trimmer.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_plan_delete_is_idempotent(pool: PgPool) {
    let store = MemoryObjectStore::new();
    let user = seed_profile(&pool, "xena").await;

    let plan = MaintenancePlanRepo::create(&pool, &store, &new_plan(user, "One-off"))
        .await
        .unwrap();

    let ghost = uuid::Uuid::new_v4();
    let acked = MaintenancePlanRepo::delete(&pool, user, &[plan.id, ghost])
        .await
        .unwrap();
    assert_eq!(acked, vec![plan.id, ghost]);

    // Deleting again is a no-op with the same acknowledgment shape.
    let acked = MaintenancePlanRepo::delete(&pool, user, &[plan.id]).await.unwrap();
    assert_eq!(acked, vec![plan.id]);

    assert!(MaintenancePlanRepo::find_by_id(&pool, &store, user, plan.id)
        .await
        .unwrap()
        .is_none());
}
