//! Integration tests for the storage-location resolver.

mod common;

use sqlx::PgPool;
use stockroom_db::repositories::{InventoryRepo, StorageLocationRepo};
use stockroom_storage::MemoryObjectStore;

use common::{new_inventory, seed_profile};

async fn count_locations(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM storage_locations")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_free_text_creates_exactly_one_row(pool: PgPool) {
    let user = seed_profile(&pool, "ida").await;

    let (id, canonical) = StorageLocationRepo::resolve(&pool, "Garage", user).await.unwrap();
    assert_eq!(canonical, "Garage");
    assert_eq!(count_locations(&pool).await, 1);

    let found = StorageLocationRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(found.location, "Garage");
    assert_eq!(found.created_by, Some(user));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_same_text_twice_yields_two_rows(pool: PgPool) {
    let user = seed_profile(&pool, "jon").await;

    let (first, _) = StorageLocationRepo::resolve(&pool, "Garage", user).await.unwrap();
    let (second, _) = StorageLocationRepo::resolve(&pool, "Garage", user).await.unwrap();

    // Deduplicated by reference, not by value.
    assert_ne!(first, second);
    assert_eq!(count_locations(&pool).await, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_existing_id_is_reused(pool: PgPool) {
    let user = seed_profile(&pool, "kai").await;

    let (id, _) = StorageLocationRepo::resolve(&pool, "Cellar", user).await.unwrap();
    let (resolved, canonical) = StorageLocationRepo::resolve(&pool, &id.to_string(), user)
        .await
        .unwrap();

    assert_eq!(resolved, id);
    assert_eq!(canonical, "Cellar");
    assert_eq!(count_locations(&pool).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_well_formed_but_unknown_id_takes_create_branch(pool: PgPool) {
    let user = seed_profile(&pool, "lou").await;

    let phantom = uuid::Uuid::new_v4().to_string();
    let (id, canonical) = StorageLocationRepo::resolve(&pool, &phantom, user).await.unwrap();

    // A new row whose canonical string is the raw input.
    assert_ne!(id.to_string(), phantom);
    assert_eq!(canonical, phantom);
    assert_eq!(count_locations(&pool).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_inventory_rows_share_a_resolved_location(pool: PgPool) {
    let store = MemoryObjectStore::new();
    let user = seed_profile(&pool, "mia").await;

    let first = InventoryRepo::create(&pool, &store, &new_inventory(user, "Rake", "Shed"))
        .await
        .unwrap();
    let location_id = first.storage_location_id.unwrap();

    // The second draft supplies the id it got back from the first create.
    let second = InventoryRepo::create(
        &pool,
        &store,
        &new_inventory(user, "Hoe", &location_id.to_string()),
    )
    .await
    .unwrap();

    assert_eq!(second.storage_location_id, Some(location_id));
    assert_eq!(second.location.as_deref(), Some("Shed"));
    assert_eq!(count_locations(&pool).await, 1);
}
