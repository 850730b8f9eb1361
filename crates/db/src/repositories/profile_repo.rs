//! Repository for user profiles.
//!
//! Profiles are reference data for display-name enrichment; they are not
//! group-gated. A user may only update their own row, which the caller
//! guarantees by addressing the update with the authenticated id.

use sqlx::PgPool;
use stockroom_core::types::EntityId;

use crate::models::profile::{Profile, UpdateProfile};

/// Column list for `profiles` queries. The avatar is surfaced as base64.
const PROFILE_COLUMNS: &str = "\
    id, username, full_name, \
    CASE WHEN avatar IS NOT NULL THEN ENCODE(avatar, 'base64') END AS avatar_base64, \
    email_address, phone_number, about_me, \
    online_status, appearance, grid_view, role, updated_at";

pub struct ProfileRepo;

impl ProfileRepo {
    /// List all user profiles.
    pub async fn list(pool: &PgPool) -> Result<Vec<Profile>, sqlx::Error> {
        let query = format!("SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY username");
        sqlx::query_as::<_, Profile>(&query).fetch_all(pool).await
    }

    /// Find a profile by user id.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: EntityId,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Update a user's own profile fields, returning the updated row.
    pub async fn update(
        pool: &PgPool,
        user_id: EntityId,
        draft: &UpdateProfile,
    ) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET \
                username = $2, full_name = $3, email_address = $4, phone_number = $5, \
                about_me = $6, online_status = $7, appearance = $8, grid_view = $9, \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {PROFILE_COLUMNS}"
        );

        let mut tx = pool.begin().await?;
        let profile = sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(draft.username.as_deref())
            .bind(draft.full_name.as_deref())
            .bind(draft.email_address.as_deref())
            .bind(draft.phone_number.as_deref())
            .bind(draft.about_me.as_deref())
            .bind(draft.online_status)
            .bind(draft.appearance)
            .bind(draft.grid_view)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(profile)
    }

    /// Replace a user's avatar bytes, returning the updated row.
    pub async fn update_avatar(
        pool: &PgPool,
        user_id: EntityId,
        avatar: &[u8],
    ) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET avatar = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {PROFILE_COLUMNS}"
        );

        let mut tx = pool.begin().await?;
        let profile = sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(avatar)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(profile)
    }
}
