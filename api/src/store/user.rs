use super::*;
use jiff::Timestamp;
use jiff_sqlx::ToSqlx;
use payloads::UserId;
use sqlx::PgPool;

use crate::time::TimeSource;

pub async fn insert_user(
    username: &str,
    password_hash: &str,
    role: Role,
    phone: Option<&str>,
    pool: &PgPool,
    time_source: &TimeSource,
) -> Result<User, StoreError> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (
            username,
            password_hash,
            role,
            phone,
            last_seen,
            created_at,
            updated_at
        ) VALUES ($1, $2, $3, $4, $5, $5, $5)
        RETURNING *",
    )
    .bind(username)
    .bind(password_hash)
    .bind(role)
    .bind(phone)
    .bind(time_source.now().to_sqlx())
    .fetch_one(pool)
    .await
    .map_err(|e| match StoreError::from(e) {
        StoreError::NotUnique(_) => StoreError::UsernameNotUnique {
            username: username.to_string(),
        },
        e => e,
    })
}

pub async fn read_user(
    user_id: &UserId,
    pool: &PgPool,
) -> Result<User, StoreError> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => StoreError::UserNotFound,
            e => StoreError::Database(e),
        })
}

pub async fn get_user_by_username(
    username: &str,
    pool: &PgPool,
) -> Result<User, StoreError> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_one(pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => StoreError::UserNotFound,
            e => StoreError::Database(e),
        })
}

pub async fn list_users(
    pool: &PgPool,
    time_source: &TimeSource,
) -> Result<Vec<responses::UserProfile>, StoreError> {
    let users = sqlx::query_as::<_, User>(
        "SELECT * FROM users ORDER BY username",
    )
    .fetch_all(pool)
    .await?;

    let now = time_source.now();
    Ok(users.into_iter().map(|u| u.into_profile(now)).collect())
}

/// Partial update: absent fields keep their stored value.
pub async fn update_user(
    user_id: &UserId,
    password_hash: Option<&str>,
    role: Option<Role>,
    phone: Option<&str>,
    pool: &PgPool,
    time_source: &TimeSource,
) -> Result<User, StoreError> {
    sqlx::query_as::<_, User>(
        "UPDATE users SET
            password_hash = COALESCE($2, password_hash),
            role = COALESCE($3, role),
            phone = COALESCE($4, phone),
            updated_at = $5
        WHERE id = $1
        RETURNING *",
    )
    .bind(user_id)
    .bind(password_hash)
    .bind(role)
    .bind(phone)
    .bind(time_source.now().to_sqlx())
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::RowNotFound => StoreError::UserNotFound,
        e => StoreError::Database(e),
    })
}

pub async fn delete_user(
    user_id: &UserId,
    pool: &PgPool,
) -> Result<(), StoreError> {
    // Bookings and audit entries created by this user survive with their
    // created_by / user_id set to NULL.
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::UserNotFound);
    }
    Ok(())
}

/// Move a user's `last_seen` forward to `now`.
///
/// `GREATEST` keeps the column monotonic even when requests land out of
/// order, so a stale touch can never push a user back offline.
pub async fn touch_last_seen(
    user_id: &UserId,
    now: Timestamp,
    pool: &PgPool,
) -> Result<(), StoreError> {
    sqlx::query(
        "UPDATE users SET last_seen = GREATEST(last_seen, $2) WHERE id = $1",
    )
    .bind(user_id)
    .bind(now.to_sqlx())
    .execute(pool)
    .await?;
    Ok(())
}
