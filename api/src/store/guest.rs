use super::*;
use jiff_sqlx::ToSqlx;
use payloads::GuestId;
use sqlx::PgPool;

use crate::time::TimeSource;

fn guest_snapshot(guest: &Guest) -> String {
    format!("{}, {}", guest.full_name, guest.phone)
}

pub async fn create_guest(
    details: &payloads::Guest,
    actor: &UserId,
    pool: &PgPool,
    time_source: &TimeSource,
) -> Result<Guest, StoreError> {
    let guest = sqlx::query_as::<_, Guest>(
        "INSERT INTO guests (
            full_name,
            phone,
            email,
            inn,
            people_count,
            status,
            created_at,
            updated_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
        RETURNING *",
    )
    .bind(&details.full_name)
    .bind(&details.phone)
    .bind(&details.email)
    .bind(&details.inn)
    .bind(details.people_count)
    .bind(details.status)
    .bind(time_source.now().to_sqlx())
    .fetch_one(pool)
    .await?;

    record_audit(
        Some(actor),
        ACTION_CREATED,
        OBJECT_GUEST,
        guest.id.0,
        guest_snapshot(&guest),
        pool,
        time_source,
    )
    .await;
    Ok(guest)
}

pub(super) async fn get_guest_row(
    guest_id: &GuestId,
    pool: &PgPool,
) -> Result<Guest, StoreError> {
    sqlx::query_as::<_, Guest>("SELECT * FROM guests WHERE id = $1")
        .bind(guest_id)
        .fetch_one(pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => StoreError::GuestNotFound,
            e => StoreError::Database(e),
        })
}

pub async fn get_guest(
    guest_id: &GuestId,
    pool: &PgPool,
) -> Result<responses::Guest, StoreError> {
    Ok(get_guest_row(guest_id, pool).await?.into())
}

pub async fn list_guests(
    pool: &PgPool,
) -> Result<Vec<responses::Guest>, StoreError> {
    let guests = sqlx::query_as::<_, Guest>(
        "SELECT * FROM guests ORDER BY full_name",
    )
    .fetch_all(pool)
    .await?;
    Ok(guests.into_iter().map(Into::into).collect())
}

pub async fn update_guest(
    guest_id: &GuestId,
    details: &payloads::Guest,
    actor: &UserId,
    pool: &PgPool,
    time_source: &TimeSource,
) -> Result<responses::Guest, StoreError> {
    let guest = sqlx::query_as::<_, Guest>(
        "UPDATE guests SET
            full_name = $2,
            phone = $3,
            email = $4,
            inn = $5,
            people_count = $6,
            status = $7,
            updated_at = $8
        WHERE id = $1
        RETURNING *",
    )
    .bind(guest_id)
    .bind(&details.full_name)
    .bind(&details.phone)
    .bind(&details.email)
    .bind(&details.inn)
    .bind(details.people_count)
    .bind(details.status)
    .bind(time_source.now().to_sqlx())
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::RowNotFound => StoreError::GuestNotFound,
        e => StoreError::Database(e),
    })?;

    record_audit(
        Some(actor),
        ACTION_UPDATED,
        OBJECT_GUEST,
        guest.id.0,
        guest_snapshot(&guest),
        pool,
        time_source,
    )
    .await;
    Ok(guest.into())
}

pub async fn delete_guest(
    guest_id: &GuestId,
    actor: &UserId,
    pool: &PgPool,
    time_source: &TimeSource,
) -> Result<(), StoreError> {
    // Snapshot first so the audit entry can describe the removed guest.
    // The guest's bookings cascade away with the row.
    let guest = get_guest_row(guest_id, pool).await?;

    sqlx::query("DELETE FROM guests WHERE id = $1")
        .bind(guest_id)
        .execute(pool)
        .await?;

    record_audit(
        Some(actor),
        ACTION_DELETED,
        OBJECT_GUEST,
        guest.id.0,
        guest_snapshot(&guest),
        pool,
        time_source,
    )
    .await;
    Ok(())
}

/// Record an outbound SMS or email to a guest in the audit trail.
///
/// Actual delivery happens out of band; the backend's responsibility is
/// validating the target contact exists and keeping the trail.
pub async fn record_guest_message(
    guest_id: &GuestId,
    message_type: payloads::requests::MessageType,
    message: &str,
    actor: &UserId,
    pool: &PgPool,
    time_source: &TimeSource,
) -> Result<(), StoreError> {
    let guest = get_guest_row(guest_id, pool).await?;
    if message_type == payloads::requests::MessageType::Email
        && guest.email.is_none()
    {
        return Err(StoreError::GuestHasNoEmail);
    }

    record_audit(
        Some(actor),
        ACTION_MESSAGE_SENT,
        OBJECT_GUEST,
        guest.id.0,
        format!("{} для {}: {}", message_type.tag(), guest.full_name, message),
        pool,
        time_source,
    )
    .await;
    Ok(())
}
