use super::*;
use jiff_sqlx::ToSqlx;
use payloads::RoomId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::time::TimeSource;

// Rooms are always read together with the owning building's name.
const ROOM_SELECT: &str = "SELECT r.*, b.name AS building_name
    FROM rooms r JOIN buildings b ON b.id = r.building_id";

fn room_snapshot(room: &Room) -> String {
    format!(
        "Номер {} ({}), здание {}",
        room.number,
        room.room_class.label(),
        room.building_name
    )
}

async fn insert_room(
    details: &payloads::Room,
    tx: &mut Transaction<'_, Postgres>,
    time_source: &TimeSource,
) -> Result<RoomId, StoreError> {
    sqlx::query_as::<_, RoomId>(
        "INSERT INTO rooms (
            building_id,
            number,
            capacity,
            room_type,
            room_class,
            status,
            description,
            is_active,
            price_per_night,
            created_at,
            updated_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
        RETURNING id",
    )
    .bind(details.building_id)
    .bind(&details.number)
    .bind(details.capacity)
    .bind(&details.room_type)
    .bind(details.room_class)
    .bind(details.status)
    .bind(&details.description)
    .bind(details.is_active)
    .bind(details.price_per_night)
    .bind(time_source.now().to_sqlx())
    .fetch_one(&mut **tx)
    .await
    .map_err(|e| match StoreError::from(e) {
        StoreError::NotUnique(_) => StoreError::RoomNumberNotUnique {
            number: details.number.clone(),
        },
        e => e,
    })
}

pub async fn create_room(
    details: &payloads::Room,
    actor: &UserId,
    pool: &PgPool,
    time_source: &TimeSource,
) -> Result<Room, StoreError> {
    // Explicit existence check so a dangling building_id surfaces as a 404
    // instead of an FK violation.
    get_building_row(&details.building_id, pool).await?;

    let mut tx = pool.begin().await?;
    let room_id = insert_room(details, &mut tx, time_source).await?;
    tx.commit().await?;

    let room = get_room_row(&room_id, pool).await?;
    record_audit(
        Some(actor),
        ACTION_CREATED,
        OBJECT_ROOM,
        room.id.0,
        room_snapshot(&room),
        pool,
        time_source,
    )
    .await;
    Ok(room)
}

/// Bulk-create rooms from fully-typed values, all inserted or none.
pub async fn create_rooms(
    rooms: &[payloads::Room],
    actor: &UserId,
    pool: &PgPool,
    time_source: &TimeSource,
) -> Result<Vec<RoomId>, StoreError> {
    for details in rooms {
        get_building_row(&details.building_id, pool).await?;
    }

    let mut tx = pool.begin().await?;
    let mut room_ids = Vec::with_capacity(rooms.len());
    for details in rooms {
        room_ids.push(insert_room(details, &mut tx, time_source).await?);
    }
    tx.commit().await?;

    for room_id in &room_ids {
        let room = get_room_row(room_id, pool).await?;
        record_audit(
            Some(actor),
            ACTION_CREATED,
            OBJECT_ROOM,
            room.id.0,
            room_snapshot(&room),
            pool,
            time_source,
        )
        .await;
    }
    Ok(room_ids)
}

pub(super) async fn get_room_row(
    room_id: &RoomId,
    pool: &PgPool,
) -> Result<Room, StoreError> {
    sqlx::query_as::<_, Room>(&format!("{ROOM_SELECT} WHERE r.id = $1"))
        .bind(room_id)
        .fetch_one(pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => StoreError::RoomNotFound,
            e => StoreError::Database(e),
        })
}

pub async fn get_room(
    room_id: &RoomId,
    pool: &PgPool,
) -> Result<responses::Room, StoreError> {
    Ok(get_room_row(room_id, pool).await?.into())
}

pub async fn list_rooms(
    pool: &PgPool,
) -> Result<Vec<responses::Room>, StoreError> {
    let rooms = sqlx::query_as::<_, Room>(&format!(
        "{ROOM_SELECT} ORDER BY r.number"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rooms.into_iter().map(Into::into).collect())
}

pub async fn update_room(
    room_id: &RoomId,
    details: &payloads::Room,
    actor: &UserId,
    pool: &PgPool,
    time_source: &TimeSource,
) -> Result<responses::Room, StoreError> {
    get_building_row(&details.building_id, pool).await?;

    let result = sqlx::query(
        "UPDATE rooms SET
            building_id = $2,
            number = $3,
            capacity = $4,
            room_type = $5,
            room_class = $6,
            status = $7,
            description = $8,
            is_active = $9,
            price_per_night = $10,
            updated_at = $11
        WHERE id = $1",
    )
    .bind(room_id)
    .bind(details.building_id)
    .bind(&details.number)
    .bind(details.capacity)
    .bind(&details.room_type)
    .bind(details.room_class)
    .bind(details.status)
    .bind(&details.description)
    .bind(details.is_active)
    .bind(details.price_per_night)
    .bind(time_source.now().to_sqlx())
    .execute(pool)
    .await
    .map_err(|e| match StoreError::from(e) {
        StoreError::NotUnique(_) => StoreError::RoomNumberNotUnique {
            number: details.number.clone(),
        },
        e => e,
    })?;

    if result.rows_affected() == 0 {
        return Err(StoreError::RoomNotFound);
    }

    let room = get_room_row(room_id, pool).await?;
    record_audit(
        Some(actor),
        ACTION_UPDATED,
        OBJECT_ROOM,
        room.id.0,
        room_snapshot(&room),
        pool,
        time_source,
    )
    .await;
    Ok(room.into())
}

pub async fn delete_room(
    room_id: &RoomId,
    actor: &UserId,
    pool: &PgPool,
    time_source: &TimeSource,
) -> Result<(), StoreError> {
    // Snapshot before removal; the audit entry must describe what was
    // deleted, and bookings cascade away with the row.
    let room = get_room_row(room_id, pool).await?;

    sqlx::query("DELETE FROM rooms WHERE id = $1")
        .bind(room_id)
        .execute(pool)
        .await?;

    record_audit(
        Some(actor),
        ACTION_DELETED,
        OBJECT_ROOM,
        room.id.0,
        room_snapshot(&room),
        pool,
        time_source,
    )
    .await;
    Ok(())
}
