use super::*;
use jiff::civil::Date;
use jiff_sqlx::ToSqlx;
use payloads::{BookingId, BuildingId, RoomClass};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::time::TimeSource;

// Bookings are listed joined with the guest and room summary columns the
// response embeds, so a listing is one query regardless of row count.
const BOOKING_SELECT: &str = "SELECT bk.*,
        g.full_name AS guest_full_name,
        g.phone AS guest_phone,
        r.number AS room_number,
        r.room_class,
        r.building_id,
        b.name AS building_name
    FROM bookings bk
    JOIN guests g ON g.id = bk.guest_id
    JOIN rooms r ON r.id = bk.room_id
    JOIN buildings b ON b.id = r.building_id";

#[derive(Debug, sqlx::FromRow)]
struct BookingListRow {
    #[sqlx(flatten)]
    booking: Booking,
    guest_full_name: String,
    guest_phone: String,
    room_number: String,
    room_class: RoomClass,
    building_id: BuildingId,
    building_name: String,
}

impl From<BookingListRow> for responses::Booking {
    fn from(row: BookingListRow) -> Self {
        Self {
            booking_id: row.booking.id,
            guest: responses::GuestSummary {
                guest_id: row.booking.guest_id,
                full_name: row.guest_full_name,
                phone: row.guest_phone,
            },
            room: responses::RoomSummary {
                room_id: row.booking.room_id,
                number: row.room_number,
                room_class: row.room_class,
                building_id: row.building_id,
                building_name: row.building_name,
            },
            check_in: row.booking.check_in,
            check_out: row.booking.check_out,
            people_count: row.booking.people_count,
            status: row.booking.status,
            payment_status: row.booking.payment_status,
            payment_amount: row.booking.payment_amount,
            total_amount: row.booking.total_amount,
            comments: row.booking.comments,
            created_by: row.booking.created_by,
            created_at: row.booking.created_at,
            updated_at: row.booking.updated_at,
        }
    }
}

/// Number of nights between check-in and check-out.
pub fn nights_between(check_in: Date, check_out: Date) -> i64 {
    i64::from((check_out - check_in).get_days())
}

/// Total owed for a stay: nightly price times the number of nights.
pub fn compute_total(price_per_night: Decimal, nights: i64) -> Decimal {
    price_per_night * Decimal::from(nights)
}

fn booking_snapshot(booking: &Booking, guest: &Guest, room: &Room) -> String {
    format!(
        "{} в номере {}, {} — {}",
        guest.full_name, room.number, booking.check_in, booking.check_out
    )
}

pub async fn create_booking(
    details: &payloads::Booking,
    actor: &UserId,
    pool: &PgPool,
    time_source: &TimeSource,
) -> Result<responses::Booking, StoreError> {
    let guest = get_guest_row(&details.guest_id, pool).await?;
    let room = get_room_row(&details.room_id, pool).await?;

    let nights = nights_between(details.check_in, details.check_out);
    if nights <= 0 {
        return Err(StoreError::InvalidDateRange);
    }
    let total_amount = compute_total(room.price_per_night, nights);

    let booking = sqlx::query_as::<_, Booking>(
        "INSERT INTO bookings (
            guest_id,
            room_id,
            check_in,
            check_out,
            people_count,
            status,
            payment_status,
            payment_amount,
            total_amount,
            comments,
            created_by,
            created_at,
            updated_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12)
        RETURNING *",
    )
    .bind(details.guest_id)
    .bind(details.room_id)
    .bind(details.check_in.to_sqlx())
    .bind(details.check_out.to_sqlx())
    .bind(details.people_count)
    .bind(details.status)
    .bind(details.payment_status)
    .bind(details.payment_amount)
    .bind(total_amount)
    .bind(&details.comments)
    .bind(actor)
    .bind(time_source.now().to_sqlx())
    .fetch_one(pool)
    .await?;

    record_audit(
        Some(actor),
        ACTION_CREATED,
        OBJECT_BOOKING,
        booking.id.0,
        booking_snapshot(&booking, &guest, &room),
        pool,
        time_source,
    )
    .await;
    Ok(booking.into_response(&guest, &room))
}

pub(super) async fn get_booking_row(
    booking_id: &BookingId,
    pool: &PgPool,
) -> Result<Booking, StoreError> {
    sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
        .bind(booking_id)
        .fetch_one(pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => StoreError::BookingNotFound,
            e => StoreError::Database(e),
        })
}

pub async fn get_booking(
    booking_id: &BookingId,
    pool: &PgPool,
) -> Result<responses::Booking, StoreError> {
    let booking = get_booking_row(booking_id, pool).await?;
    let guest = get_guest_row(&booking.guest_id, pool).await?;
    let room = get_room_row(&booking.room_id, pool).await?;
    Ok(booking.into_response(&guest, &room))
}

/// List bookings, most recent check-in first.
pub async fn list_bookings(
    pool: &PgPool,
) -> Result<Vec<responses::Booking>, StoreError> {
    let rows = sqlx::query_as::<_, BookingListRow>(&format!(
        "{BOOKING_SELECT} ORDER BY bk.check_in DESC, bk.created_at DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn update_booking(
    booking_id: &BookingId,
    details: &payloads::Booking,
    actor: &UserId,
    pool: &PgPool,
    time_source: &TimeSource,
) -> Result<responses::Booking, StoreError> {
    let guest = get_guest_row(&details.guest_id, pool).await?;
    let room = get_room_row(&details.room_id, pool).await?;

    let nights = nights_between(details.check_in, details.check_out);
    if nights <= 0 {
        return Err(StoreError::InvalidDateRange);
    }
    // Dates and room may have changed, so the total is always recomputed.
    let total_amount = compute_total(room.price_per_night, nights);

    let booking = sqlx::query_as::<_, Booking>(
        "UPDATE bookings SET
            guest_id = $2,
            room_id = $3,
            check_in = $4,
            check_out = $5,
            people_count = $6,
            status = $7,
            payment_status = $8,
            payment_amount = $9,
            total_amount = $10,
            comments = $11,
            updated_at = $12
        WHERE id = $1
        RETURNING *",
    )
    .bind(booking_id)
    .bind(details.guest_id)
    .bind(details.room_id)
    .bind(details.check_in.to_sqlx())
    .bind(details.check_out.to_sqlx())
    .bind(details.people_count)
    .bind(details.status)
    .bind(details.payment_status)
    .bind(details.payment_amount)
    .bind(total_amount)
    .bind(&details.comments)
    .bind(time_source.now().to_sqlx())
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::RowNotFound => StoreError::BookingNotFound,
        e => StoreError::Database(e),
    })?;

    record_audit(
        Some(actor),
        ACTION_UPDATED,
        OBJECT_BOOKING,
        booking.id.0,
        booking_snapshot(&booking, &guest, &room),
        pool,
        time_source,
    )
    .await;
    Ok(booking.into_response(&guest, &room))
}

pub async fn delete_booking(
    booking_id: &BookingId,
    actor: &UserId,
    pool: &PgPool,
    time_source: &TimeSource,
) -> Result<(), StoreError> {
    let booking = get_booking_row(booking_id, pool).await?;
    let guest = get_guest_row(&booking.guest_id, pool).await?;
    let room = get_room_row(&booking.room_id, pool).await?;

    sqlx::query("DELETE FROM bookings WHERE id = $1")
        .bind(booking_id)
        .execute(pool)
        .await?;

    record_audit(
        Some(actor),
        ACTION_DELETED,
        OBJECT_BOOKING,
        booking.id.0,
        booking_snapshot(&booking, &guest, &room),
        pool,
        time_source,
    )
    .await;
    Ok(())
}
