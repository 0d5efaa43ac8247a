//! Database store module for the booking backend.
//!
//! ## Design Decisions
//!
//! ### Row ids
//! - The database generates UUIDs with `DEFAULT gen_random_uuid()`; inserts
//!   return the generated id rather than round-tripping one from the
//!   application.
//!
//! ### Time Source Dependency
//! - Every function that needs current time takes a `TimeSource` parameter
//!   instead of reading the clock itself, so presence and audit timestamps
//!   can be mocked in tests.
//!
//! ### Audit coupling
//! - Audit entries are appended by an explicit call after the primary
//!   mutation has committed, never by a database trigger. A failed append
//!   is logged and swallowed; it must not roll back the primary record.
//!
//! ### Type Safety
//! - All id types are `sqlx(transparent)` newtypes from the payloads crate
//!   and bind directly in queries without touching the inner UUID.

use jiff::{Timestamp, civil::Date};
use jiff_sqlx::Timestamp as SqlxTs;
use rust_decimal::Decimal;
use sqlx::FromRow;

use payloads::{
    BookingId, BookingStatus, BuildingId, GuestId, GuestStatus,
    PaymentStatus, Role, RoomClass, RoomId, RoomStatus, UserId, responses,
};

mod audit;
mod booking;
mod building;
mod guest;
mod room;
mod user;

pub use audit::*;
pub use booking::*;
pub use building::*;
pub use guest::*;
pub use room::*;
pub use user::*;

/// A complete user row that stays in the backend.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub phone: Option<String>,
    #[sqlx(try_from = "SqlxTs")]
    pub last_seen: Timestamp,
    #[sqlx(try_from = "SqlxTs")]
    pub created_at: Timestamp,
    #[sqlx(try_from = "SqlxTs")]
    pub updated_at: Timestamp,
}

impl User {
    /// Project to the API shape, computing online status against `now`.
    pub fn into_profile(self, now: Timestamp) -> responses::UserProfile {
        responses::UserProfile {
            user_id: self.id,
            username: self.username,
            role: self.role,
            phone: self.phone,
            last_seen: self.last_seen,
            is_online: crate::presence::is_online(self.last_seen, now),
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct Building {
    pub id: BuildingId,
    pub name: String,
    pub address: Option<String>,
    #[sqlx(try_from = "SqlxTs")]
    pub created_at: Timestamp,
    #[sqlx(try_from = "SqlxTs")]
    pub updated_at: Timestamp,
}

impl From<Building> for responses::Building {
    fn from(building: Building) -> Self {
        Self {
            building_id: building.id,
            building_details: payloads::Building {
                name: building.name,
                address: building.address,
            },
            created_at: building.created_at,
            updated_at: building.updated_at,
        }
    }
}

/// A room row, always fetched joined with its building's name.
#[derive(Debug, Clone, FromRow)]
pub struct Room {
    pub id: RoomId,
    pub building_id: BuildingId,
    pub number: String,
    pub capacity: i32,
    pub room_type: Option<String>,
    pub room_class: RoomClass,
    pub status: RoomStatus,
    pub description: Option<String>,
    pub is_active: bool,
    pub price_per_night: Decimal,
    pub building_name: String,
    #[sqlx(try_from = "SqlxTs")]
    pub created_at: Timestamp,
    #[sqlx(try_from = "SqlxTs")]
    pub updated_at: Timestamp,
}

impl Room {
    pub fn summary(&self) -> responses::RoomSummary {
        responses::RoomSummary {
            room_id: self.id,
            number: self.number.clone(),
            room_class: self.room_class,
            building_id: self.building_id,
            building_name: self.building_name.clone(),
        }
    }
}

impl From<Room> for responses::Room {
    fn from(room: Room) -> Self {
        Self {
            room_id: room.id,
            building_name: room.building_name,
            created_at: room.created_at,
            updated_at: room.updated_at,
            room_details: payloads::Room {
                building_id: room.building_id,
                number: room.number,
                capacity: room.capacity,
                room_type: room.room_type,
                room_class: room.room_class,
                status: room.status,
                description: room.description,
                is_active: room.is_active,
                price_per_night: room.price_per_night,
            },
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct Guest {
    pub id: GuestId,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub inn: Option<String>,
    pub people_count: i32,
    pub status: GuestStatus,
    #[sqlx(try_from = "SqlxTs")]
    pub created_at: Timestamp,
    #[sqlx(try_from = "SqlxTs")]
    pub updated_at: Timestamp,
}

impl Guest {
    pub fn summary(&self) -> responses::GuestSummary {
        responses::GuestSummary {
            guest_id: self.id,
            full_name: self.full_name.clone(),
            phone: self.phone.clone(),
        }
    }
}

impl From<Guest> for responses::Guest {
    fn from(guest: Guest) -> Self {
        Self {
            guest_id: guest.id,
            created_at: guest.created_at,
            updated_at: guest.updated_at,
            guest_details: payloads::Guest {
                full_name: guest.full_name,
                phone: guest.phone,
                email: guest.email,
                inn: guest.inn,
                people_count: guest.people_count,
                status: guest.status,
            },
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct Booking {
    pub id: BookingId,
    pub guest_id: GuestId,
    pub room_id: RoomId,
    #[sqlx(try_from = "jiff_sqlx::Date")]
    pub check_in: Date,
    #[sqlx(try_from = "jiff_sqlx::Date")]
    pub check_out: Date,
    pub people_count: i32,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub payment_amount: Decimal,
    pub total_amount: Decimal,
    pub comments: Option<String>,
    pub created_by: Option<UserId>,
    #[sqlx(try_from = "SqlxTs")]
    pub created_at: Timestamp,
    #[sqlx(try_from = "SqlxTs")]
    pub updated_at: Timestamp,
}

impl Booking {
    /// Combine with the referenced guest and room into the API shape.
    pub fn into_response(
        self,
        guest: &Guest,
        room: &Room,
    ) -> responses::Booking {
        responses::Booking {
            booking_id: self.id,
            guest: guest.summary(),
            room: room.summary(),
            check_in: self.check_in,
            check_out: self.check_out,
            people_count: self.people_count,
            status: self.status,
            payment_status: self.payment_status,
            payment_amount: self.payment_amount,
            total_amount: self.total_amount,
            comments: self.comments,
            created_by: self.created_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Building not found")]
    BuildingNotFound,
    #[error("Room not found")]
    RoomNotFound,
    #[error("Guest not found")]
    GuestNotFound,
    #[error("Booking not found")]
    BookingNotFound,
    #[error("User not found")]
    UserNotFound,
    #[error("Audit entry not found")]
    AuditEntryNotFound,
    #[error("A room with the number '{number}' already exists")]
    RoomNumberNotUnique { number: String },
    #[error("A user with the username '{username}' already exists")]
    UsernameNotUnique { username: String },
    #[error("Check-out date must be after check-in date")]
    InvalidDateRange,
    #[error("Superadmin permissions required")]
    RequiresSuperadmin,
    #[error("Guest has no stored email address")]
    GuestHasNoEmail,
    #[error("Unique constraint violation")]
    NotUnique(#[source] sqlx::Error),
    #[error("Database error")]
    Database(#[source] sqlx::Error),
    #[error("Unexpected error")]
    UnexpectedError(#[from] anyhow::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::NotUnique(e)
            }
            _ => StoreError::Database(e),
        }
    }
}

/// Explicit per-operation authorization check, evaluated against the acting
/// user's stored role before the operation runs.
pub fn require_superadmin(actor: &User) -> Result<(), StoreError> {
    if !actor.role.is_superadmin() {
        return Err(StoreError::RequiresSuperadmin);
    }
    Ok(())
}
