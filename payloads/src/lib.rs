//! Shared API types for the guesthouse booking backend.
//!
//! The `use-sqlx` feature adds sqlx derives so the backend can read these
//! types straight from query rows; clients (tests, admin tooling) use the
//! plain serde forms.

use derive_more::Display;
use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod api_client;
pub mod requests;
pub mod responses;

pub use api_client::{APIClient, ClientError};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[cfg_attr(feature = "use-sqlx", derive(sqlx::Type, sqlx::FromRow))]
#[cfg_attr(feature = "use-sqlx", sqlx(transparent))]
pub struct UserId(pub Uuid);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[cfg_attr(feature = "use-sqlx", derive(sqlx::Type, sqlx::FromRow))]
#[cfg_attr(feature = "use-sqlx", sqlx(transparent))]
pub struct BuildingId(pub Uuid);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[cfg_attr(feature = "use-sqlx", derive(sqlx::Type, sqlx::FromRow))]
#[cfg_attr(feature = "use-sqlx", sqlx(transparent))]
pub struct RoomId(pub Uuid);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[cfg_attr(feature = "use-sqlx", derive(sqlx::Type, sqlx::FromRow))]
#[cfg_attr(feature = "use-sqlx", sqlx(transparent))]
pub struct GuestId(pub Uuid);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[cfg_attr(feature = "use-sqlx", derive(sqlx::Type, sqlx::FromRow))]
#[cfg_attr(feature = "use-sqlx", sqlx(transparent))]
pub struct BookingId(pub Uuid);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[cfg_attr(feature = "use-sqlx", derive(sqlx::Type, sqlx::FromRow))]
#[cfg_attr(feature = "use-sqlx", sqlx(transparent))]
pub struct AuditLogId(pub Uuid);

/// Role of a backoffice user. Superadmins additionally manage the user
/// accounts themselves.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize,
)]
#[cfg_attr(feature = "use-sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "use-sqlx",
    sqlx(type_name = "user_role", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Superadmin,
}

impl Role {
    pub fn is_superadmin(&self) -> bool {
        matches!(self, Role::Superadmin)
    }
}

/// Categorical room tier, used for filtering and display only. Pricing is
/// driven entirely by `price_per_night`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize,
)]
#[cfg_attr(feature = "use-sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "use-sqlx",
    sqlx(type_name = "room_class", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum RoomClass {
    Standard,
    SemiLux,
    Lux,
    Vip,
}

impl RoomClass {
    /// Human-readable label as shown in the admin interface.
    pub fn label(&self) -> &'static str {
        match self {
            RoomClass::Standard => "Стандарт",
            RoomClass::SemiLux => "Полу-люкс",
            RoomClass::Lux => "Люкс",
            RoomClass::Vip => "ВИП",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize,
)]
#[cfg_attr(feature = "use-sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "use-sqlx",
    sqlx(type_name = "room_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Free,
    Busy,
    Repair,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize,
)]
#[cfg_attr(feature = "use-sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "use-sqlx",
    sqlx(type_name = "guest_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum GuestStatus {
    Active,
    Archived,
}

/// Booking lifecycle tag, independent of payment settlement.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize,
)]
#[cfg_attr(feature = "use-sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "use-sqlx",
    sqlx(type_name = "booking_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Active,
    Completed,
    Cancelled,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize,
)]
#[cfg_attr(feature = "use-sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "use-sqlx",
    sqlx(type_name = "payment_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Partial,
    Paid,
    Cancelled,
}

/// Building details as submitted by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub name: String,
    pub address: Option<String>,
}

/// Room details as submitted by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub building_id: BuildingId,
    pub number: String,
    pub capacity: i32,
    pub room_type: Option<String>,
    pub room_class: RoomClass,
    pub status: RoomStatus,
    pub description: Option<String>,
    pub is_active: bool,
    pub price_per_night: Decimal,
}

/// Guest details as submitted by the client, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub inn: Option<String>,
    pub people_count: i32,
    pub status: GuestStatus,
}

/// Booking details as submitted by the client.
///
/// `total_amount` is intentionally absent: it is derived server-side from the
/// room's nightly price on every save and cannot be set by callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub guest_id: GuestId,
    pub room_id: RoomId,
    pub check_in: Date,
    pub check_out: Date,
    pub people_count: i32,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub payment_amount: Decimal,
    pub comments: Option<String>,
}
