use crate::{
    AuditLogId, BookingId, BookingStatus, BuildingId, GuestId, PaymentStatus,
    Role, RoomClass, RoomId, UserId,
};
use jiff::{Timestamp, civil::Date};
#[cfg(feature = "use-sqlx")]
use jiff_sqlx::Timestamp as SqlxTs;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub building_id: BuildingId,
    pub building_details: crate::Building,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub room_id: RoomId,
    pub room_details: crate::Room,
    /// Name of the owning building, denormalized for list views.
    pub building_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    pub guest_id: GuestId,
    pub guest_details: crate::Guest,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Compact guest reference embedded in booking responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "use-sqlx", derive(sqlx::FromRow))]
pub struct GuestSummary {
    pub guest_id: GuestId,
    pub full_name: String,
    pub phone: String,
}

/// Compact room reference embedded in booking responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "use-sqlx", derive(sqlx::FromRow))]
pub struct RoomSummary {
    pub room_id: RoomId,
    pub number: String,
    pub room_class: RoomClass,
    pub building_id: BuildingId,
    pub building_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: BookingId,
    pub guest: GuestSummary,
    pub room: RoomSummary,
    pub check_in: Date,
    pub check_out: Date,
    pub people_count: i32,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub payment_amount: Decimal,
    /// Always `price_per_night × nights`, recomputed on every save.
    pub total_amount: Decimal,
    pub comments: Option<String>,
    /// User who created the booking; null if that account was deleted.
    pub created_by: Option<UserId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub username: String,
    pub role: Role,
    pub phone: Option<String>,
    pub last_seen: Timestamp,
    /// True iff the user was active within the presence window (5 minutes).
    pub is_online: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "use-sqlx", derive(sqlx::FromRow))]
pub struct AuditLogEntry {
    pub id: AuditLogId,
    pub user_id: Option<UserId>,
    pub action: String,
    pub object_type: String,
    /// Id of the mutated entity. Recorded as a bare uuid, not a foreign
    /// key, so entries outlive the entities they describe.
    pub object_id: Uuid,
    pub details: String,
    #[cfg_attr(feature = "use-sqlx", sqlx(try_from = "SqlxTs"))]
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessMessage {
    pub message: String,
}
