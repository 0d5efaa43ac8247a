use super::*;
use jiff_sqlx::ToSqlx;
use payloads::AuditLogId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::time::TimeSource;

// Action labels are shown verbatim in the admin interface.
pub const ACTION_CREATED: &str = "Создание";
pub const ACTION_UPDATED: &str = "Обновление";
pub const ACTION_DELETED: &str = "Удаление";
pub const ACTION_MESSAGE_SENT: &str = "Отправка сообщения";

pub const OBJECT_BOOKING: &str = "Booking";
pub const OBJECT_ROOM: &str = "Room";
pub const OBJECT_GUEST: &str = "Guest";

/// Append one audit entry.
///
/// Callers invoke this after their primary mutation has committed. The
/// append is deliberately not part of that transaction: if it fails, the
/// failure is logged and the primary record stands. Entries are never
/// updated or deleted afterwards.
pub async fn record_audit(
    user_id: Option<&UserId>,
    action: &str,
    object_type: &str,
    object_id: Uuid,
    details: String,
    pool: &PgPool,
    time_source: &TimeSource,
) {
    let result = sqlx::query(
        "INSERT INTO audit_log (
            user_id,
            action,
            object_type,
            object_id,
            details,
            timestamp
        ) VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(user_id)
    .bind(action)
    .bind(object_type)
    .bind(object_id)
    .bind(&details)
    .bind(time_source.now().to_sqlx())
    .execute(pool)
    .await;

    if let Err(e) = result {
        tracing::error!(
            "Failed to append audit entry for {object_type} {object_id}: {e}"
        );
    }
}

/// List audit entries, newest first.
pub async fn list_audit_log(
    pool: &PgPool,
) -> Result<Vec<responses::AuditLogEntry>, StoreError> {
    Ok(sqlx::query_as::<_, responses::AuditLogEntry>(
        "SELECT * FROM audit_log ORDER BY timestamp DESC",
    )
    .fetch_all(pool)
    .await?)
}

pub async fn get_audit_entry(
    id: &AuditLogId,
    pool: &PgPool,
) -> Result<responses::AuditLogEntry, StoreError> {
    sqlx::query_as::<_, responses::AuditLogEntry>(
        "SELECT * FROM audit_log WHERE id = $1",
    )
    .bind(id)
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::RowNotFound => StoreError::AuditEntryNotFound,
        e => StoreError::Database(e),
    })
}
