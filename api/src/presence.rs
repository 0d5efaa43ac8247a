use actix_identity::IdentityExt;
use actix_web::{
    Error,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web,
};
use jiff::Timestamp;
use sqlx::PgPool;

use crate::store;
use crate::time::TimeSource;

/// How recently a user must have been seen to count as online.
pub const ONLINE_WINDOW_SECONDS: i64 = 300;

pub fn is_online(last_seen: Timestamp, now: Timestamp) -> bool {
    now.as_second() - last_seen.as_second() < ONLINE_WINDOW_SECONDS
}

/// Stamp `last_seen` for the authenticated user on every request.
///
/// Runs after the session and identity layers have resolved the cookie.
/// Anonymous requests and failed touches pass through untouched; presence
/// is bookkeeping and must never fail a request.
pub async fn track_presence(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    if let Ok(identity) = req.get_identity() {
        if let Ok(id_string) = identity.id() {
            if let Ok(user_uuid) = id_string.parse::<uuid::Uuid>() {
                let user_id = payloads::UserId(user_uuid);
                let pool = req.app_data::<web::Data<PgPool>>().cloned();
                let time_source =
                    req.app_data::<web::Data<TimeSource>>().cloned();
                if let (Some(pool), Some(time_source)) = (pool, time_source) {
                    if let Err(e) = store::touch_last_seen(
                        &user_id,
                        time_source.now(),
                        &pool,
                    )
                    .await
                    {
                        tracing::error!(
                            "Failed to update last_seen for {user_id}: {e}"
                        );
                    }
                }
            }
        }
    }
    next.call(req).await
}
