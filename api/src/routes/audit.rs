use actix_identity::Identity;
use actix_web::{get, web};
use sqlx::PgPool;

use crate::store;

use super::{APIError, get_user_id};

// The audit trail is read-only over the API; entries are appended by the
// mutation paths and never edited.

#[tracing::instrument(skip(user, pool), fields(user_id = tracing::field::Empty))]
#[get("/audit-logs")]
pub async fn list_audit_log(
    user: Identity,
    pool: web::Data<PgPool>,
) -> Result<web::Json<Vec<payloads::responses::AuditLogEntry>>, APIError> {
    get_user_id(&user)?;
    Ok(web::Json(store::list_audit_log(&pool).await?))
}

#[tracing::instrument(skip(user, pool), fields(user_id = tracing::field::Empty))]
#[get("/audit-logs/{id}")]
pub async fn get_audit_log_entry(
    user: Identity,
    path: web::Path<payloads::AuditLogId>,
    pool: web::Data<PgPool>,
) -> Result<web::Json<payloads::responses::AuditLogEntry>, APIError> {
    get_user_id(&user)?;
    Ok(web::Json(store::get_audit_entry(&path, &pool).await?))
}
