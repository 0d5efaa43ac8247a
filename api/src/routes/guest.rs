use actix_identity::Identity;
use actix_web::{HttpResponse, delete, get, post, put, web};
use sqlx::PgPool;

use crate::store;
use crate::time::TimeSource;

use super::{APIError, get_user_id};

#[tracing::instrument(skip(user, pool), fields(user_id = tracing::field::Empty))]
#[get("/guests")]
pub async fn list_guests(
    user: Identity,
    pool: web::Data<PgPool>,
) -> Result<web::Json<Vec<payloads::responses::Guest>>, APIError> {
    get_user_id(&user)?;
    Ok(web::Json(store::list_guests(&pool).await?))
}

#[tracing::instrument(
    skip(user, body, pool, time_source),
    fields(user_id = tracing::field::Empty)
)]
#[post("/guests")]
pub async fn create_guest(
    user: Identity,
    body: web::Json<payloads::Guest>,
    pool: web::Data<PgPool>,
    time_source: web::Data<TimeSource>,
) -> Result<web::Json<payloads::GuestId>, APIError> {
    let user_id = get_user_id(&user)?;
    let details = payloads::requests::validate_guest(&body)
        .map_err(APIError::Validation)?;
    let guest =
        store::create_guest(&details, &user_id, &pool, &time_source).await?;
    Ok(web::Json(guest.id))
}

#[tracing::instrument(skip(user, pool), fields(user_id = tracing::field::Empty))]
#[get("/guests/{guest_id}")]
pub async fn get_guest(
    user: Identity,
    path: web::Path<payloads::GuestId>,
    pool: web::Data<PgPool>,
) -> Result<web::Json<payloads::responses::Guest>, APIError> {
    get_user_id(&user)?;
    Ok(web::Json(store::get_guest(&path, &pool).await?))
}

#[tracing::instrument(
    skip(user, body, pool, time_source),
    fields(user_id = tracing::field::Empty)
)]
#[put("/guests/{guest_id}")]
pub async fn update_guest(
    user: Identity,
    path: web::Path<payloads::GuestId>,
    body: web::Json<payloads::Guest>,
    pool: web::Data<PgPool>,
    time_source: web::Data<TimeSource>,
) -> Result<web::Json<payloads::responses::Guest>, APIError> {
    let user_id = get_user_id(&user)?;
    let details = payloads::requests::validate_guest(&body)
        .map_err(APIError::Validation)?;
    Ok(web::Json(
        store::update_guest(&path, &details, &user_id, &pool, &time_source)
            .await?,
    ))
}

#[tracing::instrument(
    skip(user, pool, time_source),
    fields(user_id = tracing::field::Empty)
)]
#[delete("/guests/{guest_id}")]
pub async fn delete_guest(
    user: Identity,
    path: web::Path<payloads::GuestId>,
    pool: web::Data<PgPool>,
    time_source: web::Data<TimeSource>,
) -> Result<HttpResponse, APIError> {
    let user_id = get_user_id(&user)?;
    store::delete_guest(&path, &user_id, &pool, &time_source).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Record an SMS or email sent to a guest. Delivery itself happens through
/// an external gateway; this endpoint keeps the audit trail.
#[tracing::instrument(
    skip(user, body, pool, time_source),
    fields(user_id = tracing::field::Empty)
)]
#[post("/guests/send_message")]
pub async fn send_guest_message(
    user: Identity,
    body: web::Json<payloads::requests::SendGuestMessage>,
    pool: web::Data<PgPool>,
    time_source: web::Data<TimeSource>,
) -> Result<web::Json<payloads::responses::SuccessMessage>, APIError> {
    let user_id = get_user_id(&user)?;
    store::record_guest_message(
        &body.guest_id,
        body.message_type,
        &body.message,
        &user_id,
        &pool,
        &time_source,
    )
    .await?;
    Ok(web::Json(payloads::responses::SuccessMessage {
        message: "Сообщение отправлено.".to_string(),
    }))
}
