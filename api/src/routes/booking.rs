use actix_identity::Identity;
use actix_web::{HttpResponse, delete, get, post, put, web};
use sqlx::PgPool;

use crate::store;
use crate::time::TimeSource;

use super::{APIError, get_user_id};

#[tracing::instrument(skip(user, pool), fields(user_id = tracing::field::Empty))]
#[get("/bookings")]
pub async fn list_bookings(
    user: Identity,
    pool: web::Data<PgPool>,
) -> Result<web::Json<Vec<payloads::responses::Booking>>, APIError> {
    get_user_id(&user)?;
    Ok(web::Json(store::list_bookings(&pool).await?))
}

#[tracing::instrument(
    skip(user, body, pool, time_source),
    fields(user_id = tracing::field::Empty)
)]
#[post("/bookings")]
pub async fn create_booking(
    user: Identity,
    body: web::Json<payloads::Booking>,
    pool: web::Data<PgPool>,
    time_source: web::Data<TimeSource>,
) -> Result<web::Json<payloads::BookingId>, APIError> {
    let user_id = get_user_id(&user)?;
    let booking =
        store::create_booking(&body, &user_id, &pool, &time_source).await?;
    Ok(web::Json(booking.booking_id))
}

#[tracing::instrument(skip(user, pool), fields(user_id = tracing::field::Empty))]
#[get("/bookings/{booking_id}")]
pub async fn get_booking(
    user: Identity,
    path: web::Path<payloads::BookingId>,
    pool: web::Data<PgPool>,
) -> Result<web::Json<payloads::responses::Booking>, APIError> {
    get_user_id(&user)?;
    Ok(web::Json(store::get_booking(&path, &pool).await?))
}

#[tracing::instrument(
    skip(user, body, pool, time_source),
    fields(user_id = tracing::field::Empty)
)]
#[put("/bookings/{booking_id}")]
pub async fn update_booking(
    user: Identity,
    path: web::Path<payloads::BookingId>,
    body: web::Json<payloads::Booking>,
    pool: web::Data<PgPool>,
    time_source: web::Data<TimeSource>,
) -> Result<web::Json<payloads::responses::Booking>, APIError> {
    let user_id = get_user_id(&user)?;
    Ok(web::Json(
        store::update_booking(&path, &body, &user_id, &pool, &time_source)
            .await?,
    ))
}

#[tracing::instrument(
    skip(user, pool, time_source),
    fields(user_id = tracing::field::Empty)
)]
#[delete("/bookings/{booking_id}")]
pub async fn delete_booking(
    user: Identity,
    path: web::Path<payloads::BookingId>,
    pool: web::Data<PgPool>,
    time_source: web::Data<TimeSource>,
) -> Result<HttpResponse, APIError> {
    let user_id = get_user_id(&user)?;
    store::delete_booking(&path, &user_id, &pool, &time_source).await?;
    Ok(HttpResponse::NoContent().finish())
}
