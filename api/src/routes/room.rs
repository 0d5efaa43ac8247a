use actix_identity::Identity;
use actix_web::{HttpResponse, delete, get, post, put, web};
use sqlx::PgPool;

use crate::store;
use crate::time::TimeSource;

use super::{APIError, get_user_id};

#[tracing::instrument(skip(user, pool), fields(user_id = tracing::field::Empty))]
#[get("/rooms")]
pub async fn list_rooms(
    user: Identity,
    pool: web::Data<PgPool>,
) -> Result<web::Json<Vec<payloads::responses::Room>>, APIError> {
    get_user_id(&user)?;
    Ok(web::Json(store::list_rooms(&pool).await?))
}

/// Create one room or, with a `rooms` list in the body, several at once.
/// Always responds with the created ids.
#[tracing::instrument(
    skip(user, body, pool, time_source),
    fields(user_id = tracing::field::Empty)
)]
#[post("/rooms")]
pub async fn create_rooms(
    user: Identity,
    body: web::Json<payloads::requests::CreateRooms>,
    pool: web::Data<PgPool>,
    time_source: web::Data<TimeSource>,
) -> Result<web::Json<Vec<payloads::RoomId>>, APIError> {
    let user_id = get_user_id(&user)?;
    let room_ids = match body.0 {
        payloads::requests::CreateRooms::Single(details) => {
            let room =
                store::create_room(&details, &user_id, &pool, &time_source)
                    .await?;
            vec![room.id]
        }
        payloads::requests::CreateRooms::Bulk { rooms } => {
            store::create_rooms(&rooms, &user_id, &pool, &time_source)
                .await?
        }
    };
    Ok(web::Json(room_ids))
}

#[tracing::instrument(skip(user, pool), fields(user_id = tracing::field::Empty))]
#[get("/rooms/{room_id}")]
pub async fn get_room(
    user: Identity,
    path: web::Path<payloads::RoomId>,
    pool: web::Data<PgPool>,
) -> Result<web::Json<payloads::responses::Room>, APIError> {
    get_user_id(&user)?;
    Ok(web::Json(store::get_room(&path, &pool).await?))
}

#[tracing::instrument(
    skip(user, body, pool, time_source),
    fields(user_id = tracing::field::Empty)
)]
#[put("/rooms/{room_id}")]
pub async fn update_room(
    user: Identity,
    path: web::Path<payloads::RoomId>,
    body: web::Json<payloads::Room>,
    pool: web::Data<PgPool>,
    time_source: web::Data<TimeSource>,
) -> Result<web::Json<payloads::responses::Room>, APIError> {
    let user_id = get_user_id(&user)?;
    Ok(web::Json(
        store::update_room(&path, &body, &user_id, &pool, &time_source)
            .await?,
    ))
}

#[tracing::instrument(
    skip(user, pool, time_source),
    fields(user_id = tracing::field::Empty)
)]
#[delete("/rooms/{room_id}")]
pub async fn delete_room(
    user: Identity,
    path: web::Path<payloads::RoomId>,
    pool: web::Data<PgPool>,
    time_source: web::Data<TimeSource>,
) -> Result<HttpResponse, APIError> {
    let user_id = get_user_id(&user)?;
    store::delete_room(&path, &user_id, &pool, &time_source).await?;
    Ok(HttpResponse::NoContent().finish())
}
