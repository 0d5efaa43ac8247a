use actix_identity::Identity;
use actix_web::{HttpResponse, delete, get, post, put, web};
use sqlx::PgPool;

use crate::store;
use crate::time::TimeSource;

use super::{APIError, get_user_id};

#[tracing::instrument(skip(user, pool), fields(user_id = tracing::field::Empty))]
#[get("/buildings")]
pub async fn list_buildings(
    user: Identity,
    pool: web::Data<PgPool>,
) -> Result<web::Json<Vec<payloads::responses::Building>>, APIError> {
    get_user_id(&user)?;
    Ok(web::Json(store::list_buildings(&pool).await?))
}

#[tracing::instrument(
    skip(user, body, pool, time_source),
    fields(user_id = tracing::field::Empty)
)]
#[post("/buildings")]
pub async fn create_building(
    user: Identity,
    body: web::Json<payloads::Building>,
    pool: web::Data<PgPool>,
    time_source: web::Data<TimeSource>,
) -> Result<web::Json<payloads::BuildingId>, APIError> {
    get_user_id(&user)?;
    let details = payloads::requests::validate_building(&body)
        .map_err(APIError::Validation)?;
    let building =
        store::create_building(&details, &pool, &time_source).await?;
    Ok(web::Json(building.id))
}

#[tracing::instrument(skip(user, pool), fields(user_id = tracing::field::Empty))]
#[get("/buildings/{building_id}")]
pub async fn get_building(
    user: Identity,
    path: web::Path<payloads::BuildingId>,
    pool: web::Data<PgPool>,
) -> Result<web::Json<payloads::responses::Building>, APIError> {
    get_user_id(&user)?;
    Ok(web::Json(store::get_building(&path, &pool).await?))
}

#[tracing::instrument(
    skip(user, body, pool, time_source),
    fields(user_id = tracing::field::Empty)
)]
#[put("/buildings/{building_id}")]
pub async fn update_building(
    user: Identity,
    path: web::Path<payloads::BuildingId>,
    body: web::Json<payloads::Building>,
    pool: web::Data<PgPool>,
    time_source: web::Data<TimeSource>,
) -> Result<web::Json<payloads::responses::Building>, APIError> {
    get_user_id(&user)?;
    let details = payloads::requests::validate_building(&body)
        .map_err(APIError::Validation)?;
    Ok(web::Json(
        store::update_building(&path, &details, &pool, &time_source).await?,
    ))
}

#[tracing::instrument(skip(user, pool), fields(user_id = tracing::field::Empty))]
#[delete("/buildings/{building_id}")]
pub async fn delete_building(
    user: Identity,
    path: web::Path<payloads::BuildingId>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, APIError> {
    get_user_id(&user)?;
    store::delete_building(&path, &pool).await?;
    Ok(HttpResponse::NoContent().finish())
}
