use actix_identity::Identity;
use actix_web::{HttpResponse, delete, get, post, put, web};
use secrecy::{ExposeSecret, SecretBox};
use sqlx::PgPool;

use crate::auth;
use crate::store;
use crate::time::TimeSource;

use super::{APIError, get_user_id};

/// The calling user's own profile. Available to any authenticated user;
/// everything else under `/users` requires the superadmin role.
#[tracing::instrument(
    skip(user, pool, time_source),
    fields(user_id = tracing::field::Empty)
)]
#[get("/users/me")]
pub async fn me(
    user: Identity,
    pool: web::Data<PgPool>,
    time_source: web::Data<TimeSource>,
) -> Result<web::Json<payloads::responses::UserProfile>, APIError> {
    let user_id = get_user_id(&user)?;
    let user_data = store::read_user(&user_id, &pool).await?;
    Ok(web::Json(user_data.into_profile(time_source.now())))
}

async fn require_superadmin_caller(
    user: &Identity,
    pool: &PgPool,
) -> Result<payloads::UserId, APIError> {
    let user_id = get_user_id(user)?;
    let actor = store::read_user(&user_id, pool).await?;
    store::require_superadmin(&actor)?;
    Ok(user_id)
}

#[tracing::instrument(
    skip(user, pool, time_source),
    fields(user_id = tracing::field::Empty)
)]
#[get("/users")]
pub async fn list_users(
    user: Identity,
    pool: web::Data<PgPool>,
    time_source: web::Data<TimeSource>,
) -> Result<web::Json<Vec<payloads::responses::UserProfile>>, APIError> {
    require_superadmin_caller(&user, &pool).await?;
    Ok(web::Json(store::list_users(&pool, &time_source).await?))
}

#[tracing::instrument(
    skip(user, body, pool, time_source),
    fields(user_id = tracing::field::Empty, username = tracing::field::Empty)
)]
#[post("/users")]
pub async fn create_user(
    user: Identity,
    body: web::Json<payloads::requests::CreateUser>,
    pool: web::Data<PgPool>,
    time_source: web::Data<TimeSource>,
) -> Result<web::Json<payloads::UserId>, APIError> {
    require_superadmin_caller(&user, &pool).await?;
    let details = body.0;
    tracing::Span::current()
        .record("username", tracing::field::display(&details.username));
    let created = auth::create_user(
        &details.username,
        SecretBox::new(Box::new(details.password)),
        details.role,
        details.phone.as_deref(),
        &pool,
        &time_source,
    )
    .await?;
    Ok(web::Json(created.id))
}

#[tracing::instrument(
    skip(user, pool, time_source),
    fields(user_id = tracing::field::Empty)
)]
#[get("/users/{user_id}")]
pub async fn get_user(
    user: Identity,
    path: web::Path<payloads::UserId>,
    pool: web::Data<PgPool>,
    time_source: web::Data<TimeSource>,
) -> Result<web::Json<payloads::responses::UserProfile>, APIError> {
    require_superadmin_caller(&user, &pool).await?;
    let user_data = store::read_user(&path, &pool).await?;
    Ok(web::Json(user_data.into_profile(time_source.now())))
}

#[tracing::instrument(
    skip(user, body, pool, time_source),
    fields(user_id = tracing::field::Empty)
)]
#[put("/users/{user_id}")]
pub async fn update_user(
    user: Identity,
    path: web::Path<payloads::UserId>,
    body: web::Json<payloads::requests::UpdateUser>,
    pool: web::Data<PgPool>,
    time_source: web::Data<TimeSource>,
) -> Result<web::Json<payloads::responses::UserProfile>, APIError> {
    require_superadmin_caller(&user, &pool).await?;
    let details = body.0;

    let password_hash = match details.password {
        Some(password) => Some(
            auth::hash_password(SecretBox::new(Box::new(password))).await?,
        ),
        None => None,
    };

    let updated = store::update_user(
        &path,
        password_hash.as_ref().map(|h| h.expose_secret().as_str()),
        details.role,
        details.phone.as_deref(),
        &pool,
        &time_source,
    )
    .await?;
    Ok(web::Json(updated.into_profile(time_source.now())))
}

#[tracing::instrument(skip(user, pool), fields(user_id = tracing::field::Empty))]
#[delete("/users/{user_id}")]
pub async fn delete_user(
    user: Identity,
    path: web::Path<payloads::UserId>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, APIError> {
    let caller = require_superadmin_caller(&user, &pool).await?;
    // A superadmin removing their own account would lock the session to a
    // dangling id mid-request.
    if caller == *path {
        return Err(APIError::BadRequest(anyhow::anyhow!(
            "Cannot delete the currently logged-in user"
        )));
    }
    store::delete_user(&path, &pool).await?;
    Ok(HttpResponse::NoContent().finish())
}
