use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, post, web};
use sqlx::PgPool;

use crate::auth::{AuthError, Credentials, validate_credentials};

use super::{APIError, get_user_id};

#[tracing::instrument(
    skip(credentials, pool),
    fields(username=tracing::field::Empty, user_id=tracing::field::Empty),
    ret,
)]
#[post("/login")]
pub async fn login(
    request: HttpRequest,
    credentials: web::Json<Credentials>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, APIError> {
    tracing::Span::current()
        .record("username", tracing::field::display(&credentials.username));
    match validate_credentials(credentials.0, &pool).await {
        Ok(user_id) => {
            tracing::Span::current()
                .record("user_id", tracing::field::display(&user_id));
            Identity::login(&request.extensions(), user_id.to_string())
                .map_err(|e| APIError::UnexpectedError(e.into()))?;
            Ok(HttpResponse::Ok().finish())
        }
        Err(e) => {
            let e = match e {
                AuthError::InvalidCredentials(_) => {
                    APIError::AuthError(e.into())
                }
                AuthError::UnexpectedError(_) => {
                    APIError::UnexpectedError(e.into())
                }
            };
            Err(e)
        }
    }
}

#[tracing::instrument(skip(user))]
#[post("/login_check")]
pub async fn login_check(user: Identity) -> Result<HttpResponse, APIError> {
    get_user_id(&user)?;
    Ok(HttpResponse::Ok().finish())
}

#[tracing::instrument(skip(user))]
#[post("/logout")]
pub async fn logout(user: Identity) -> Result<HttpResponse, APIError> {
    let _ = get_user_id(&user); // to instrument the user_id, if exists
    user.logout();
    Ok(HttpResponse::Ok().finish())
}
