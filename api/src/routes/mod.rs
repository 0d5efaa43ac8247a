pub mod audit;
pub mod booking;
pub mod building;
pub mod guest;
pub mod login;
pub mod room;
pub mod user;

use actix_identity::Identity;
use actix_web::{
    HttpResponse, Responder, ResponseError, body::BoxBody,
    dev::HttpServiceFactory, get, web,
};
use payloads::requests::FieldError;
use uuid::Uuid;

use crate::store::StoreError;

pub fn api_services() -> impl HttpServiceFactory {
    web::scope("/api")
        .service(health_check)
        .service(login::login)
        .service(login::login_check)
        .service(login::logout)
        .service(building::list_buildings)
        .service(building::create_building)
        .service(building::get_building)
        .service(building::update_building)
        .service(building::delete_building)
        .service(room::list_rooms)
        .service(room::create_rooms)
        .service(room::get_room)
        .service(room::update_room)
        .service(room::delete_room)
        .service(guest::list_guests)
        .service(guest::create_guest)
        .service(guest::send_guest_message)
        .service(guest::get_guest)
        .service(guest::update_guest)
        .service(guest::delete_guest)
        .service(booking::list_bookings)
        .service(booking::create_booking)
        .service(booking::get_booking)
        .service(booking::update_booking)
        .service(booking::delete_booking)
        // `/users/me` must register before `/users/{user_id}` so "me" is
        // not captured as a path parameter.
        .service(user::me)
        .service(user::list_users)
        .service(user::create_user)
        .service(user::get_user)
        .service(user::update_user)
        .service(user::delete_user)
        .service(audit::list_audit_log)
        .service(audit::get_audit_log_entry)
}

#[get("/health_check")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("healthy")
}

#[derive(Debug, thiserror::Error)]
pub enum APIError {
    #[error("Authentication failed")]
    AuthError(#[source] anyhow::Error),
    #[error("Bad request")]
    BadRequest(#[source] anyhow::Error),
    #[error("Validation failed")]
    Validation(Vec<FieldError>),
    #[error("Permission denied")]
    Forbidden(#[source] anyhow::Error),
    #[error("Not found")]
    NotFound(#[source] anyhow::Error),
    #[error("Something went wrong")]
    UnexpectedError(#[from] anyhow::Error),
}

impl ResponseError for APIError {
    fn error_response(&self) -> HttpResponse<BoxBody> {
        match self {
            Self::AuthError(e) => {
                HttpResponse::Unauthorized().body(format!("{self}: {e}"))
            }
            Self::BadRequest(e) => {
                HttpResponse::BadRequest().body(format!("{self}: {e}"))
            }
            Self::Validation(errors) => HttpResponse::BadRequest()
                .json(serde_json::json!({ "errors": errors })),
            Self::Forbidden(e) => {
                HttpResponse::Forbidden().body(format!("{self}: {e}"))
            }
            Self::NotFound(e) => {
                HttpResponse::NotFound().body(format!("{self}: {e}"))
            }
            Self::UnexpectedError(_) => {
                HttpResponse::InternalServerError().body(self.to_string())
            }
        }
    }
}

impl From<StoreError> for APIError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Database(_) => APIError::UnexpectedError(e.into()),
            StoreError::BuildingNotFound => APIError::NotFound(e.into()),
            StoreError::RoomNotFound => APIError::NotFound(e.into()),
            StoreError::GuestNotFound => APIError::NotFound(e.into()),
            StoreError::BookingNotFound => APIError::NotFound(e.into()),
            StoreError::UserNotFound => APIError::NotFound(e.into()),
            StoreError::AuditEntryNotFound => APIError::NotFound(e.into()),
            StoreError::RequiresSuperadmin => APIError::Forbidden(e.into()),
            _ => APIError::BadRequest(e.into()),
        }
    }
}

fn get_user_id(user: &Identity) -> Result<payloads::UserId, APIError> {
    let id_str = user.id().map_err(|e| {
        APIError::AuthError(
            anyhow::Error::from(e).context("Invalid login session"),
        )
    })?;
    // special case: since this is used in so many routes, the user_id is
    // recorded here, but attaches to the span for the api route itself
    tracing::Span::current()
        .record("user_id", tracing::field::display(&id_str));
    Ok(payloads::UserId(
        Uuid::parse_str(&id_str).map_err(anyhow::Error::from)?,
    ))
}
