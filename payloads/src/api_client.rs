use crate::{
    Booking, BookingId, Building, BuildingId, Guest, GuestId, Room, RoomId,
    UserId, requests, responses,
};
use reqwest::StatusCode;
use serde::Serialize;

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// An API client for interfacing with the backend.
///
/// Authentication state lives in the reqwest client's cookie store, so the
/// same instance must be reused across calls within a session.
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
}

/// Helper methods for http actions
impl APIClient {
    fn format_url(&self, path: &str) -> String {
        format!("{}/api/{path}", &self.address)
    }

    async fn get(&self, path: &str) -> ReqwestResult {
        self.inner_client.get(self.format_url(path)).send().await
    }

    async fn post(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        self.inner_client
            .post(self.format_url(path))
            .json(body)
            .send()
            .await
    }

    async fn empty_post(&self, path: &str) -> ReqwestResult {
        self.inner_client.post(self.format_url(path)).send().await
    }

    async fn put(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        self.inner_client
            .put(self.format_url(path))
            .json(body)
            .send()
            .await
    }

    async fn delete(&self, path: &str) -> ReqwestResult {
        self.inner_client.delete(self.format_url(path)).send().await
    }
}

/// Methods on the backend API
impl APIClient {
    pub async fn health_check(&self) -> Result<(), ClientError> {
        let response = self.get("health_check").await?;
        ok_empty(response).await
    }

    pub async fn login(
        &self,
        details: &requests::LoginCredentials,
    ) -> Result<(), ClientError> {
        let response = self.post("login", details).await?;
        ok_empty(response).await
    }

    /// Check if the user is logged in.
    pub async fn login_check(&self) -> Result<bool, ClientError> {
        let response = self.empty_post("login_check").await?;
        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::UNAUTHORIZED => Ok(false),
            _ => Err(ClientError::APIError(
                response.status(),
                response.text().await?,
            )),
        }
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        let response = self.empty_post("logout").await?;
        ok_empty(response).await
    }

    // Buildings

    pub async fn list_buildings(
        &self,
    ) -> Result<Vec<responses::Building>, ClientError> {
        let response = self.get("buildings").await?;
        ok_body(response).await
    }

    pub async fn create_building(
        &self,
        details: &Building,
    ) -> Result<BuildingId, ClientError> {
        let response = self.post("buildings", details).await?;
        ok_body(response).await
    }

    pub async fn get_building(
        &self,
        building_id: &BuildingId,
    ) -> Result<responses::Building, ClientError> {
        let response =
            self.get(&format!("buildings/{}", building_id.0)).await?;
        ok_body(response).await
    }

    pub async fn update_building(
        &self,
        building_id: &BuildingId,
        details: &Building,
    ) -> Result<responses::Building, ClientError> {
        let response = self
            .put(&format!("buildings/{}", building_id.0), details)
            .await?;
        ok_body(response).await
    }

    pub async fn delete_building(
        &self,
        building_id: &BuildingId,
    ) -> Result<(), ClientError> {
        let response =
            self.delete(&format!("buildings/{}", building_id.0)).await?;
        ok_empty(response).await
    }

    // Rooms

    pub async fn list_rooms(
        &self,
    ) -> Result<Vec<responses::Room>, ClientError> {
        let response = self.get("rooms").await?;
        ok_body(response).await
    }

    pub async fn create_room(
        &self,
        details: &Room,
    ) -> Result<Vec<RoomId>, ClientError> {
        let response = self
            .post("rooms", &requests::CreateRooms::Single(details.clone()))
            .await?;
        ok_body(response).await
    }

    /// Create several rooms in one request (all inserted or none).
    pub async fn create_rooms(
        &self,
        rooms: &[Room],
    ) -> Result<Vec<RoomId>, ClientError> {
        let response = self
            .post(
                "rooms",
                &requests::CreateRooms::Bulk {
                    rooms: rooms.to_vec(),
                },
            )
            .await?;
        ok_body(response).await
    }

    pub async fn get_room(
        &self,
        room_id: &RoomId,
    ) -> Result<responses::Room, ClientError> {
        let response = self.get(&format!("rooms/{}", room_id.0)).await?;
        ok_body(response).await
    }

    pub async fn update_room(
        &self,
        room_id: &RoomId,
        details: &Room,
    ) -> Result<responses::Room, ClientError> {
        let response =
            self.put(&format!("rooms/{}", room_id.0), details).await?;
        ok_body(response).await
    }

    pub async fn delete_room(
        &self,
        room_id: &RoomId,
    ) -> Result<(), ClientError> {
        let response = self.delete(&format!("rooms/{}", room_id.0)).await?;
        ok_empty(response).await
    }

    // Guests

    pub async fn list_guests(
        &self,
    ) -> Result<Vec<responses::Guest>, ClientError> {
        let response = self.get("guests").await?;
        ok_body(response).await
    }

    pub async fn create_guest(
        &self,
        details: &Guest,
    ) -> Result<GuestId, ClientError> {
        let response = self.post("guests", details).await?;
        ok_body(response).await
    }

    pub async fn get_guest(
        &self,
        guest_id: &GuestId,
    ) -> Result<responses::Guest, ClientError> {
        let response = self.get(&format!("guests/{}", guest_id.0)).await?;
        ok_body(response).await
    }

    pub async fn update_guest(
        &self,
        guest_id: &GuestId,
        details: &Guest,
    ) -> Result<responses::Guest, ClientError> {
        let response =
            self.put(&format!("guests/{}", guest_id.0), details).await?;
        ok_body(response).await
    }

    pub async fn delete_guest(
        &self,
        guest_id: &GuestId,
    ) -> Result<(), ClientError> {
        let response = self.delete(&format!("guests/{}", guest_id.0)).await?;
        ok_empty(response).await
    }

    /// Record an outgoing SMS/email to a guest. Delivery is synthetic; the
    /// call only logs an audit entry and returns a confirmation message.
    pub async fn send_guest_message(
        &self,
        details: &requests::SendGuestMessage,
    ) -> Result<responses::SuccessMessage, ClientError> {
        let response = self.post("guests/send_message", details).await?;
        ok_body(response).await
    }

    // Bookings

    pub async fn list_bookings(
        &self,
    ) -> Result<Vec<responses::Booking>, ClientError> {
        let response = self.get("bookings").await?;
        ok_body(response).await
    }

    pub async fn create_booking(
        &self,
        details: &Booking,
    ) -> Result<BookingId, ClientError> {
        let response = self.post("bookings", details).await?;
        ok_body(response).await
    }

    pub async fn get_booking(
        &self,
        booking_id: &BookingId,
    ) -> Result<responses::Booking, ClientError> {
        let response = self.get(&format!("bookings/{}", booking_id.0)).await?;
        ok_body(response).await
    }

    pub async fn update_booking(
        &self,
        booking_id: &BookingId,
        details: &Booking,
    ) -> Result<responses::Booking, ClientError> {
        let response = self
            .put(&format!("bookings/{}", booking_id.0), details)
            .await?;
        ok_body(response).await
    }

    pub async fn delete_booking(
        &self,
        booking_id: &BookingId,
    ) -> Result<(), ClientError> {
        let response =
            self.delete(&format!("bookings/{}", booking_id.0)).await?;
        ok_empty(response).await
    }

    // Users

    pub async fn list_users(
        &self,
    ) -> Result<Vec<responses::UserProfile>, ClientError> {
        let response = self.get("users").await?;
        ok_body(response).await
    }

    pub async fn create_user(
        &self,
        details: &requests::CreateUser,
    ) -> Result<UserId, ClientError> {
        let response = self.post("users", details).await?;
        ok_body(response).await
    }

    pub async fn get_user(
        &self,
        user_id: &UserId,
    ) -> Result<responses::UserProfile, ClientError> {
        let response = self.get(&format!("users/{}", user_id.0)).await?;
        ok_body(response).await
    }

    pub async fn update_user(
        &self,
        user_id: &UserId,
        details: &requests::UpdateUser,
    ) -> Result<responses::UserProfile, ClientError> {
        let response =
            self.put(&format!("users/{}", user_id.0), details).await?;
        ok_body(response).await
    }

    pub async fn delete_user(
        &self,
        user_id: &UserId,
    ) -> Result<(), ClientError> {
        let response = self.delete(&format!("users/{}", user_id.0)).await?;
        ok_empty(response).await
    }

    /// Get the calling user's own profile, including computed online status.
    pub async fn me(&self) -> Result<responses::UserProfile, ClientError> {
        let response = self.get("users/me").await?;
        ok_body(response).await
    }

    // Audit log

    /// List audit entries, newest first.
    pub async fn list_audit_log(
        &self,
    ) -> Result<Vec<responses::AuditLogEntry>, ClientError> {
        let response = self.get("audit-logs").await?;
        ok_body(response).await
    }

    pub async fn get_audit_log_entry(
        &self,
        id: &crate::AuditLogId,
    ) -> Result<responses::AuditLogEntry, ClientError> {
        let response = self.get(&format!("audit-logs/{}", id.0)).await?;
        ok_body(response).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An unhandled API error to display, containing response text.
    #[error("{1}")]
    APIError(StatusCode, String),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
}

/// Deserialize a successful request into the desired type, or return an
/// appropriate error.
pub async fn ok_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    Ok(response.json::<T>().await?)
}

/// Check that an empty response is OK, returning a ClientError if not.
pub async fn ok_empty(response: reqwest::Response) -> Result<(), ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    Ok(())
}
