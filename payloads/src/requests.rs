use crate::{GuestId, Role, Room};
use serde::{Deserialize, Serialize};

pub const FULL_NAME_MIN_LEN: usize = 2;
pub const PHONE_MIN_DIGITS: usize = 7;
pub const INN_LEN: usize = 14;
pub const PEOPLE_COUNT_MIN: i32 = 1;
pub const PEOPLE_COUNT_MAX: i32 = 10;

/// A validation failure scoped to a single guest field.
///
/// The API layer aggregates these into one 400 response, so a client can
/// show every broken field at once instead of fixing them one at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate and trim a guest's full name.
pub fn validate_full_name(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.chars().count() < FULL_NAME_MIN_LEN {
        return Err(
            "ФИО должно содержать минимум 2 символа".to_string()
        );
    }
    Ok(trimmed.to_string())
}

/// Normalize a phone number for storage.
///
/// Spaces, dashes and parentheses are stripped; the result must start with
/// `+` and carry at least seven digits. The stripped form is exactly what
/// gets persisted.
pub fn normalize_phone(value: &str) -> Result<String, String> {
    let cleaned: String = value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    if !cleaned.starts_with('+') {
        return Err(
            "Номер телефона должен начинаться с +".to_string()
        );
    }
    let digits = cleaned[1..].chars().filter(char::is_ascii_digit).count();
    if digits < PHONE_MIN_DIGITS {
        return Err(
            "Номер телефона должен содержать минимум 7 цифр"
                .to_string(),
        );
    }
    Ok(cleaned)
}

/// Normalize a tax id (ИНН). The field is optional; an empty value is
/// stored as absent. A present value must be exactly 14 digits after
/// stripping spaces.
pub fn normalize_inn(value: &str) -> Result<Option<String>, String> {
    let cleaned: String = value.chars().filter(|c| *c != ' ').collect();
    if cleaned.is_empty() {
        return Ok(None);
    }
    if !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return Err(
            "ИНН должен содержать только цифры".to_string()
        );
    }
    if cleaned.chars().count() != INN_LEN {
        return Err(
            "ИНН должен содержать ровно 14 цифр".to_string()
        );
    }
    Ok(Some(cleaned))
}

/// Validate a submitted building, returning the trimmed copy that should be
/// persisted.
pub fn validate_building(
    details: &crate::Building,
) -> Result<crate::Building, Vec<FieldError>> {
    let name = details.name.trim();
    if name.is_empty() {
        return Err(vec![FieldError {
            field: "name",
            message: "Название не может быть пустым".to_string(),
        }]);
    }
    Ok(crate::Building {
        name: name.to_string(),
        address: details.address.clone(),
    })
}

pub fn validate_people_count(value: i32) -> Result<(), String> {
    if !(PEOPLE_COUNT_MIN..=PEOPLE_COUNT_MAX).contains(&value) {
        return Err(
            "Количество людей должно быть от 1 до 10".to_string()
        );
    }
    Ok(())
}

/// Validate a submitted guest, returning the normalized copy that should be
/// persisted, or every field error at once.
pub fn validate_guest(
    details: &crate::Guest,
) -> Result<crate::Guest, Vec<FieldError>> {
    let mut errors = Vec::new();
    let mut normalized = details.clone();

    match validate_full_name(&details.full_name) {
        Ok(full_name) => normalized.full_name = full_name,
        Err(message) => errors.push(FieldError {
            field: "full_name",
            message,
        }),
    }
    match normalize_phone(&details.phone) {
        Ok(phone) => normalized.phone = phone,
        Err(message) => errors.push(FieldError {
            field: "phone",
            message,
        }),
    }
    match details.inn.as_deref().map(normalize_inn).transpose() {
        Ok(inn) => normalized.inn = inn.flatten(),
        Err(message) => errors.push(FieldError {
            field: "inn",
            message,
        }),
    }
    if let Err(message) = validate_people_count(details.people_count) {
        errors.push(FieldError {
            field: "people_count",
            message,
        });
    }

    if errors.is_empty() {
        Ok(normalized)
    } else {
        Err(errors)
    }
}

#[derive(Serialize, Deserialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

/// Body of `POST /rooms`.
///
/// The admin UI submits either one room or a `rooms` list for bulk setup of
/// a new building. The two shapes are separate variants so the bulk path
/// always works with fully-typed room values.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CreateRooms {
    Bulk { rooms: Vec<Room> },
    Single(Room),
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Sms,
    Email,
}

impl MessageType {
    /// Uppercase tag used in audit details.
    pub fn tag(&self) -> &'static str {
        match self {
            MessageType::Sms => "SMS",
            MessageType::Email => "EMAIL",
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SendGuestMessage {
    pub guest_id: GuestId,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub phone: Option<String>,
}

/// Partial user update; absent fields are left unchanged.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    pub password: Option<String>,
    pub role: Option<Role>,
    pub phone: Option<String>,
}
