use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

// event_id and user_id are reference columns only; nothing validates them at
// insert time, so a booking may point at rows that do not exist.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub booking_id: i64,
    pub event_id: i64,
    pub user_id: i64,
    pub ticket_number: i32,
    pub booking_details: String,
    pub created_at: NaiveDateTime,
}

/// Decoded form of the `booking_details` column: a JSON object decodes to a
/// structured mapping, anything else stays a literal string. Serializes
/// untagged, so callers see either a JSON object or a plain string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BookingDetails {
    Structured(serde_json::Map<String, serde_json::Value>),
    Raw(String),
}

impl BookingDetails {
    pub fn decode(raw: &str) -> Self {
        match serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(raw) {
            Ok(map) => BookingDetails::Structured(map),
            Err(_) => BookingDetails::Raw(raw.to_string()),
        }
    }
}
