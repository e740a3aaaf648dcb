use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::errors::ApiError;
use crate::models::Event;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/eventdetails/{event_id}", get(get_event_details))
        .route("/alleventdetails", get(get_all_event_details))
        .route("/usereventdetails/{user_id}", get(get_user_event_details))
}

// Wire form of an event: key items decoded from their stored encoding.
// Every event endpoint returns this shape.
#[derive(Debug, Serialize)]
struct EventDetails {
    event_id: i64,
    event_title: String,
    event_date: String,
    event_time: String,
    event_description: Option<String>,
    event_image: Option<String>,
    event_key_items: Vec<String>,
}

impl From<Event> for EventDetails {
    fn from(event: Event) -> Self {
        let event_key_items = event.decoded_key_items();
        EventDetails {
            event_id: event.event_id,
            event_title: event.event_title,
            event_date: event.event_date,
            event_time: event.event_time,
            event_description: event.event_description,
            event_image: event.event_image,
            event_key_items,
        }
    }
}

// GET /eventdetails/{event_id}
async fn get_event_details(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE event_id = $1")
        .bind(event_id)
        .fetch_optional(&state.db.pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    Ok(Json(EventDetails::from(event)))
}

// GET /alleventdetails
async fn get_all_event_details(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let events = sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY event_id")
        .fetch_all(&state.db.pool)
        .await?;

    let payload: Vec<EventDetails> = events.into_iter().map(EventDetails::from).collect();
    Ok(Json(payload))
}

// GET /usereventdetails/{user_id}
//
// Bookings pointing at a missing event contribute nothing, so a user whose
// only bookings dangle gets the same 404 as a user with no bookings.
async fn get_user_event_details(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let events = sqlx::query_as::<_, Event>(
        "SELECT e.* FROM bookings b
         JOIN events e ON e.event_id = b.event_id
         WHERE b.user_id = $1
         ORDER BY b.booking_id",
    )
    .bind(user_id)
    .fetch_all(&state.db.pool)
    .await?;

    if events.is_empty() {
        return Err(ApiError::NotFound("No events found for this user".to_string()));
    }

    let payload: Vec<EventDetails> = events.into_iter().map(EventDetails::from).collect();
    Ok(Json(payload))
}
