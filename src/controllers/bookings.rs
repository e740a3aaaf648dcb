use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::errors::ApiError;
use crate::models::{Booking, BookingDetails};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/booking", post(create_booking))
        .route("/bookingdetails", get(get_booking_details))
}

// POST /booking
#[derive(Debug, Deserialize)]
struct CreateBookingRequest {
    event_id: i64,
    user_id: i64,
    ticket_number: i32,
    booking_details: Option<String>,
}

// The ids are stored as given, with no existence check on either side.
async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let details = req.booking_details.unwrap_or_default();

    sqlx::query(
        "INSERT INTO bookings (event_id, user_id, ticket_number, booking_details)
         VALUES ($1, $2, $3, $4)",
    )
    .bind(req.event_id)
    .bind(req.user_id)
    .bind(req.ticket_number)
    .bind(&details)
    .execute(&state.db.pool)
    .await?;

    Ok(Json(json!({"message": "Booking successful!"})))
}

// GET /bookingdetails
#[derive(Debug, Deserialize)]
struct BookingDetailsQuery {
    event_id: Option<i64>,
    user_id: Option<i64>,
}

#[derive(Debug, Serialize)]
struct BookingResponse {
    booking_id: i64,
    event_id: i64,
    user_id: i64,
    ticket_number: i32,
    booking_details: BookingDetails,
    created_at: NaiveDateTime,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        let booking_details = BookingDetails::decode(&b.booking_details);
        BookingResponse {
            booking_id: b.booking_id,
            event_id: b.event_id,
            user_id: b.user_id,
            ticket_number: b.ticket_number,
            booking_details,
            created_at: b.created_at,
        }
    }
}

async fn get_booking_details(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BookingDetailsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let mut q = String::from("SELECT * FROM bookings WHERE TRUE");
    let mut bind_idx = 1;
    if params.event_id.is_some() {
        q.push_str(&format!(" AND event_id = ${}", bind_idx));
        bind_idx += 1;
    }
    if params.user_id.is_some() {
        q.push_str(&format!(" AND user_id = ${}", bind_idx));
    }
    q.push_str(" ORDER BY booking_id");

    let mut dbq = sqlx::query_as::<_, Booking>(&q);
    if let Some(event_id) = params.event_id {
        dbq = dbq.bind(event_id);
    }
    if let Some(user_id) = params.user_id {
        dbq = dbq.bind(user_id);
    }

    let bookings = dbq.fetch_all(&state.db.pool).await?;

    if bookings.is_empty() {
        return Err(ApiError::NotFound("No bookings found".to_string()));
    }

    let payload: Vec<BookingResponse> = bookings.into_iter().map(BookingResponse::from).collect();
    Ok(Json(payload))
}
