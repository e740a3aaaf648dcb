pub mod bookings;
pub mod events;
pub mod users;

use axum::Router;
use std::sync::Arc;

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(users::routes())
        .merge(events::routes())
        .merge(bookings::routes())
}
