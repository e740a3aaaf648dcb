pub mod booking;
pub mod event;
pub mod user;

pub use booking::{Booking, BookingDetails};
pub use event::Event;
pub use user::User;
