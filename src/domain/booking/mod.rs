//! Booking aggregate
//!
//! Contains the Booking entity, interval helpers, and repository interface.

pub mod model;
pub mod repository;

pub use model::{intervals_overlap, nights, Booking, BookingStatus};
pub use repository::{BookingKey, BookingRepository};
