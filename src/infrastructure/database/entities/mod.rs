//! Database entities module

pub mod booking;
pub mod listing;
pub mod user;

pub use booking::Entity as Booking;
pub use listing::Entity as Listing;
pub use user::Entity as User;
