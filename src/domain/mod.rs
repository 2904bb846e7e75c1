//! Core business entities, types and repository traits

pub mod booking;
pub mod error;
pub mod listing;
pub mod repositories;
pub mod user;

// Re-export commonly used types
pub use booking::{Booking, BookingKey, BookingRepository, BookingStatus};
pub use error::{DomainError, DomainResult};
pub use listing::{Listing, ListingRepository, ListingStatus};
pub use repositories::RepositoryProvider;
pub use user::{User, UserRepository, UserRole};
