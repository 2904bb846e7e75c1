//! Listing aggregate

pub mod model;
pub mod repository;

pub use model::{Listing, ListingStatus};
pub use repository::ListingRepository;
