//! # StayHub Booking Service
//!
//! Property-rental booking platform: listings, stay reservations with
//! conflict-free admission, and duplicate-booking reconciliation.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, types and repository traits
//! - **application**: Business logic and use cases (admission, reconciliation)
//! - **infrastructure**: External concerns (SeaORM persistence, crypto)
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: Pagination and shutdown plumbing

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
