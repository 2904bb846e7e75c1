//! Identity use-cases: registration, login, user administration

pub mod service;

pub use service::{AuthResult, IdentityService};
