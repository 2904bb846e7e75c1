//! Business logic and use cases
//!
//! Services orchestrate domain entities through the repository traits;
//! all of them receive a shared `Arc<dyn RepositoryProvider>`.

pub mod booking;
pub mod identity;
pub mod listing;

pub use booking::{
    AdmissionService, Decision, ProposedStay, ReconciliationReport, ReconciliationService,
    RejectReason,
};
pub use identity::{AuthResult, IdentityService};
pub use listing::{ListingService, NewListing};
