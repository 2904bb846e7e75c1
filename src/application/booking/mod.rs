//! Booking use-cases: admission and duplicate reconciliation

pub mod admission;
pub mod reconciliation;

pub use admission::{AdmissionService, Decision, ProposedStay, RejectReason};
pub use reconciliation::{GroupOutcome, ReconciliationReport, ReconciliationService};
