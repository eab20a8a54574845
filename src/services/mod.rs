//! Service layer for WattBook
//!
//! Wraps the repositories with audit logging. The CLI talks to these
//! services rather than to the repositories directly.

pub mod billing;
pub mod client;

pub use billing::BillingService;
pub use client::{ClientOrder, ClientService};
