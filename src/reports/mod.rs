//! Reports module for WattBook
//!
//! Read-only aggregation over the client and bill stores.

pub mod totals;

pub use totals::BillingTotalsReport;
