//! Display formatting for terminal output
//!
//! Formats clients and bills as tables and detail views.

pub mod bill;
pub mod client;

pub use bill::{format_bill_details, format_bill_list};
pub use client::{format_client_details, format_client_list};
